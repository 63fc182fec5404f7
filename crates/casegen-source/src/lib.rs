//! Casegen Source
//!
//! Data sources whose conversion mode can be overridden for a single call
//! without touching shared state.
//!
//! # Overview
//!
//! - **DataSource**: owns an immutable default [`ArgsCode`](casegen_model::ArgsCode)
//! - **run_with_override**: scoped override, the previous value returns when the closure ends
//! - **OverrideSnapshot**: carries active overrides into spawned tasks
//! - **SourceConfig**: TOML/JSON configuration with boundary validation
//!
//! # Example
//!
//! ```rust
//! use casegen_model::ArgsCode;
//! use casegen_source::DataSource;
//!
//! let source = DataSource::new(ArgsCode::Instance);
//!
//! let inner = source.run_with_override(|s| s.args_code(), Some(ArgsCode::Properties));
//! assert_eq!(inner, ArgsCode::Properties);
//! assert_eq!(source.args_code(), ArgsCode::Instance);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod scope;
pub mod source;

// Re-exports
pub use config::SourceConfig;
pub use error::SourceError;
pub use scope::{OverrideSnapshot, SourceId};
pub use source::DataSource;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for data source operations
    pub use crate::{DataSource, OverrideSnapshot, SourceConfig, SourceError};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
