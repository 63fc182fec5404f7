//! Casegen Model
//!
//! Test-data value model and argument conversion engine.
//!
//! # Core Concepts
//!
//! - [`ArgsCode`]: Whole-instance vs. decomposed-properties conversion mode
//! - [`TestData`]: Immutable test case (definition, result, expectation, payload)
//! - [`Arg`]: Closed set of primitive argument values
//! - [`to_params`]: Conversion of a test case into an argument list
//!
//! # Example
//!
//! ```rust
//! use casegen_model::{to_params, Arg, ArgsCode, Param, TestData};
//! use std::sync::Arc;
//!
//! let data = Arc::new(TestData::new("a>b", "true").with_arg(1).with_arg(2));
//!
//! let whole = to_params(&data, ArgsCode::Instance, false);
//! assert!(whole[0].is_same_instance(&data));
//!
//! let flat = to_params(&data, ArgsCode::Properties, false);
//! assert_eq!(flat[0], Param::Value(Arg::from("a>b => true")));
//! assert_eq!(flat.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod arg;
mod args_code;
mod convert;
mod error;
mod test_data;

// Re-exports
pub use arg::{Arg, ArgKind, ExpectedError};
pub use args_code::{ArgsCode, RawArgsCode, ARGS_CODE_PARAM};
pub use convert::{convert_raw, display_name, to_args, to_params, Param};
pub use error::ModelError;
pub use test_data::{
    Expectation, Payload, TestData, TypeDescriptor, EXIT_RETURNS, EXIT_THROWS, INLINE_ARGS,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building and converting test data
    pub use crate::{
        to_args, to_params, Arg, ArgsCode, ExpectedError, ModelError, Param, TestData,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
