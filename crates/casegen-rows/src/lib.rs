//! Casegen Rows
//!
//! Deduplicating, insertion-ordered storage of test cases and their
//! materialized rows.
//!
//! # Core Concepts
//!
//! - [`Row`]: one test case converted under one fixed args code
//! - [`RowHolder`]: value-keyed ordered set of cases, each converted once
//!
//! # Example
//!
//! ```rust
//! use casegen_model::{ArgsCode, TestData};
//! use casegen_rows::RowHolder;
//! use casegen_source::DataSource;
//!
//! let source = DataSource::new(ArgsCode::Instance);
//! let mut holder = RowHolder::for_source(&source);
//! holder.add(TestData::new("a>b", "true").with_arg(1).with_arg(2));
//!
//! let rows = source.run_with_override(
//!     |s| holder.rows_for_source(s),
//!     Some(ArgsCode::Properties),
//! );
//! assert_eq!(rows[0].params().len(), 3);
//! assert_eq!(holder.rows(None)[0].params().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod holder;
mod row;

// Re-exports
pub use holder::RowHolder;
pub use row::Row;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
