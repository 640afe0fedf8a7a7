//! # Schemata Core
//!
//! Core types, traits, and error handling for Schemata.
//!
//! This crate provides the foundational building blocks shared by the
//! blueprint model and the dialect renderers:
//!
//! - **Types**: column default values, scalar query results, dialect kinds
//! - **Traits**: the [`Connection`] seam to the caller's database handle
//! - **Errors**: unified error handling with `SchemaError` and `SchemaResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{BoxError, ResultExt, SchemaError, SchemaResult};
pub use traits::Connection;
pub use types::{DefaultValue, DialectKind, ReferentialAction, ScalarValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
