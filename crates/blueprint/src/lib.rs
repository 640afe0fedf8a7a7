//! # Schemata Blueprint
//!
//! Dialect-neutral description of a table, built through a fluent API and
//! consumed once by a dialect renderer.
//!
//! ## Core Concepts
//!
//! - **Column**: name, type literal, nullability, default, comment, placement
//! - **Index / Foreign key**: structured definitions rendered as text fragments
//! - **Blueprint**: the ordered accumulator of columns, indexes and foreign keys
//! - **TableBuilder**: the helper set every dialect blueprint exposes
//!

pub mod blueprint;
pub mod builder;
pub mod column;
pub mod index;

pub use blueprint::{Blueprint, TableBuilder};
pub use builder::{ColumnBuilder, ForeignKeyBuilder};
pub use column::Column;
pub use index::{ForeignKeyDefinition, IndexDefinition, IndexKind};

pub use schemata_core::{DefaultValue, ReferentialAction};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
