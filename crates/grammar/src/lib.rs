//! # Schemata Grammar
//!
//! Dialect renderers and the schema operations facade.
//!
//! - [`MySql`]: one `CREATE TABLE` statement with inline indexes and foreign
//!   keys, plus a table-options suffix
//! - [`Postgres`]: `CREATE TABLE`, then one statement per index, then one per
//!   foreign key
//! - [`Schema`]: runs the rendered statements against a [`Connection`]
//!
//! [`Connection`]: schemata_core::Connection

pub mod grammar;
pub mod mysql;
pub mod options;
pub mod postgres;
pub mod schema;

pub use grammar::Grammar;
pub use mysql::{MySql, MySqlBlueprint};
pub use options::{MySqlOptions, PostgresOptions};
pub use postgres::{Postgres, PostgresBlueprint};
pub use schema::Schema;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
