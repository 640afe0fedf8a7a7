//! # Schemata
//!
//! Fluent table blueprints rendered as MySQL or PostgreSQL DDL and run
//! through a schema operations facade.
//!
//! ```rust,ignore
//! use schemata::prelude::*;
//!
//! let mut schema = Schema::postgres(connection);
//!
//! schema.create("posts", |t| {
//!     t.big_serial("id");
//!     t.big_integer("user_id");
//!     t.string("title", 200).default("untitled");
//!     t.jsonb("meta").nullable();
//!     t.index(&["user_id"]);
//!     t.foreign("user_id").references("id").on("users").on_delete("CASCADE");
//!     t.timestamps();
//! })?;
//!
//! if !schema.has_column("posts", "slug")? {
//!     schema.table("posts", |t| {
//!         t.string("slug", 120).nullable();
//!     })?;
//! }
//! ```
//!
//! ## Crates
//!
//! - [`blueprint`]: columns, indexes, foreign keys and the builder API
//! - [`grammar`]: dialect renderers, options and the [`Schema`] facade
//! - [`routing`]: route / group / middleware composition

pub use schemata_blueprint as blueprint;
pub use schemata_grammar as grammar;
pub use schemata_routing as routing;

pub use schemata_blueprint::{Blueprint, ColumnBuilder, ForeignKeyBuilder, TableBuilder};
pub use schemata_core::{
    Connection, DefaultValue, DialectKind, ReferentialAction, ScalarValue, SchemaError,
    SchemaResult,
};
pub use schemata_grammar::{
    Grammar, MySql, MySqlBlueprint, MySqlOptions, Postgres, PostgresBlueprint, PostgresOptions,
    Schema,
};

/// Everything needed to define and run schema operations
pub mod prelude {
    pub use schemata_blueprint::TableBuilder;
    pub use schemata_core::{
        Connection, DefaultValue, ReferentialAction, ScalarValue, SchemaError, SchemaResult,
    };
    pub use schemata_grammar::{Grammar, MySql, Postgres, Schema};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
