//! # Schema Operations
//!
//! [`Schema`] pairs a database handle with a grammar and runs the rendered
//! statements in order.
//!
//! ## Pipeline
//!
//! ```text
//! table name + configure closure
//!         │
//!         ▼
//!   Grammar::build()          → dialect blueprint
//!         │
//!         ▼
//!   compile_create / alter    → Vec<String>
//!         │
//!         ▼
//!   Connection::execute()     (stops at the first failure)
//! ```
//!
//! Statements already executed before a failure are not rolled back.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemata_grammar::Schema;
//! use schemata_blueprint::TableBuilder;
//!
//! let mut schema = Schema::mysql(connection);
//! schema.create("users", |t| {
//!     t.id();
//!     t.string("email", 255).unique();
//!     t.timestamps();
//! })?;
//! ```

use schemata_blueprint::TableBuilder;
use schemata_core::{Connection, ScalarValue, SchemaError, SchemaResult};

use crate::grammar::Grammar;
use crate::mysql::MySql;
use crate::postgres::Postgres;

// ============================================================================
// Schema
// ============================================================================

/// Schema operations bound to one connection and one dialect
#[derive(Debug)]
pub struct Schema<C, G> {
    connection: C,
    grammar: G,
}

impl<C: Connection> Schema<C, MySql> {
    /// MySQL facade with default table options
    pub fn mysql(connection: C) -> Self {
        Self::new(connection, MySql::default())
    }
}

impl<C: Connection> Schema<C, Postgres> {
    /// PostgreSQL facade searching the `public` schema
    pub fn postgres(connection: C) -> Self {
        Self::new(connection, Postgres::default())
    }
}

impl<C: Connection, G: Grammar> Schema<C, G> {
    /// Facade over any connection and grammar
    pub fn new(connection: C, grammar: G) -> Self {
        Self {
            connection,
            grammar,
        }
    }

    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    /// Give back the connection and grammar
    pub fn into_inner(self) -> (C, G) {
        (self.connection, self.grammar)
    }

    /// Create `table` from the blueprint populated by `configure`
    pub fn create<F>(&mut self, table: &str, configure: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut G::Blueprint),
    {
        let blueprint = self.grammar.build(table, configure);
        let statements = self.grammar.compile_create(blueprint.blueprint());
        self.run("create", table, &statements)
    }

    /// Add the configured columns and indexes to an existing `table`
    ///
    /// Foreign keys registered in `configure` are discarded.
    pub fn table<F>(&mut self, table: &str, configure: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut G::Blueprint),
    {
        let blueprint = self.grammar.build(table, configure);
        let statements = self.grammar.compile_alter(blueprint.blueprint());
        self.run("alter", table, &statements)
    }

    pub fn drop(&mut self, table: &str) -> SchemaResult<()> {
        let sql = self.grammar.compile_drop(table);
        self.run("drop", table, &[sql])
    }

    pub fn drop_if_exists(&mut self, table: &str) -> SchemaResult<()> {
        let sql = self.grammar.compile_drop_if_exists(table);
        self.run("drop_if_exists", table, &[sql])
    }

    pub fn has_table(&mut self, table: &str) -> SchemaResult<bool> {
        let sql = self.grammar.has_table_query();
        let params = self.grammar.has_table_params(table);
        exists(&mut self.connection, &sql, &params)
    }

    pub fn has_column(&mut self, table: &str, column: &str) -> SchemaResult<bool> {
        let sql = self.grammar.has_column_query();
        let params = self.grammar.has_column_params(table, column);
        exists(&mut self.connection, &sql, &params)
    }

    fn run(&mut self, operation: &str, table: &str, statements: &[String]) -> SchemaResult<()> {
        tracing::info!(
            dialect = self.grammar.kind().display_name(),
            operation,
            table,
            statements = statements.len(),
            "running schema operation"
        );

        for (position, sql) in statements.iter().enumerate() {
            tracing::debug!(position, sql = sql.as_str(), "executing");

            if let Err(err) = self.connection.execute(sql) {
                tracing::warn!(operation, table, position, error = %err, "statement failed");
                return Err(SchemaError::execution(err));
            }
        }

        Ok(())
    }
}

fn exists<C: Connection>(connection: &mut C, sql: &str, params: &[&str]) -> SchemaResult<bool> {
    tracing::debug!(sql, ?params, "existence check");

    let value = connection
        .query_scalar(sql, params)
        .map_err(SchemaError::execution)?;

    match value.as_bool() {
        Some(found) => Ok(found),
        None => Err(unexpected_scalar(sql, &value)),
    }
}

fn unexpected_scalar(sql: &str, value: &ScalarValue) -> SchemaError {
    SchemaError::UnexpectedScalar {
        query: sql.to_string(),
        found: format!("{:?}", value),
    }
}

// ============================================================================
// Tests
// ============================================================================
