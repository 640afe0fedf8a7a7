//! Grammar trait
//!
//! A grammar turns a populated blueprint into DDL for one dialect. Each
//! grammar names the blueprint type its configuration closures receive, so
//! dialect-only helpers are checked at compile time.

use schemata_blueprint::{Blueprint, TableBuilder};
use schemata_core::DialectKind;

/// DDL renderer for one SQL dialect
pub trait Grammar {
    /// Blueprint handed to configuration closures
    type Blueprint: TableBuilder;

    /// Dialect family
    fn kind(&self) -> DialectKind;

    /// Fresh, empty blueprint for `table`
    fn blueprint(&self, table: &str) -> Self::Blueprint;

    /// Statements creating the table, in execution order
    fn compile_create(&self, blueprint: &Blueprint) -> Vec<String>;

    /// Statements adding columns and indexes to an existing table
    ///
    /// Foreign keys are never emitted here.
    fn compile_alter(&self, blueprint: &Blueprint) -> Vec<String>;

    fn compile_drop(&self, table: &str) -> String;

    fn compile_drop_if_exists(&self, table: &str) -> String;

    /// Parameterized query bound with [`has_table_params`](Self::has_table_params)
    fn has_table_query(&self) -> String;

    /// Parameterized query bound with [`has_column_params`](Self::has_column_params)
    fn has_column_query(&self) -> String;

    /// Bind values for the table existence query
    fn has_table_params<'a>(&'a self, table: &'a str) -> Vec<&'a str> {
        vec![table]
    }

    /// Bind values for the column existence query
    fn has_column_params<'a>(&'a self, table: &'a str, column: &'a str) -> Vec<&'a str> {
        vec![table, column]
    }

    /// Quote an identifier
    fn quote(&self, name: &str) -> String {
        self.kind().quote_ident(name)
    }

    /// Build a blueprint by running `configure` against an empty one
    fn build<F>(&self, table: &str, configure: F) -> Self::Blueprint
    where
        F: FnOnce(&mut Self::Blueprint),
    {
        let mut blueprint = self.blueprint(table);
        configure(&mut blueprint);
        blueprint
    }

    /// Render the CREATE statements without executing them
    fn preview_create<F>(&self, table: &str, configure: F) -> Vec<String>
    where
        F: FnOnce(&mut Self::Blueprint),
    {
        let blueprint = self.build(table, configure);
        self.compile_create(blueprint.blueprint())
    }

    /// Render the ALTER statements without executing them
    fn preview_alter<F>(&self, table: &str, configure: F) -> Vec<String>
    where
        F: FnOnce(&mut Self::Blueprint),
    {
        let blueprint = self.build(table, configure);
        self.compile_alter(blueprint.blueprint())
    }
}
