//! # MySQL Grammar
//!
//! Renders blueprints as MySQL-family DDL with backtick-quoted identifiers.
//!
//! - `CREATE TABLE` is a single statement: columns, then index fragments,
//!   then foreign key fragments, followed by the engine / charset / collation
//!   suffix from [`MySqlOptions`].
//! - Altering emits one `ALTER TABLE ... ADD COLUMN` per column and one
//!   `ALTER TABLE ... ADD <index>` per index. Foreign keys registered on an
//!   alter blueprint are not emitted.
//! - Defaults are interpolated raw (`DEFAULT draft`, not `DEFAULT 'draft'`);
//!   string defaults that need quoting must be passed pre-quoted.

use schemata_blueprint::{Blueprint, Column, ColumnBuilder, TableBuilder};
use schemata_core::DialectKind;

use crate::grammar::Grammar;
use crate::options::MySqlOptions;

// ============================================================================
// MySqlBlueprint
// ============================================================================

/// Blueprint handed to MySQL configuration closures
#[derive(Debug, Clone, PartialEq)]
pub struct MySqlBlueprint {
    inner: Blueprint,
}

impl MySqlBlueprint {
    /// Empty blueprint for `table`
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            inner: Blueprint::new(table),
        }
    }

    /// `ENUM('a', 'b')`
    pub fn enumeration<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        values: &[S],
    ) -> ColumnBuilder<'_> {
        self.add_column(name, format!("ENUM({})", quote_values(values)))
    }

    /// `SET('a', 'b')`
    pub fn set<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        values: &[S],
    ) -> ColumnBuilder<'_> {
        self.add_column(name, format!("SET({})", quote_values(values)))
    }

    /// Spatial `POINT`
    pub fn point(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "POINT")
    }

    /// Spatial `GEOMETRY`
    pub fn geometry(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "GEOMETRY")
    }

    /// Consume the wrapper
    pub fn into_inner(self) -> Blueprint {
        self.inner
    }
}

impl TableBuilder for MySqlBlueprint {
    fn blueprint(&self) -> &Blueprint {
        &self.inner
    }

    fn blueprint_mut(&mut self) -> &mut Blueprint {
        &mut self.inner
    }
}

fn quote_values<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// MySql
// ============================================================================

/// MySQL-family grammar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MySql {
    options: MySqlOptions,
}

impl MySql {
    /// Create with the given options
    pub fn new(options: MySqlOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &MySqlOptions {
        &self.options
    }

    /// `` `name` TYPE[ NOT NULL][ DEFAULT v] ``
    fn column_definition(&self, column: &Column) -> String {
        let mut sql = format!("{} {}", self.quote(&column.name), column.sql_type);

        if !column.nullable {
            sql.push_str(" NOT NULL");
        }

        if let Some(default) = &column.default {
            sql.push_str(&format!(" DEFAULT {}", default));
        }

        sql
    }
}

impl Grammar for MySql {
    type Blueprint = MySqlBlueprint;

    fn kind(&self) -> DialectKind {
        DialectKind::MySQL
    }

    fn blueprint(&self, table: &str) -> MySqlBlueprint {
        MySqlBlueprint::new(table)
    }

    fn compile_create(&self, blueprint: &Blueprint) -> Vec<String> {
        let mut parts = Vec::new();

        for column in blueprint.columns() {
            let mut sql = self.column_definition(column);
            if let Some(comment) = &column.comment {
                sql.push_str(&format!(" COMMENT '{}'", comment));
            }
            parts.push(sql);
        }

        parts.extend(blueprint.indexes().iter().map(|index| index.fragment()));
        parts.extend(blueprint.foreign_keys().iter().map(|fk| fk.fragment()));

        let sql = format!(
            "CREATE TABLE {} (\n  {}\n) {}",
            self.quote(blueprint.table()),
            parts.join(",\n  "),
            self.options.table_suffix()
        );

        tracing::trace!(table = blueprint.table(), "compiled MySQL create");
        vec![sql]
    }

    fn compile_alter(&self, blueprint: &Blueprint) -> Vec<String> {
        let table = self.quote(blueprint.table());
        let mut statements = Vec::new();

        for column in blueprint.columns() {
            let mut sql = self.column_definition(column);
            if let Some(after) = &column.after {
                sql.push_str(&format!(" AFTER {}", self.quote(after)));
            }
            statements.push(format!("ALTER TABLE {} ADD COLUMN {}", table, sql));
        }

        for index in blueprint.indexes() {
            statements.push(format!("ALTER TABLE {} ADD {}", table, index.fragment()));
        }

        tracing::trace!(
            table = blueprint.table(),
            statements = statements.len(),
            "compiled MySQL alter"
        );
        statements
    }

    fn compile_drop(&self, table: &str) -> String {
        format!("DROP TABLE {}", self.quote(table))
    }

    fn compile_drop_if_exists(&self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS {}", self.quote(table))
    }

    fn has_table_query(&self) -> String {
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = DATABASE() AND table_name = ?"
            .to_string()
    }

    fn has_column_query(&self) -> String {
        "SELECT COUNT(*) FROM information_schema.columns WHERE table_schema = DATABASE() AND table_name = ? AND column_name = ?"
            .to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
