//! # PostgreSQL Grammar
//!
//! Renders blueprints as PostgreSQL-family DDL with double-quoted
//! identifiers. Creating a table emits three groups of statements, in order:
//!
//! 1. `CREATE TABLE` with the column list only
//! 2. one `CREATE INDEX` per index fragment
//! 3. one `ALTER TABLE ... ADD FOREIGN KEY` per foreign key fragment
//!
//! Index statements are produced by rewriting the MySQL-shaped fragment
//! token by token, not from the structured index fields. Only the plain
//! `INDEX name (cols)` shape comes out as intended: `UNIQUE INDEX` and
//! `FULLTEXT INDEX` fragments keep their leading keyword misplaced, and
//! `PRIMARY KEY (cols)` passes through unchanged.

use schemata_blueprint::{Blueprint, Column, ColumnBuilder, TableBuilder};
use schemata_core::{DefaultValue, DialectKind};

use crate::grammar::Grammar;
use crate::options::PostgresOptions;

// ============================================================================
// PostgresBlueprint
// ============================================================================

/// Blueprint handed to PostgreSQL configuration closures
#[derive(Debug, Clone, PartialEq)]
pub struct PostgresBlueprint {
    inner: Blueprint,
}

impl PostgresBlueprint {
    /// Empty blueprint for `table`
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            inner: Blueprint::new(table),
        }
    }

    /// Auto-incrementing `SERIAL`, never `NOT NULL`
    pub fn serial(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "SERIAL")
    }

    /// Auto-incrementing `BIGSERIAL`, never `NOT NULL`
    pub fn big_serial(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "BIGSERIAL")
    }

    /// Binary `JSONB`
    pub fn jsonb(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "JSONB")
    }

    /// `<base>[]`
    pub fn array(&mut self, name: impl Into<String>, base_type: &str) -> ColumnBuilder<'_> {
        self.add_column(name, format!("{}[]", base_type))
    }

    /// Host address `INET`
    pub fn inet(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "INET")
    }

    /// Network address `CIDR`
    pub fn cidr(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "CIDR")
    }

    /// `MACADDR`
    pub fn mac_addr(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "MACADDR")
    }

    /// Full-text search document `TSVECTOR`
    pub fn ts_vector(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "TSVECTOR")
    }

    /// `XML`
    pub fn xml(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "XML")
    }

    /// `MONEY`
    pub fn money(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "MONEY")
    }

    /// Key/value `HSTORE`
    pub fn hstore(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "HSTORE")
    }

    /// Consume the wrapper
    pub fn into_inner(self) -> Blueprint {
        self.inner
    }
}

impl TableBuilder for PostgresBlueprint {
    fn blueprint(&self) -> &Blueprint {
        &self.inner
    }

    fn blueprint_mut(&mut self) -> &mut Blueprint {
        &mut self.inner
    }

    /// `BIGSERIAL PRIMARY KEY` named `id`
    fn id(&mut self) -> ColumnBuilder<'_> {
        self.add_column("id", "BIGSERIAL PRIMARY KEY")
    }

    /// Native `UUID`
    fn uuid(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "UUID")
    }

    /// No `ON UPDATE` clause: PostgreSQL has none
    fn timestamps(&mut self) {
        self.add_column("created_at", "TIMESTAMP DEFAULT CURRENT_TIMESTAMP");
        self.add_column("updated_at", "TIMESTAMP DEFAULT CURRENT_TIMESTAMP");
    }
}

// ============================================================================
// Postgres
// ============================================================================

/// PostgreSQL-family grammar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postgres {
    options: PostgresOptions,
}

impl Postgres {
    /// Create with the given options
    pub fn new(options: PostgresOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &PostgresOptions {
        &self.options
    }

    /// Default literal for `CREATE TABLE`
    ///
    /// Numbers stay bare; everything else, including `{...}` array and
    /// hstore literals, is wrapped in single quotes without escaping.
    pub fn format_default(value: &DefaultValue) -> String {
        if value.is_numeric() {
            value.to_string()
        } else {
            format!("'{}'", value)
        }
    }

    /// `"name" TYPE[ NOT NULL]`, serial types never get `NOT NULL`
    fn column_head(&self, column: &Column) -> String {
        let mut sql = format!("{} {}", self.quote(&column.name), column.sql_type);
        if !column.nullable && !column.is_serial() {
            sql.push_str(" NOT NULL");
        }
        sql
    }

    /// Rewrite an `INDEX name (cols)` fragment into `CREATE INDEX`
    pub fn index_statement(&self, table: &str, fragment: &str) -> String {
        let fragment = fragment.replace('`', "\"");

        if fragment.contains("INDEX") && !fragment.contains("CREATE") {
            let parts: Vec<&str> = fragment.split_whitespace().collect();
            if parts.len() >= 3 {
                return format!(
                    "CREATE INDEX {} ON {} {}",
                    parts[1],
                    self.quote(table),
                    parts[2..].join(" ")
                );
            }
        }

        fragment
    }

    /// `ALTER TABLE "t" ADD <constraint>`
    pub fn foreign_key_statement(&self, table: &str, fragment: &str) -> String {
        let fragment = fragment.replace('`', "\"");

        if fragment.contains("ALTER TABLE") {
            return fragment;
        }

        format!("ALTER TABLE {} ADD {}", self.quote(table), fragment)
    }
}

impl Grammar for Postgres {
    type Blueprint = PostgresBlueprint;

    fn kind(&self) -> DialectKind {
        DialectKind::PostgreSQL
    }

    fn blueprint(&self, table: &str) -> PostgresBlueprint {
        PostgresBlueprint::new(table)
    }

    fn compile_create(&self, blueprint: &Blueprint) -> Vec<String> {
        let table = blueprint.table();

        let columns: Vec<String> = blueprint
            .columns()
            .iter()
            .map(|column| {
                let mut sql = self.column_head(column);
                if let Some(default) = &column.default {
                    sql.push_str(&format!(" DEFAULT {}", Self::format_default(default)));
                }
                sql
            })
            .collect();

        let mut statements = vec![format!(
            "CREATE TABLE {} (\n  {}\n)",
            self.quote(table),
            columns.join(",\n  ")
        )];

        statements.extend(
            blueprint
                .indexes()
                .iter()
                .map(|index| self.index_statement(table, &index.fragment())),
        );

        statements.extend(
            blueprint
                .foreign_keys()
                .iter()
                .map(|fk| self.foreign_key_statement(table, &fk.fragment())),
        );

        tracing::trace!(table, statements = statements.len(), "compiled PostgreSQL create");
        statements
    }

    fn compile_alter(&self, blueprint: &Blueprint) -> Vec<String> {
        let table = self.quote(blueprint.table());
        let mut statements = Vec::new();

        for column in blueprint.columns() {
            let mut sql = self.column_head(column);
            if let Some(default) = &column.default {
                sql.push_str(&format!(" DEFAULT {}", default));
            }
            statements.push(format!("ALTER TABLE {} ADD COLUMN {}", table, sql));
        }

        for index in blueprint.indexes() {
            let fragment = index.fragment().replace('`', "\"");
            statements.push(format!("ALTER TABLE {} ADD {}", table, fragment));
        }

        tracing::trace!(
            table = blueprint.table(),
            statements = statements.len(),
            "compiled PostgreSQL alter"
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
        "SELECT EXISTS (SELECT FROM information_schema.tables WHERE table_schema = $1 AND table_name = $2)"
            .to_string()
    }

    fn has_column_query(&self) -> String {
        "SELECT EXISTS (SELECT FROM information_schema.columns WHERE table_schema = $1 AND table_name = $2 AND column_name = $3)"
            .to_string()
    }

    /// The configured schema is bound first
    fn has_table_params<'a>(&'a self, table: &'a str) -> Vec<&'a str> {
        vec![self.options.schema.as_str(), table]
    }

    fn has_column_params<'a>(&'a self, table: &'a str, column: &'a str) -> Vec<&'a str> {
        vec![self.options.schema.as_str(), table, column]
    }
}

// ============================================================================
// Tests
// ============================================================================
