//! Table blueprints
//!
//! A [`Blueprint`] accumulates the columns, indexes and foreign keys of one
//! table during a single schema operation. The fluent helpers live on the
//! [`TableBuilder`] trait so each dialect can expose them on its own
//! blueprint type, overriding the handful whose type literal differs.

use schemata_core::SchemaResult;
use serde::{Deserialize, Serialize};

use crate::builder::{ColumnBuilder, ForeignKeyBuilder};
use crate::column::Column;
use crate::index::{ForeignKeyDefinition, IndexDefinition, IndexKind};

// ============================================================================
// Blueprint
// ============================================================================

/// Dialect-neutral description of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    table: String,
    columns: Vec<Column>,
    indexes: Vec<IndexDefinition>,
    foreign_keys: Vec<ForeignKeyDefinition>,
}

impl Blueprint {
    /// Create an empty blueprint for `table`
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Columns in declaration order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Indexes in registration order
    pub fn indexes(&self) -> &[IndexDefinition] {
        &self.indexes
    }

    /// Materialized foreign keys in registration order
    pub fn foreign_keys(&self) -> &[ForeignKeyDefinition] {
        &self.foreign_keys
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether nothing has been declared
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.indexes.is_empty() && self.foreign_keys.is_empty()
    }

    /// Pretty JSON snapshot, for previews and debugging
    pub fn to_json(&self) -> SchemaResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    pub(crate) fn push_column(&mut self, column: Column) -> usize {
        self.columns.push(column);
        self.columns.len() - 1
    }

    pub(crate) fn column_at_mut(&mut self, index: usize) -> &mut Column {
        &mut self.columns[index]
    }

    pub(crate) fn column_at(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    pub(crate) fn push_index<S: AsRef<str>>(&mut self, kind: IndexKind, columns: &[S]) {
        self.indexes.push(IndexDefinition::new(kind, columns));
    }

    pub(crate) fn push_foreign_key(&mut self, foreign_key: ForeignKeyDefinition) {
        self.foreign_keys.push(foreign_key);
    }
}

// ============================================================================
// TableBuilder
// ============================================================================

/// Fluent column and index helpers shared by every dialect blueprint
///
/// Implementors only provide access to their inner [`Blueprint`]. The
/// default type literals are the MySQL-family ones; a dialect overrides the
/// helpers whose literal differs (`id`, `uuid`, `timestamps`).
pub trait TableBuilder {
    /// Borrow the underlying blueprint
    fn blueprint(&self) -> &Blueprint;

    /// Mutably borrow the underlying blueprint
    fn blueprint_mut(&mut self) -> &mut Blueprint;

    /// Append a column with a raw type literal
    fn add_column(
        &mut self,
        name: impl Into<String>,
        sql_type: impl Into<String>,
    ) -> ColumnBuilder<'_> {
        ColumnBuilder::push(self.blueprint_mut(), Column::new(name, sql_type))
    }

    /// Auto-incrementing `id` primary key
    fn id(&mut self) -> ColumnBuilder<'_> {
        self.add_column("id", "BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY")
    }

    /// `VARCHAR(length)`
    fn string(&mut self, name: impl Into<String>, length: u32) -> ColumnBuilder<'_> {
        let column = Column::new(name, format!("VARCHAR({})", length)).with_length(length);
        ColumnBuilder::push(self.blueprint_mut(), column)
    }

    /// `TEXT`
    fn text(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "TEXT")
    }

    /// `INT`
    fn integer(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "INT")
    }

    /// `BIGINT`
    fn big_integer(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "BIGINT")
    }

    /// `FLOAT`
    fn float(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "FLOAT")
    }

    /// `DOUBLE`
    fn double(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "DOUBLE")
    }

    /// `DECIMAL(precision,scale)`
    fn decimal(&mut self, name: impl Into<String>, precision: u32, scale: u32) -> ColumnBuilder<'_> {
        self.add_column(name, format!("DECIMAL({},{})", precision, scale))
    }

    /// `BOOLEAN`
    fn boolean(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "BOOLEAN")
    }

    /// `DATE`
    fn date(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "DATE")
    }

    /// `DATETIME`
    fn date_time(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "DATETIME")
    }

    /// `TIMESTAMP` without a default
    fn timestamp(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "TIMESTAMP")
    }

    /// `JSON`
    fn json(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "JSON")
    }

    /// `BINARY`
    fn binary(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "BINARY")
    }

    /// UUID stored as `CHAR(36)`
    fn uuid(&mut self, name: impl Into<String>) -> ColumnBuilder<'_> {
        self.add_column(name, "CHAR(36)")
    }

    /// `created_at` and `updated_at`, the latter refreshed on update
    fn timestamps(&mut self) {
        self.add_column("created_at", "TIMESTAMP DEFAULT CURRENT_TIMESTAMP");
        self.add_column(
            "updated_at",
            "TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP",
        );
    }

    /// Plain index named `<cols>_index`
    fn index<S: AsRef<str>>(&mut self, columns: &[S]) {
        self.blueprint_mut().push_index(IndexKind::Index, columns);
    }

    /// Unique index named `<cols>_unique`
    fn unique_index<S: AsRef<str>>(&mut self, columns: &[S]) {
        self.blueprint_mut().push_index(IndexKind::Unique, columns);
    }

    /// Composite primary key
    fn primary<S: AsRef<str>>(&mut self, columns: &[S]) {
        self.blueprint_mut().push_index(IndexKind::Primary, columns);
    }

    /// Full-text index named `<cols>_fulltext`
    fn full_text_index<S: AsRef<str>>(&mut self, columns: &[S]) {
        self.blueprint_mut().push_index(IndexKind::FullText, columns);
    }

    /// Start a foreign key on `column`
    fn foreign(&mut self, column: impl Into<String>) -> ForeignKeyBuilder<'_> {
        ForeignKeyBuilder::new(self.blueprint_mut(), column)
    }
}

impl TableBuilder for Blueprint {
    fn blueprint(&self) -> &Blueprint {
        self
    }

    fn blueprint_mut(&mut self) -> &mut Blueprint {
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
