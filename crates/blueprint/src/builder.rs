//! Chainable handles returned by the blueprint helpers
//!
//! Handles hold the owning blueprint by mutable borrow and address their
//! column by position, so modifiers can be chained in any order and the
//! blueprint itself stays movable once the handle is dropped.

use schemata_core::DefaultValue;

use crate::blueprint::Blueprint;
use crate::column::Column;
use crate::index::{ForeignKeyDefinition, IndexKind};

// ============================================================================
// ColumnBuilder
// ============================================================================

/// Modifier handle bound to one column of a blueprint
#[derive(Debug)]
pub struct ColumnBuilder<'a> {
    blueprint: &'a mut Blueprint,
    position: usize,
}

impl<'a> ColumnBuilder<'a> {
    pub(crate) fn push(blueprint: &'a mut Blueprint, column: Column) -> Self {
        let position = blueprint.push_column(column);
        Self {
            blueprint,
            position,
        }
    }

    /// The column as currently configured
    pub fn column(&self) -> &Column {
        self.blueprint.column_at(self.position)
    }

    fn column_mut(&mut self) -> &mut Column {
        self.blueprint.column_at_mut(self.position)
    }

    /// Allow NULL
    pub fn nullable(mut self) -> Self {
        self.column_mut().nullable = true;
        self
    }

    /// Disallow NULL (the initial state)
    pub fn not_nullable(mut self) -> Self {
        self.column_mut().nullable = false;
        self
    }

    /// Set the default value
    ///
    /// The value is not checked against the column type.
    pub fn default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.column_mut().default = Some(value.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.column_mut().unique = true;
        self
    }

    pub fn primary(mut self) -> Self {
        self.column_mut().primary = true;
        self
    }

    /// An empty comment clears it
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.column_mut().comment = non_empty(text);
        self
    }

    /// Place the column after another one when altering a MySQL table
    ///
    /// An empty name clears the placement.
    pub fn after(mut self, column: impl Into<String>) -> Self {
        self.column_mut().after = non_empty(column);
        self
    }

    /// Register a single-column index right away
    pub fn index(self) -> Self {
        let name = self.column().name.clone();
        self.blueprint
            .push_index(IndexKind::Index, std::slice::from_ref(&name));
        self
    }
}

// ============================================================================
// ForeignKeyBuilder
// ============================================================================

/// Incrementally configured foreign key
///
/// Nothing reaches the blueprint until both the referenced table and column
/// are known. From then on every call to [`on`](Self::on),
/// [`on_delete`](Self::on_delete) or [`on_update`](Self::on_update) appends a
/// full copy of the constraint; earlier copies are left in place.
/// [`references`](Self::references) never materializes on its own. Empty
/// strings count as unset throughout.
#[derive(Debug)]
pub struct ForeignKeyBuilder<'a> {
    blueprint: &'a mut Blueprint,
    local_column: String,
    foreign_table: Option<String>,
    foreign_column: Option<String>,
    on_delete: Option<String>,
    on_update: Option<String>,
}

impl<'a> ForeignKeyBuilder<'a> {
    pub(crate) fn new(blueprint: &'a mut Blueprint, local_column: impl Into<String>) -> Self {
        Self {
            blueprint,
            local_column: local_column.into(),
            foreign_table: None,
            foreign_column: None,
            on_delete: None,
            on_update: None,
        }
    }

    /// Referenced column
    pub fn references(mut self, column: impl Into<String>) -> Self {
        self.foreign_column = non_empty(column);
        self
    }

    /// Referenced table
    pub fn on(mut self, table: impl Into<String>) -> Self {
        self.foreign_table = non_empty(table);
        self.materialize();
        self
    }

    pub fn on_delete(mut self, action: impl Into<String>) -> Self {
        self.on_delete = non_empty(action);
        self.materialize();
        self
    }

    pub fn on_update(mut self, action: impl Into<String>) -> Self {
        self.on_update = non_empty(action);
        self.materialize();
        self
    }

    /// The constraint as it would be materialized now, if complete
    pub fn definition(&self) -> Option<ForeignKeyDefinition> {
        let (Some(table), Some(column)) = (&self.foreign_table, &self.foreign_column) else {
            return None;
        };

        Some(ForeignKeyDefinition {
            local_column: self.local_column.clone(),
            foreign_table: table.clone(),
            foreign_column: column.clone(),
            on_delete: self.on_delete.clone(),
            on_update: self.on_update.clone(),
        })
    }

    fn materialize(&mut self) {
        if let Some(definition) = self.definition() {
            self.blueprint.push_foreign_key(definition);
        }
    }
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.is_empty()).then_some(value)
}

// ============================================================================
// Tests
// ============================================================================
