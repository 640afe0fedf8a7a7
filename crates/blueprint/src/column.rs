//! Column definitions
//!
//! A [`Column`] is a plain value object. Its `sql_type` is an opaque literal
//! picked by the helper that created it; renderers copy it into the DDL
//! without interpreting it, apart from PostgreSQL's `SERIAL` check.

use schemata_core::DefaultValue;
use serde::{Deserialize, Serialize};

/// One column of a table blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Dialect-specific type literal (e.g. `VARCHAR(255)`, `SERIAL`)
    pub sql_type: String,

    /// Declared length, for helpers that take one
    pub length: Option<u32>,

    /// Whether NULL is allowed
    pub nullable: bool,

    /// Default value, interpolated into the DDL as given
    pub default: Option<DefaultValue>,

    /// Marked as primary key (recorded, not rendered)
    pub primary: bool,

    /// Marked as unique (recorded, not rendered)
    pub unique: bool,

    /// Column comment
    pub comment: Option<String>,

    /// Column to insert after on ALTER (MySQL only)
    pub after: Option<String>,
}

impl Column {
    /// Create a NOT NULL column with the given type literal
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            length: None,
            nullable: false,
            default: None,
            primary: false,
            unique: false,
            comment: None,
            after: None,
        }
    }

    /// Set the declared length
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Whether the type is one of PostgreSQL's auto-incrementing serials
    pub fn is_serial(&self) -> bool {
        self.sql_type.contains("SERIAL")
    }

    /// Whether a default value has been set
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_new() {
        let column = Column::new("email", "VARCHAR(255)");
        assert_eq!(column.name, "email");
        assert_eq!(column.sql_type, "VARCHAR(255)");
        assert!(!column.nullable);
        assert!(!column.has_default());
        assert!(column.comment.is_none());
        assert!(column.after.is_none());
    }

    #[test]
    fn test_column_length() {
        let column = Column::new("name", "VARCHAR(80)").with_length(80);
        assert_eq!(column.length, Some(80));
    }

    #[test]
    fn test_is_serial() {
        assert!(Column::new("id", "SERIAL").is_serial());
        assert!(Column::new("id", "BIGSERIAL PRIMARY KEY").is_serial());
        assert!(!Column::new("id", "BIGINT").is_serial());
    }
}
