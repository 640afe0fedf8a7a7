//! Index and constraint definitions
//!
//! Indexes and foreign keys carry their structured fields but are consumed by
//! the renderers as text fragments in MySQL shape (`INDEX name (cols)`,
//! `FOREIGN KEY (col) REFERENCES t (c)`). PostgreSQL rewrites those fragments
//! rather than rebuilding them from the fields.

use serde::{Deserialize, Serialize};

// ============================================================================
// Indexes
// ============================================================================

/// Kind of table index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Index,
    Unique,
    Primary,
    FullText,
}

impl IndexKind {
    /// Suffix appended to the joined column names; `None` for primary keys,
    /// which are not named
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            IndexKind::Index => Some("_index"),
            IndexKind::Unique => Some("_unique"),
            IndexKind::Primary => None,
            IndexKind::FullText => Some("_fulltext"),
        }
    }

    /// Leading keyword(s) of the fragment
    pub fn keyword(&self) -> &'static str {
        match self {
            IndexKind::Index => "INDEX",
            IndexKind::Unique => "UNIQUE INDEX",
            IndexKind::Primary => "PRIMARY KEY",
            IndexKind::FullText => "FULLTEXT INDEX",
        }
    }
}

/// An index over one or more columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    pub kind: IndexKind,
    pub name: Option<String>,
    pub columns: Vec<String>,
}

impl IndexDefinition {
    /// Build an index, deriving its name from the columns
    pub fn new<S: AsRef<str>>(kind: IndexKind, columns: &[S]) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let name = kind.suffix().map(|suffix| format!("{}{}", columns.join("_"), suffix));

        Self {
            kind,
            name,
            columns,
        }
    }

    /// The MySQL-shaped text fragment
    pub fn fragment(&self) -> String {
        let columns = self.columns.join(", ");
        match &self.name {
            Some(name) => format!("{} {} ({})", self.kind.keyword(), name, columns),
            None => format!("{} ({})", self.kind.keyword(), columns),
        }
    }
}

impl std::fmt::Display for IndexDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fragment())
    }
}

// ============================================================================
// Foreign Keys
// ============================================================================

/// A complete foreign key constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDefinition {
    pub local_column: String,
    pub foreign_table: String,
    pub foreign_column: String,
    pub on_delete: Option<String>,
    pub on_update: Option<String>,
}

impl ForeignKeyDefinition {
    /// The constraint text fragment
    pub fn fragment(&self) -> String {
        let mut parts = vec![
            format!("FOREIGN KEY ({})", self.local_column),
            format!("REFERENCES {} ({})", self.foreign_table, self.foreign_column),
        ];

        if let Some(action) = &self.on_delete {
            parts.push(format!("ON DELETE {}", action));
        }

        if let Some(action) = &self.on_update {
            parts.push(format!("ON UPDATE {}", action));
        }

        parts.join(" ")
    }
}

impl std::fmt::Display for ForeignKeyDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fragment())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_names() {
        assert_eq!(
            IndexDefinition::new(IndexKind::Index, &["a", "b"]).name.as_deref(),
            Some("a_b_index")
        );
        assert_eq!(
            IndexDefinition::new(IndexKind::Unique, &["a"]).name.as_deref(),
            Some("a_unique")
        );
        assert_eq!(
            IndexDefinition::new(IndexKind::FullText, &["body"]).name.as_deref(),
            Some("body_fulltext")
        );
        assert!(IndexDefinition::new(IndexKind::Primary, &["id"]).name.is_none());
    }

    #[test]
    fn test_index_fragments() {
        assert_eq!(
            IndexDefinition::new(IndexKind::Index, &["a", "b"]).fragment(),
            "INDEX a_b_index (a, b)"
        );
        assert_eq!(
            IndexDefinition::new(IndexKind::Unique, &["email"]).fragment(),
            "UNIQUE INDEX email_unique (email)"
        );
        assert_eq!(
            IndexDefinition::new(IndexKind::Primary, &["a", "b"]).fragment(),
            "PRIMARY KEY (a, b)"
        );
        assert_eq!(
            IndexDefinition::new(IndexKind::FullText, &["title", "body"]).to_string(),
            "FULLTEXT INDEX title_body_fulltext (title, body)"
        );
    }

    #[test]
    fn test_foreign_key_fragment() {
        let mut fk = ForeignKeyDefinition {
            local_column: "user_id".to_string(),
            foreign_table: "users".to_string(),
            foreign_column: "id".to_string(),
            on_delete: None,
            on_update: None,
        };
        assert_eq!(fk.fragment(), "FOREIGN KEY (user_id) REFERENCES users (id)");

        fk.on_delete = Some("CASCADE".to_string());
        fk.on_update = Some("SET NULL".to_string());
        assert_eq!(
            fk.to_string(),
            "FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE ON UPDATE SET NULL"
        );
    }
}
