//! Dialect options
//!
//! Per-dialect knobs that end up in the generated SQL. Defaults reproduce
//! the stock output; options can also be loaded from JSON or TOML.

use schemata_core::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// MySqlOptions
// ============================================================================

/// Table options appended to MySQL `CREATE TABLE`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MySqlOptions {
    /// Storage engine
    pub engine: String,

    /// Default character set
    pub charset: String,

    /// Default collation
    pub collation: String,
}

impl Default for MySqlOptions {
    fn default() -> Self {
        Self {
            engine: "InnoDB".to_string(),
            charset: "utf8mb4".to_string(),
            collation: "utf8mb4_unicode_ci".to_string(),
        }
    }
}

impl MySqlOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage engine
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Set the character set
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Set the collation
    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = collation.into();
        self
    }

    /// Suffix for `CREATE TABLE (...)`
    pub fn table_suffix(&self) -> String {
        format!(
            "ENGINE={} DEFAULT CHARSET={} COLLATE={}",
            self.engine, self.charset, self.collation
        )
    }

    /// Load from a JSON document
    pub fn from_json_str(json: &str) -> SchemaResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load from a TOML document
    pub fn from_toml_str(source: &str) -> SchemaResult<Self> {
        let options: Self = toml::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> SchemaResult<()> {
        for (field, value) in [
            ("engine", &self.engine),
            ("charset", &self.charset),
            ("collation", &self.collation),
        ] {
            if value.trim().is_empty() {
                return Err(SchemaError::invalid_options(format!(
                    "MySQL {} cannot be empty",
                    field
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// PostgresOptions
// ============================================================================

/// PostgreSQL options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresOptions {
    /// Schema searched by the existence checks
    pub schema: String,
}

impl Default for PostgresOptions {
    fn default() -> Self {
        Self {
            schema: "public".to_string(),
        }
    }
}

impl PostgresOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the schema used by `has_table` / `has_column`
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Load from a JSON document
    pub fn from_json_str(json: &str) -> SchemaResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load from a TOML document
    pub fn from_toml_str(source: &str) -> SchemaResult<Self> {
        let options: Self = toml::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> SchemaResult<()> {
        if self.schema.trim().is_empty() {
            return Err(SchemaError::invalid_options("PostgreSQL schema cannot be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_defaults() {
        let options = MySqlOptions::default();
        assert_eq!(
            options.table_suffix(),
            "ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci"
        );
    }

    #[test]
    fn test_mysql_builder() {
        let options = MySqlOptions::new()
            .with_engine("MyISAM")
            .with_charset("latin1")
            .with_collation("latin1_swedish_ci");
        assert_eq!(
            options.table_suffix(),
            "ENGINE=MyISAM DEFAULT CHARSET=latin1 COLLATE=latin1_swedish_ci"
        );
    }

    #[test]
    fn test_mysql_from_toml_partial() {
        let options = MySqlOptions::from_toml_str("engine = \"Aria\"").unwrap();
        assert_eq!(options.engine, "Aria");
        assert_eq!(options.charset, "utf8mb4");
    }

    #[test]
    fn test_mysql_rejects_empty_engine() {
        let err = MySqlOptions::from_json_str(r#"{"engine": ""}"#).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Invalid options: MySQL engine cannot be empty");
    }

    #[test]
    fn test_postgres_options() {
        assert_eq!(PostgresOptions::default().schema, "public");
        let options = PostgresOptions::from_json_str(r#"{"schema": "tenant_a"}"#).unwrap();
        assert_eq!(options, PostgresOptions::new().with_schema("tenant_a"));
    }

    #[test]
    fn test_postgres_bad_toml() {
        let err = PostgresOptions::from_toml_str("schema = ").unwrap_err();
        assert!(matches!(err, SchemaError::Toml(_)));
    }
}
