//! Core types used throughout Schemata
//!
//! Value types shared by the blueprint model, the dialect renderers and the
//! connection seam.

use serde::{Deserialize, Serialize};

// ============================================================================
// Default Values
// ============================================================================

/// Typed scalar used as a column default
///
/// The value is interpolated into DDL as given. Text is never SQL-escaped,
/// so callers must not pass untrusted input here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Text value (also used for raw expressions such as `CURRENT_TIMESTAMP`)
    Text(String),
}

impl DefaultValue {
    /// Whether the value is a numeric literal
    pub fn is_numeric(&self) -> bool {
        matches!(self, DefaultValue::Int(_) | DefaultValue::Float(_))
    }

    /// Get the text payload, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DefaultValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Bool(v) => write!(f, "{}", v),
            DefaultValue::Int(v) => write!(f, "{}", v),
            DefaultValue::Float(v) => write!(f, "{}", v),
            DefaultValue::Text(v) => f.write_str(v),
        }
    }
}

macro_rules! default_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for DefaultValue {
                fn from(v: $ty) -> Self {
                    DefaultValue::Int(i64::from(v))
                }
            }
        )*
    };
}

default_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Values above `i64::MAX` saturate
macro_rules! default_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for DefaultValue {
                fn from(v: $ty) -> Self {
                    DefaultValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

default_from_wide_int!(u64, usize, isize);

impl From<f32> for DefaultValue {
    fn from(v: f32) -> Self {
        DefaultValue::Float(f64::from(v))
    }
}

impl From<f64> for DefaultValue {
    fn from(v: f64) -> Self {
        DefaultValue::Float(v)
    }
}

impl From<bool> for DefaultValue {
    fn from(v: bool) -> Self {
        DefaultValue::Bool(v)
    }
}

impl From<&str> for DefaultValue {
    fn from(v: &str) -> Self {
        DefaultValue::Text(v.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(v: String) -> Self {
        DefaultValue::Text(v)
    }
}

// ============================================================================
// Scalar Query Results
// ============================================================================

/// A single value scanned from a scalar query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl ScalarValue {
    /// Interpret the value as a boolean
    ///
    /// Integers are truthy when positive, which covers `COUNT(*)` style
    /// existence checks.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Bool(v) => Some(*v),
            ScalarValue::Int(v) => Some(*v > 0),
            ScalarValue::Text(s) => match s.as_str() {
                "t" | "true" | "1" => Some(true),
                "f" | "false" | "0" => Some(false),
                _ => None,
            },
            ScalarValue::Null => None,
        }
    }

    /// Interpret the value as an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Int(v) => Some(*v),
            ScalarValue::Bool(v) => Some(i64::from(*v)),
            ScalarValue::Text(s) => s.parse().ok(),
            ScalarValue::Null => None,
        }
    }
}

// ============================================================================
// Dialects
// ============================================================================

/// Supported SQL dialect families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    MySQL,
    PostgreSQL,
}

impl DialectKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DialectKind::MySQL => "MySQL",
            DialectKind::PostgreSQL => "PostgreSQL",
        }
    }

    /// Quote an identifier the way this dialect's DDL does
    pub fn quote_ident(&self, name: &str) -> String {
        match self {
            DialectKind::MySQL => format!("`{}`", name),
            DialectKind::PostgreSQL => format!("\"{}\"", name),
        }
    }

    /// Get all dialects
    pub fn all() -> &'static [DialectKind] {
        &[DialectKind::MySQL, DialectKind::PostgreSQL]
    }
}

impl std::fmt::Display for DialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Referential Actions
// ============================================================================

/// Actions for foreign key constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    Restrict,
    NoAction,
    SetDefault,
}

impl ReferentialAction {
    /// Get SQL keyword
    pub fn to_sql(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }
}

impl std::fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

impl From<ReferentialAction> for String {
    fn from(action: ReferentialAction) -> Self {
        action.to_sql().to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_value_display_is_raw() {
        assert_eq!(DefaultValue::from(0).to_string(), "0");
        assert_eq!(DefaultValue::from(1.5).to_string(), "1.5");
        assert_eq!(DefaultValue::from(true).to_string(), "true");
        assert_eq!(DefaultValue::from("draft").to_string(), "draft");
        assert_eq!(DefaultValue::from("it's").to_string(), "it's");
    }

    #[test]
    fn test_default_value_numeric() {
        assert!(DefaultValue::from(42u32).is_numeric());
        assert!(DefaultValue::from(2.0f32).is_numeric());
        assert!(!DefaultValue::from(false).is_numeric());
        assert!(!DefaultValue::from("{}").is_numeric());
    }

    #[test]
    fn test_default_value_from_wide_integers() {
        assert_eq!(DefaultValue::from(0usize), DefaultValue::Int(0));
        assert_eq!(DefaultValue::from(-3isize), DefaultValue::Int(-3));
        assert_eq!(DefaultValue::from(7u64), DefaultValue::Int(7));
        assert_eq!(DefaultValue::from(u64::MAX), DefaultValue::Int(i64::MAX));
    }

    #[test]
    fn test_default_value_deserialize_untagged() {
        let v: DefaultValue = serde_json::from_str("7").unwrap();
        assert_eq!(v, DefaultValue::Int(7));
        let v: DefaultValue = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(v, DefaultValue::Text("x".to_string()));
    }

    #[test]
    fn test_scalar_as_bool() {
        assert_eq!(ScalarValue::Int(0).as_bool(), Some(false));
        assert_eq!(ScalarValue::Int(3).as_bool(), Some(true));
        assert_eq!(ScalarValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ScalarValue::Text("t".into()).as_bool(), Some(true));
        assert_eq!(ScalarValue::Text("maybe".into()).as_bool(), None);
        assert_eq!(ScalarValue::Null.as_bool(), None);
    }

    #[test]
    fn test_scalar_as_i64() {
        assert_eq!(ScalarValue::Text("12".into()).as_i64(), Some(12));
        assert_eq!(ScalarValue::Bool(true).as_i64(), Some(1));
        assert_eq!(ScalarValue::Null.as_i64(), None);
    }

    #[test]
    fn test_dialect_quoting() {
        assert_eq!(DialectKind::MySQL.quote_ident("users"), "`users`");
        assert_eq!(DialectKind::PostgreSQL.quote_ident("users"), "\"users\"");
        assert_eq!(DialectKind::all().len(), 2);
    }

    #[test]
    fn test_referential_action_sql() {
        assert_eq!(ReferentialAction::Cascade.to_sql(), "CASCADE");
        assert_eq!(ReferentialAction::SetNull.to_sql(), "SET NULL");
        assert_eq!(String::from(ReferentialAction::NoAction), "NO ACTION");
    }
}
