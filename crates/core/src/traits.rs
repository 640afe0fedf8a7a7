//! Core traits for Schemata
//!
//! The database handle is an external collaborator. Anything that can run a
//! DDL statement and a parameterized scalar query can drive a schema
//! operation by implementing [`Connection`].

use crate::types::ScalarValue;

// ============================================================================
// Connection Trait
// ============================================================================

/// A database handle capable of executing DDL and scalar queries
///
/// Implementations report failures through their own error type; the schema
/// facade forwards those errors without rewording them.
///
/// # Example
///
/// ```rust,ignore
/// use schemata_core::{Connection, ScalarValue};
///
/// struct Log(Vec<String>);
///
/// impl Connection for Log {
///     type Error = std::io::Error;
///
///     fn execute(&mut self, sql: &str) -> Result<(), Self::Error> {
///         self.0.push(sql.to_string());
///         Ok(())
///     }
///
///     fn query_scalar(&mut self, _sql: &str, _params: &[&str]) -> Result<ScalarValue, Self::Error> {
///         Ok(ScalarValue::Int(0))
///     }
/// }
/// ```
pub trait Connection {
    /// Error reported by the handle
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute a single statement
    fn execute(&mut self, sql: &str) -> Result<(), Self::Error>;

    /// Run a parameterized query returning one scalar
    ///
    /// Placeholders follow the dialect (`?` for MySQL, `$n` for PostgreSQL).
    fn query_scalar(&mut self, sql: &str, params: &[&str]) -> Result<ScalarValue, Self::Error>;
}

impl<C: Connection + ?Sized> Connection for &mut C {
    type Error = C::Error;

    fn execute(&mut self, sql: &str) -> Result<(), Self::Error> {
        (**self).execute(sql)
    }

    fn query_scalar(&mut self, sql: &str, params: &[&str]) -> Result<ScalarValue, Self::Error> {
        (**self).query_scalar(sql, params)
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    type Error = C::Error;

    fn execute(&mut self, sql: &str) -> Result<(), Self::Error> {
        (**self).execute(sql)
    }

    fn query_scalar(&mut self, sql: &str, params: &[&str]) -> Result<ScalarValue, Self::Error> {
        (**self).query_scalar(sql, params)
    }
}

// ============================================================================
// postgres::Client adapter
// ============================================================================

#[cfg(feature = "postgres")]
mod pg {
    use super::Connection;
    use crate::types::ScalarValue;
    use postgres::types::{ToSql, Type};

    impl Connection for postgres::Client {
        type Error = postgres::Error;

        fn execute(&mut self, sql: &str) -> Result<(), Self::Error> {
            self.batch_execute(sql)
        }

        fn query_scalar(&mut self, sql: &str, params: &[&str]) -> Result<ScalarValue, Self::Error> {
            let params: Vec<&(dyn ToSql + Sync)> =
                params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
            let row = self.query_one(sql, &params)?;

            let column_type = row.columns()[0].type_().clone();
            let value = if column_type == Type::BOOL {
                row.try_get::<_, Option<bool>>(0)?.map(ScalarValue::Bool)
            } else if column_type == Type::INT8 {
                row.try_get::<_, Option<i64>>(0)?.map(ScalarValue::Int)
            } else if column_type == Type::INT4 {
                row.try_get::<_, Option<i32>>(0)?
                    .map(|v| ScalarValue::Int(i64::from(v)))
            } else {
                row.try_get::<_, Option<String>>(0)?.map(ScalarValue::Text)
            };

            Ok(value.unwrap_or(ScalarValue::Null))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
