//! Error types for Schemata
//!
//! Builder misuse is never validated locally: a malformed blueprint only
//! surfaces when the database rejects the generated DDL. The variants here
//! cover what the library itself can observe: a failing statement, an
//! unexpected scalar from an existence query, routing registration misuse and
//! unparsable dialect options.

use thiserror::Error;

/// Boxed error produced by a database handle
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for Schemata
#[derive(Debug, Error)]
pub enum SchemaError {
    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// A statement failed against the connection. The handle's own error is
    /// passed through untouched.
    #[error(transparent)]
    Execution(BoxError),

    /// An existence query produced a value of the wrong shape
    #[error("Unexpected scalar from '{query}': {found}")]
    UnexpectedScalar { query: String, found: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Registration misuse (e.g. a middleware passed where only routes fit)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Dialect options could not be parsed
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl SchemaError {
    /// Wrap a connection error
    pub fn execution<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SchemaError::Execution(Box::new(err))
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        SchemaError::Configuration(msg.into())
    }

    /// Create an invalid options error
    pub fn invalid_options(msg: impl Into<String>) -> Self {
        SchemaError::InvalidOptions(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        SchemaError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error came from the database handle
    pub fn is_execution(&self) -> bool {
        matches!(self, SchemaError::Execution(_))
    }

    /// Check if this error is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SchemaError::Configuration(_)
                | SchemaError::InvalidOptions(_)
                | SchemaError::Json(_)
                | SchemaError::Toml(_)
        )
    }

    /// Borrow the connection error, if this is an execution failure
    pub fn execution_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            SchemaError::Execution(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// Result type alias using SchemaError
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> SchemaResult<T>;
}

impl<T, E: Into<SchemaError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> SchemaResult<T> {
        self.map_err(|e| {
            let err: SchemaError = e.into();
            SchemaError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
