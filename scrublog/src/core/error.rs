//! Error types for the logger.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Unknown level name at construction
    #[error("invalid log level: '{name}'")]
    InvalidLevel { name: String },

    /// IO error with context
    #[error("IO error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic emitter failure
    #[error("emitter error: {0}")]
    Emit(String),
}

impl LoggerError {
    /// Create an invalid-level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel { name: name.into() }
    }

    /// Create an IO error with operation context
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a generic emitter error
    pub fn emit<S: Into<String>>(message: S) -> Self {
        LoggerError::Emit(message.into())
    }
}
