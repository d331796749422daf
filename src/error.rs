//! Error types for the Argus panels
//!
//! Structured error definitions with thiserror; anyhow is used for
//! propagation at the binary's top level.

use thiserror::Error;

/// Main error type for Argus operations
#[derive(Error, Debug)]
pub enum ArgusError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Argus operations
pub type Result<T> = std::result::Result<T, ArgusError>;

impl From<toml::de::Error> for ArgusError {
    fn from(err: toml::de::Error) -> Self {
        ArgusError::Config(err.to_string())
    }
}

/// Convert anyhow::Error to ArgusError
impl From<anyhow::Error> for ArgusError {
    fn from(err: anyhow::Error) -> Self {
        ArgusError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArgusError::Config("max_events must be numeric".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: max_events must be numeric"
        );
    }

    #[test]
    fn test_serialization_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json");
        assert!(json_err.is_err());

        let err: ArgusError = json_err.unwrap_err().into();
        assert!(matches!(err, ArgusError::Serialization(_)));
    }
}
