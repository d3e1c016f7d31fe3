//! Domain error types
//!
//! This module defines the error hierarchy for unidb. Validation problems on a
//! [`DatabaseConfig`](crate::config::DatabaseConfig) are not errors: they are
//! returned as a list by `validate()`. Everything here is fatal to the call
//! that produced it.

use thiserror::Error;

/// Main unidb error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum UnidbError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Adapter registry errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Adapter registry errors
///
/// Every variant carries the (normalized) engine type the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No adapter is registered for the engine type and the fallback hook
    /// was either disabled or failed
    #[error("Database type '{engine_type}' not supported{}", reason_suffix(.reason))]
    UnsupportedEngine {
        engine_type: String,
        reason: Option<String>,
    },

    /// A constructor was offered that does not produce conforming adapters
    #[error("Adapter for '{engine_type}' violates the adapter contract: {reason}")]
    TypeConstraint { engine_type: String, reason: String },
}

impl RegistryError {
    /// Creates an unsupported-engine error without a fallback reason
    pub fn unsupported(engine_type: impl Into<String>) -> Self {
        Self::UnsupportedEngine {
            engine_type: engine_type.into(),
            reason: None,
        }
    }

    /// Creates a type-constraint error
    pub fn type_constraint(engine_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TypeConstraint {
            engine_type: engine_type.into(),
            reason: reason.into(),
        }
    }

    /// Returns the engine type the error refers to
    pub fn engine_type(&self) -> &str {
        match self {
            Self::UnsupportedEngine { engine_type, .. } => engine_type,
            Self::TypeConstraint { engine_type, .. } => engine_type,
        }
    }
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(" (fallback failed: {reason})"),
        None => String::new(),
    }
}

/// Errors raised by an adapter synthesizer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// The synthesizer has no implementation for this engine
    #[error("adapter synthesis for '{0}' is not implemented")]
    NotImplemented(String),

    /// The synthesizer ran but could not produce an adapter
    #[error("adapter synthesis for '{engine_type}' failed: {message}")]
    Failed {
        engine_type: String,
        message: String,
    },
}

// Conversion from std::io::Error
impl From<std::io::Error> for UnidbError {
    fn from(err: std::io::Error) -> Self {
        UnidbError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for UnidbError {
    fn from(err: serde_json::Error) -> Self {
        UnidbError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for UnidbError {
    fn from(err: toml::de::Error) -> Self {
        UnidbError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unidb_error_display() {
        let err = UnidbError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_unsupported_engine_display() {
        let err = RegistryError::unsupported("oracle");
        assert_eq!(err.to_string(), "Database type 'oracle' not supported");
        assert_eq!(err.engine_type(), "oracle");
    }

    #[test]
    fn test_unsupported_engine_with_reason() {
        let err = RegistryError::UnsupportedEngine {
            engine_type: "oracle".to_string(),
            reason: Some("adapter synthesis for 'oracle' is not implemented".to_string()),
        };
        let message = err.to_string();
        assert!(message.starts_with("Database type 'oracle' not supported"));
        assert!(message.contains("fallback failed"));
        assert!(message.contains("not implemented"));
    }

    #[test]
    fn test_type_constraint_display() {
        let err = RegistryError::type_constraint("custom", "health check mismatch");
        assert!(err.to_string().contains("'custom'"));
        assert!(err.to_string().contains("health check mismatch"));
        assert_eq!(err.engine_type(), "custom");
    }

    #[test]
    fn test_registry_error_conversion() {
        let unidb_err: UnidbError = RegistryError::unsupported("oracle").into();
        assert!(matches!(unidb_err, UnidbError::Registry(_)));
        assert!(unidb_err.to_string().contains("oracle"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let unidb_err: UnidbError = io_err.into();
        assert!(matches!(unidb_err, UnidbError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let unidb_err: UnidbError = json_err.into();
        assert!(matches!(unidb_err, UnidbError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let unidb_err: UnidbError = toml_err.into();
        assert!(matches!(unidb_err, UnidbError::Configuration(_)));
        assert!(unidb_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_synthesis_error_display() {
        let err = SynthesisError::NotImplemented("cassandra".to_string());
        assert_eq!(
            err.to_string(),
            "adapter synthesis for 'cassandra' is not implemented"
        );
    }
}
