//! Error types and handling for Painel
//!
//! This module defines the error types used throughout the application,
//! providing consistent error handling and reporting.

use thiserror::Error;

/// Result type alias for Painel operations
pub type Result<T> = std::result::Result<T, PainelError>;

/// Main error type for Painel
#[derive(Debug, Error)]
pub enum PainelError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Network-related errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// API integration errors (Home Assistant, Google Calendar)
    #[error("API error: {message}")]
    Api { message: String },

    /// Authentication/authorization errors
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Timeout errors
    #[error("Timeout error: {message}")]
    Timeout { message: String },

    /// Page rendering/output errors
    #[error("Render error: {message}")]
    Render { message: String },

    /// Generic errors with context
    #[error("Error: {message}")]
    Generic { message: String },
}

impl PainelError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        PainelError::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        PainelError::Network {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        PainelError::Api {
            message: message.into(),
        }
    }

    /// Create a new auth error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        PainelError::Auth {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        PainelError::Io {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        PainelError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        PainelError::Timeout {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render<S: Into<String>>(message: S) -> Self {
        PainelError::Render {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        PainelError::Generic {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for PainelError {
    fn from(err: std::io::Error) -> Self {
        PainelError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for PainelError {
    fn from(err: serde_yaml::Error) -> Self {
        PainelError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PainelError {
    fn from(err: serde_json::Error) -> Self {
        PainelError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for PainelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PainelError::timeout(err.to_string())
        } else {
            PainelError::network(err.to_string())
        }
    }
}

impl From<csv::Error> for PainelError {
    fn from(err: csv::Error) -> Self {
        PainelError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "agenda")]
impl From<jsonwebtoken::errors::Error> for PainelError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        PainelError::auth(err.to_string())
    }
}

impl From<chrono::ParseError> for PainelError {
    fn from(err: chrono::ParseError) -> Self {
        PainelError::validation("datetime", &err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PainelError::config("test config error");
        assert!(matches!(err, PainelError::Config { .. }));

        let err = PainelError::network("test network error");
        assert!(matches!(err, PainelError::Network { .. }));

        let err = PainelError::validation("field", "test validation error");
        assert!(matches!(err, PainelError::Validation { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = PainelError::config("test error");
        let error_string = format!("{}", err);
        assert_eq!(error_string, "Configuration error: test error");

        let err = PainelError::validation("test_field", "invalid value");
        let error_string = format!("{}", err);
        assert_eq!(error_string, "Validation error: test_field - invalid value");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PainelError = io_err.into();
        assert!(matches!(err, PainelError::Io { .. }));
    }
}
