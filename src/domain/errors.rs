//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main linkout error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific failure classes and provides context for error handling.
#[derive(Debug, Error)]
pub enum LinkoutError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database-related errors (source repository or tracking store)
    #[error("Database error: {0}")]
    Database(String),

    /// Resource-file generation errors
    #[error("XML error: {0}")]
    Xml(String),

    /// FTP delivery errors
    #[error("FTP error: {0}")]
    Ftp(String),

    /// Notification email errors
    #[error("Notification error: {0}")]
    Notification(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for LinkoutError {
    fn from(err: std::io::Error) -> Self {
        LinkoutError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LinkoutError {
    fn from(err: serde_json::Error) -> Self {
        LinkoutError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LinkoutError {
    fn from(err: toml::de::Error) -> Self {
        LinkoutError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linkout_error_display() {
        let err = LinkoutError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_every_variant_displays_its_class() {
        let cases = [
            (
                LinkoutError::Configuration("x".to_string()),
                "Configuration error: x",
            ),
            (LinkoutError::Database("x".to_string()), "Database error: x"),
            (LinkoutError::Xml("x".to_string()), "XML error: x"),
            (LinkoutError::Ftp("x".to_string()), "FTP error: x"),
            (
                LinkoutError::Notification("x".to_string()),
                "Notification error: x",
            ),
            (
                LinkoutError::Serialization("x".to_string()),
                "Serialization error: x",
            ),
            (LinkoutError::Io("x".to_string()), "I/O error: x"),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: LinkoutError = io_err.into();
        assert!(matches!(err, LinkoutError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: LinkoutError = toml_err.into();
        assert!(matches!(err, LinkoutError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_linkout_error_implements_std_error() {
        let err = LinkoutError::Ftp("login failed".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
