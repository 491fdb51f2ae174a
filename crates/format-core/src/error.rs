//! Error types for the FormAT assistant.

use thiserror::Error;

/// Result type alias using the assistant's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for assistant operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// An upstream provider answered with something unusable
    #[error("Provider error: {0}")]
    Provider(String),

    /// Search operation failed
    #[error("Search error: {0}")]
    Search(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("knowledge entry".to_string());
        assert_eq!(err.to_string(), "Not found: knowledge entry");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("negative weight".to_string());
        assert_eq!(err.to_string(), "Invalid input: negative weight");
    }

    #[test]
    fn test_error_display_provider() {
        let err = Error::Provider("DeepL: missing translations".to_string());
        assert_eq!(err.to_string(), "Provider error: DeepL: missing translations");
    }

    #[test]
    fn test_error_display_search() {
        let err = Error::Search("status 503".to_string());
        assert_eq!(err.to_string(), "Search error: status 503");
    }

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("network unreachable".to_string());
        assert_eq!(err.to_string(), "Request error: network unreachable");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("bad interval".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad interval");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
