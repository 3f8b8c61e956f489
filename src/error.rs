//! Error types for Taskdeck
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Taskdeck operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, document-store access, completion-service
/// calls, and user input validation.
#[derive(Error, Debug)]
pub enum TaskdeckError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document store errors (API calls, bad responses, etc.)
    #[error("Store error: {0}")]
    Store(String),

    /// Completion service errors (API calls, empty candidates, etc.)
    #[error("Completion error: {0}")]
    Completion(String),

    /// Missing credentials for a remote service
    #[error("Missing credentials for service: {0}")]
    MissingCredentials(String),

    /// Invalid user input (empty message, missing form fields)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Taskdeck operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = TaskdeckError::Config("missing endpoint".to_string());
        assert_eq!(error.to_string(), "Configuration error: missing endpoint");
    }

    #[test]
    fn test_store_error_display() {
        let error = TaskdeckError::Store("503 from server".to_string());
        assert_eq!(error.to_string(), "Store error: 503 from server");
    }

    #[test]
    fn test_completion_error_display() {
        let error = TaskdeckError::Completion("no candidates".to_string());
        assert_eq!(error.to_string(), "Completion error: no candidates");
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = TaskdeckError::MissingCredentials("gemini".to_string());
        assert_eq!(error.to_string(), "Missing credentials for service: gemini");
    }

    #[test]
    fn test_invalid_input_error_display() {
        let error = TaskdeckError::InvalidInput("title is required".to_string());
        assert_eq!(error.to_string(), "Invalid input: title is required");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: TaskdeckError = io_error.into();
        assert!(matches!(error, TaskdeckError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: TaskdeckError = json_error.into();
        assert!(matches!(error, TaskdeckError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: TaskdeckError = yaml_error.into();
        assert!(matches!(error, TaskdeckError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TaskdeckError>();
    }
}
