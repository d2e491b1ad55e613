use thiserror::Error;

/// Unified error type for release-gate operations
#[derive(Error, Debug)]
pub enum ReleaseGateError {
    #[error("'{0}' cannot be converted to mode")]
    InvalidMode(String),

    #[error("Input required and not supplied: {0}")]
    MissingInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Issue context error: {0}")]
    Context(String),

    #[error("GitHub API {operation} failed with status {status}: {body}")]
    Api {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-gate
pub type Result<T> = std::result::Result<T, ReleaseGateError>;

impl ReleaseGateError {
    /// Create a missing-input error for the named input
    pub fn missing_input(name: impl Into<String>) -> Self {
        ReleaseGateError::MissingInput(name.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseGateError::Config(msg.into())
    }

    /// Create an issue context error
    pub fn context(msg: impl Into<String>) -> Self {
        ReleaseGateError::Context(msg.into())
    }

    /// Create an API error from a failed response, truncating the body
    pub fn api(operation: impl Into<String>, status: u16, body: &str) -> Self {
        ReleaseGateError::Api {
            operation: operation.into(),
            status,
            body: truncate_for_error(body, 800),
        }
    }
}

fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_display() {
        let err = ReleaseGateError::InvalidMode("Skipped".to_string());
        assert_eq!(err.to_string(), "'Skipped' cannot be converted to mode");
    }

    #[test]
    fn test_missing_input_display() {
        let err = ReleaseGateError::missing_input("github-token");
        assert_eq!(
            err.to_string(),
            "Input required and not supplied: github-token"
        );
    }

    #[test]
    fn test_api_error_mentions_operation_and_status() {
        let err = ReleaseGateError::api("create issue comment", 403, "Resource not accessible");
        let msg = err.to_string();
        assert!(msg.contains("create issue comment"));
        assert!(msg.contains("403"));
        assert!(msg.contains("Resource not accessible"));
    }

    #[test]
    fn test_api_error_truncates_long_body() {
        let body = "x".repeat(2000);
        match ReleaseGateError::api("get issue", 500, &body) {
            ReleaseGateError::Api { body, .. } => {
                assert_eq!(body.chars().count(), 803);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseGateError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseGateError::config("x"), "Configuration error"),
            (ReleaseGateError::context("x"), "Issue context error"),
            (ReleaseGateError::missing_input("x"), "Input required"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
