//! Error types for the flatmap server client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the map server
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Check if a retry of the same request may succeed
    ///
    /// Transport-level failures (except request-construction errors) and 5xx
    /// responses are transient. 4xx responses and malformed bodies are not:
    /// the same request would fail the same way again.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(e) => !e.is_builder(),
            Self::ApiError { status, .. } => *status >= 500,
            Self::ParseError(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_transient() {
        assert!(ClientError::api_error(500, "boom").is_transient());
        assert!(ClientError::api_error(503, "busy").is_transient());
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        assert!(!ClientError::api_error(400, "bad request").is_transient());
        assert!(!ClientError::api_error(404, "no such job").is_transient());
        assert!(!ClientError::api_error(401, "bad token").is_transient());
    }

    #[test]
    fn test_parse_errors_are_not_transient() {
        assert!(!ClientError::ParseError("not json".to_string()).is_transient());
    }

    #[test]
    fn test_request_build_errors_are_not_transient() {
        let err = reqwest::Client::new().get("not a url").build().unwrap_err();
        assert!(err.is_builder());
        assert!(!ClientError::RequestFailed(err).is_transient());
    }

    #[test]
    fn test_status_class_predicates() {
        assert!(ClientError::api_error(404, "gone").is_client_error());
        assert!(!ClientError::api_error(404, "gone").is_server_error());
        assert!(ClientError::api_error(502, "bad gateway").is_server_error());
        assert!(!ClientError::api_error(502, "bad gateway").is_client_error());
    }
}
