//! Error types for the typed resource client.
//!
//! Provides structured error classification so callers (the effect
//! pipeline, the CLI) can branch on the failure kind without matching
//! every transport detail.

use thiserror::Error;

/// Errors that can occur while talking to a REST collection.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The addressed resource does not exist (HTTP 404)
    #[error("Resource not found: {url}")]
    NotFound { url: String },

    /// Payload rejected, either locally before sending or by the server (400/422)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Network-level failure (connect, reset, TLS)
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout
    #[error("Request to '{url}' timed out after {duration_ms}ms")]
    Timeout { url: String, duration_ms: u64 },

    /// Server answered with a non-2xx status not covered above
    #[error("Server returned {status} for '{url}': {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// Response body could not be decoded into the expected type
    #[error("Failed to decode response from '{url}': {message}")]
    Decode { url: String, message: String },

    /// Custom request with a method outside GET/POST/PUT/PATCH/DELETE
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Base URL or endpoint could not be joined into a valid URL
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Coarse failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Transport,
    Unsupported,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::NotFound { .. } => ErrorKind::NotFound,
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Transport { .. }
            | ClientError::Timeout { .. }
            | ClientError::Status { .. }
            | ClientError::Decode { .. } => ErrorKind::Transport,
            ClientError::UnsupportedMethod(_) | ClientError::InvalidUrl { .. } => {
                ErrorKind::Unsupported
            }
        }
    }

    /// Get error type string for logs and CLI output
    pub fn error_type(&self) -> &'static str {
        match self {
            ClientError::NotFound { .. } => "not_found",
            ClientError::Validation(_) => "validation_failure",
            ClientError::Transport { .. } => "transport_failure",
            ClientError::Timeout { .. } => "timeout",
            ClientError::Status { .. } => "upstream_status",
            ClientError::Decode { .. } => "decode_error",
            ClientError::UnsupportedMethod(_) => "unsupported_method",
            ClientError::InvalidUrl { .. } => "invalid_url",
        }
    }

    /// Only connection failures and timeouts are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Transport { .. } | ClientError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kind() {
        let err = ClientError::NotFound {
            url: "http://localhost/api/documents/1".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.error_type(), "not_found");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_status_is_transport_but_not_retryable() {
        let err = ClientError::Status {
            status: 503,
            url: "http://localhost/api/documents".to_string(),
            message: "unavailable".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_timeout_is_retryable() {
        let err = ClientError::Timeout {
            url: "http://localhost/api/documents".to_string(),
            duration_ms: 30_000,
        };
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("30000ms"));
    }

    #[test]
    fn test_unsupported_method_message() {
        let err = ClientError::UnsupportedMethod("TRACE".to_string());
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        assert_eq!(err.to_string(), "Unsupported HTTP method: TRACE");
    }
}
