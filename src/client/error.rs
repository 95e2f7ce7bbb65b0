//! Error types for the request helper.

use crate::http::{Method, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Everything that can stop a request from reaching its success callback.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Transport or connection failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    /// The response body is not valid JSON for the requested type.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The payload could not be serialized.
    #[error("Failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be assembled, e.g. a malformed header.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A body-carrying method was called without a payload.
    #[error("{0} requires a payload")]
    MissingPayload(Method),

    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl RequestError {
    /// Whether the request failed before any response was received.
    pub fn is_network(&self) -> bool {
        matches!(self, RequestError::Network(_) | RequestError::Timeout(_))
    }

    /// HTTP status of a non-2xx response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<hyper::Error> for RequestError {
    fn from(err: hyper::Error) -> Self {
        RequestError::Network(err.to_string())
    }
}

impl From<hyper_util::client::legacy::Error> for RequestError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        // The legacy client wraps the interesting cause one level down.
        match std::error::Error::source(&err) {
            Some(source) => RequestError::Network(format!("{}: {}", err, source)),
            None => RequestError::Network(err.to_string()),
        }
    }
}

/// Result type alias for request helper operations.
pub type Result<T> = std::result::Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = RequestError::HttpStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "HTTP status 500: boom");
    }

    #[test]
    fn test_network_classification() {
        assert!(RequestError::Network("refused".into()).is_network());
        assert!(RequestError::Timeout(Duration::from_millis(5)).is_network());
        assert!(!RequestError::InvalidUrl(String::new()).is_network());
        assert_eq!(RequestError::Network("refused".into()).status(), None);
    }

    #[test]
    fn test_missing_payload_message() {
        assert_eq!(
            RequestError::MissingPayload(Method::Post).to_string(),
            "POST requires a payload"
        );
    }
}
