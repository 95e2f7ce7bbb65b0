//! Wire-level HTTP response returned by a transport.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const NO_CONTENT: StatusCode = StatusCode(204);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    /// Check if the status code indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// Check if the status code indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// Check if the status code indicates a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::OK
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl From<hyper::StatusCode> for StatusCode {
    fn from(code: hyper::StatusCode) -> Self {
        StatusCode(code.as_u16())
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// HTTP response as received from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// HTTP headers.
    pub headers: HashMap<String, String>,
    /// Response body, empty when the server sent none.
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a new HttpResponse with the given status code.
    pub fn new(status: impl Into<StatusCode>) -> Self {
        Self {
            status: status.into(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Create a 200 response carrying the given JSON text.
    pub fn json_text(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::OK)
            .header("Content-Type", "application/json")
            .body(body)
    }

    /// Add a header to the response.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Whether the response has no content to decode.
    pub fn is_empty(&self) -> bool {
        self.status == StatusCode::NO_CONTENT || self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Get the `Content-Type` header, ignoring ASCII case in the name.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Get the body as text.
    pub fn text_body(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_helpers() {
        assert!(StatusCode::OK.is_success());
        assert!(StatusCode::NO_CONTENT.is_success());
        assert!(!StatusCode(304).is_success());
        assert!(StatusCode::NOT_FOUND.is_client_error());
        assert!(StatusCode::INTERNAL_SERVER_ERROR.is_server_error());
        assert!(!StatusCode::OK.is_server_error());
    }

    #[test]
    fn test_empty_detection() {
        assert!(HttpResponse::new(StatusCode::OK).is_empty());
        assert!(HttpResponse::new(StatusCode::OK).body("  \n").is_empty());
        assert!(HttpResponse::new(StatusCode::NO_CONTENT).body("{}").is_empty());
        assert!(!HttpResponse::json_text("{}").is_empty());
    }

    #[test]
    fn test_content_type_lookup() {
        let response = HttpResponse::new(StatusCode::OK).header("content-type", "text/html");
        assert_eq!(response.content_type(), Some("text/html"));
        assert_eq!(HttpResponse::json_text("{}").content_type(), Some("application/json"));
        assert_eq!(HttpResponse::new(StatusCode::NO_CONTENT).content_type(), None);
    }
}
