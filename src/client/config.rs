//! Request helper configuration.

use crate::client::error::RequestError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::{ParseError, Url};

/// Configuration for the request helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    /// Origin that paths such as `/api/items` are resolved against.
    pub base_url: Option<String>,
    /// Upper bound for a whole request/response exchange.
    pub timeout: Option<Duration>,
    /// Maximum response body size in bytes.
    pub max_body_size: usize,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Extra headers sent with every request.
    pub headers: HashMap<String, String>,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: None,
            max_body_size: 10 * 1024 * 1024, // 10MB
            user_agent: format!("fetchjson/{}", env!("CARGO_PKG_VERSION")),
            headers: HashMap::new(),
        }
    }
}

impl HelperConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum response body size.
    pub fn max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a header sent with every request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Turn a caller-supplied URL into an absolute `http://` URL.
    ///
    /// Absolute URLs pass through. Anything else is resolved against
    /// `base_url` with the same rules a browser applies to a page's links.
    pub fn resolve_url(&self, url: &str) -> Result<String, RequestError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(RequestError::InvalidUrl("URL is empty".to_string()));
        }

        let resolved = match Url::parse(url) {
            Ok(absolute) => absolute,
            Err(ParseError::RelativeUrlWithoutBase) => {
                let base = self.base_url.as_deref().ok_or_else(|| {
                    RequestError::InvalidUrl(format!("relative URL '{}' without a base URL", url))
                })?;
                let base = Url::parse(base).map_err(|e| {
                    RequestError::InvalidUrl(format!("base URL '{}': {}", base, e))
                })?;
                base.join(url)
                    .map_err(|e| RequestError::InvalidUrl(format!("{}: {}", url, e)))?
            }
            Err(e) => return Err(RequestError::InvalidUrl(format!("{}: {}", url, e))),
        };

        if resolved.scheme() != "http" {
            return Err(RequestError::InvalidUrl(format!(
                "{}: only http:// is supported",
                resolved
            )));
        }
        if resolved.host().is_none() {
            return Err(RequestError::InvalidUrl(format!("{}: missing host", resolved)));
        }

        Ok(resolved.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HelperConfig::new();
        assert_eq!(config.base_url, None);
        assert_eq!(config.timeout, None);
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
        assert!(config.user_agent.starts_with("fetchjson/"));
    }

    #[test]
    fn test_resolve_absolute_url() {
        let config = HelperConfig::new();
        assert_eq!(
            config.resolve_url("http://localhost:8080/api/items").unwrap(),
            "http://localhost:8080/api/items"
        );
    }

    #[test]
    fn test_resolve_path_against_base() {
        let config = HelperConfig::new().base_url("http://localhost:8080/");
        assert_eq!(
            config.resolve_url("/api/items").unwrap(),
            "http://localhost:8080/api/items"
        );
        assert_eq!(
            config.resolve_url("api/items?page=2").unwrap(),
            "http://localhost:8080/api/items?page=2"
        );
    }

    #[test]
    fn test_resolve_rejects_bad_urls() {
        let config = HelperConfig::new();
        assert!(matches!(config.resolve_url("   "), Err(RequestError::InvalidUrl(_))));
        assert!(matches!(config.resolve_url("/api/items"), Err(RequestError::InvalidUrl(_))));
        assert!(matches!(
            config.resolve_url("https://example.com/"),
            Err(RequestError::InvalidUrl(_))
        ));
        assert!(matches!(
            config.resolve_url("ftp://example.com/file"),
            Err(RequestError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_resolve_query_containing_scheme_stays_relative() {
        let config = HelperConfig::new().base_url("http://api.local");
        assert_eq!(
            config.resolve_url("/login?next=http://api.local/home").unwrap(),
            "http://api.local/login?next=http://api.local/home"
        );
    }

    #[test]
    fn test_resolve_protocol_relative_url_replaces_host() {
        let config = HelperConfig::new().base_url("http://api.local");
        assert_eq!(
            config.resolve_url("//other.host/x").unwrap(),
            "http://other.host/x"
        );
    }

    #[test]
    fn test_resolve_against_base_with_path() {
        let config = HelperConfig::new().base_url("http://api.local/app/");
        assert_eq!(
            config.resolve_url("/api/items").unwrap(),
            "http://api.local/api/items"
        );
        assert_eq!(
            config.resolve_url("items").unwrap(),
            "http://api.local/app/items"
        );

        let config = HelperConfig::new().base_url("http://api.local/app");
        assert_eq!(
            config.resolve_url("/api/items").unwrap(),
            "http://api.local/api/items"
        );
    }

    #[test]
    fn test_resolve_rejects_bad_base_url() {
        let config = HelperConfig::new().base_url("not a url");
        assert!(matches!(config.resolve_url("/api/items"), Err(RequestError::InvalidUrl(_))));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: HelperConfig =
            serde_json::from_str(r#"{"base_url": "http://api.local", "max_body_size": 1024}"#)
                .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://api.local"));
        assert_eq!(config.max_body_size, 1024);
        assert_eq!(config.timeout, None);
    }
}
