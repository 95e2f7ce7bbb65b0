//! Transport seam between the request helper and the network.

use crate::client::error::RequestError;
use crate::http::{HttpRequest, HttpResponse, StatusCode};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::collections::HashMap;
use tracing::trace;

/// Sends one wire request and returns the wire response.
///
/// Implementations must issue exactly one network exchange per call and
/// must not interpret the status code.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// Transport backed by a hyper client on the tokio runtime.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    max_body_size: usize,
}

impl HyperTransport {
    /// Create a transport that reads at most `max_body_size` response bytes.
    pub fn new(max_body_size: usize) -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self {
            client,
            max_body_size,
        }
    }
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("max_body_size", &self.max_body_size)
            .finish()
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let request = build_request(request)?;
        let response = self.client.request(request).await?;

        let status: StatusCode = response.status().into();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_string(), v.to_string());
            }
        }

        let body = Limited::new(response.into_body(), self.max_body_size)
            .collect()
            .await
            .map_err(|e| {
                if e.downcast_ref::<LengthLimitError>().is_some() {
                    RequestError::BodyTooLarge {
                        limit: self.max_body_size,
                    }
                } else {
                    RequestError::Network(e.to_string())
                }
            })?
            .to_bytes();

        trace!("Received {} bytes with status {}", body.len(), status);

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Build a hyper Request from an HttpRequest.
fn build_request(request: HttpRequest) -> Result<hyper::Request<Full<Bytes>>, RequestError> {
    let mut builder = hyper::Request::builder()
        .method(hyper::Method::from(request.method))
        .uri(&request.url);

    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let body = request.body.unwrap_or_default();
    builder
        .body(Full::new(body))
        .map_err(|e| RequestError::InvalidRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Method, JSON_CONTENT_TYPE};

    #[test]
    fn test_build_request_copies_method_headers_and_uri() {
        let request = HttpRequest::new(Method::Post, "http://localhost:9/api/items")
            .header("Content-Type", JSON_CONTENT_TYPE)
            .body(r#"{"name":"x"}"#);

        let built = build_request(request).unwrap();
        assert_eq!(built.method(), hyper::Method::POST);
        assert_eq!(built.uri().path(), "/api/items");
        assert_eq!(
            built.headers().get("content-type").unwrap(),
            JSON_CONTENT_TYPE
        );
    }

    #[test]
    fn test_build_request_rejects_bad_header() {
        let request =
            HttpRequest::new(Method::Get, "http://localhost:9/").header("Bad Header", "x");
        assert!(matches!(
            build_request(request),
            Err(RequestError::InvalidRequest(_))
        ));
    }
}
