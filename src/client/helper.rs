//! The request helper: one JSON request in, one parsed JSON value out.

use crate::client::config::HelperConfig;
use crate::client::error::{RequestError, Result};
use crate::client::transport::{HyperTransport, Transport};
use crate::http::{HttpRequest, HttpResponse, JsonRequest, Method, JSON_CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Headers the helper always sets itself.
const FIXED_HEADERS: [&str; 3] = ["content-type", "accept", "user-agent"];

/// Issues single JSON requests and delivers the parsed reply.
///
/// Every operation sends exactly one request. A success continuation runs
/// exactly once, and only when the server answered 2xx with a decodable
/// body; every other outcome is reported as a [`RequestError`].
///
/// Cloning is cheap and clones share the underlying transport.
pub struct RequestHelper<T: Transport = HyperTransport> {
    config: Arc<HelperConfig>,
    transport: Arc<T>,
}

impl<T: Transport> Clone for RequestHelper<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: self.transport.clone(),
        }
    }
}

impl RequestHelper {
    /// Create a helper that talks to the network through hyper.
    pub fn new(config: HelperConfig) -> Self {
        let transport = HyperTransport::new(config.max_body_size);
        Self::with_transport(config, transport)
    }

    /// Create a helper with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(HelperConfig::default())
    }
}

impl<T: Transport> RequestHelper<T> {
    /// Create a helper on top of a custom transport.
    pub fn with_transport(config: HelperConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    /// Get the helper configuration.
    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    /// Get the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `method url` with an optional JSON payload and pass the parsed
    /// response to `on_success`.
    ///
    /// `on_success` is not called when an error is returned.
    pub async fn request<F>(
        &self,
        method: Method,
        url: &str,
        payload: Option<Value>,
        on_success: F,
    ) -> Result<()>
    where
        F: FnOnce(Value),
    {
        let value = self.fetch(build_request(method, url, payload)).await?;
        on_success(value);
        Ok(())
    }

    /// Like [`request`](Self::request), but reports failures to `on_error`.
    ///
    /// Exactly one of the two callbacks runs.
    pub async fn request_with<F, E>(
        &self,
        method: Method,
        url: &str,
        payload: Option<Value>,
        on_success: F,
        on_error: E,
    ) where
        F: FnOnce(Value),
        E: FnOnce(RequestError),
    {
        match self.fetch(build_request(method, url, payload)).await {
            Ok(value) => on_success(value),
            Err(err) => on_error(err),
        }
    }

    /// GET `url` and pass the parsed response to `on_success`.
    pub async fn get<F>(&self, url: &str, on_success: F) -> Result<()>
    where
        F: FnOnce(Value),
    {
        self.request(Method::Get, url, None, on_success).await
    }

    /// POST `payload` to `url` and pass the parsed response to `on_success`.
    pub async fn post<F>(&self, url: &str, payload: Value, on_success: F) -> Result<()>
    where
        F: FnOnce(Value),
    {
        self.request(Method::Post, url, Some(payload), on_success)
            .await
    }

    /// Send a request and deserialize the response into `R`.
    pub async fn fetch<R: DeserializeOwned>(&self, request: JsonRequest) -> Result<R> {
        let method = request.method;
        let http_request = self.prepare(&request)?;
        let url = http_request.url.clone();

        debug!("Sending {} {}", method, url);

        let response = match self.send(http_request).await {
            Ok(response) => response,
            Err(err) => {
                error!("{} {} failed: {}", method, url, err);
                return Err(err);
            }
        };

        let content_type = response.content_type().map(str::to_string);
        debug!(
            "{} {} -> {} ({})",
            method,
            url,
            response.status,
            content_type.as_deref().unwrap_or("no content type")
        );

        self.decode(method, response).map_err(|err| {
            warn!(
                "{} {} rejected: {} [content-type: {}]",
                method,
                url,
                err,
                content_type.as_deref().unwrap_or("none")
            );
            err
        })
    }

    /// Turn a JSON request into the wire request for the transport.
    fn prepare(&self, request: &JsonRequest) -> Result<HttpRequest> {
        let url = self.config.resolve_url(&request.url)?;

        if request.payload.is_some() && !request.method.carries_body() {
            debug!("Ignoring payload for {} {}", request.method, url);
        }
        let body = request.encode_body()?;

        let mut http_request = HttpRequest::new(request.method, url);
        for (name, value) in &self.config.headers {
            if FIXED_HEADERS.iter().any(|h| name.eq_ignore_ascii_case(h)) {
                continue;
            }
            http_request = http_request.header(name.clone(), value.clone());
        }
        http_request = http_request
            .header("Content-Type", JSON_CONTENT_TYPE)
            .header("Accept", "application/json")
            .header("User-Agent", self.config.user_agent.clone());

        if let Some(body) = body {
            http_request = http_request.body(body);
        }
        Ok(http_request)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.transport.send(request))
                .await
                .map_err(|_| RequestError::Timeout(limit))?,
            None => self.transport.send(request).await,
        }
    }

    fn decode<R: DeserializeOwned>(&self, method: Method, response: HttpResponse) -> Result<R> {
        if response.body.len() > self.config.max_body_size {
            return Err(RequestError::BodyTooLarge {
                limit: self.config.max_body_size,
            });
        }

        if !response.status.is_success() {
            return Err(RequestError::HttpStatus {
                status: response.status,
                body: response.text_body(),
            });
        }

        if method == Method::Head || response.is_empty() {
            return serde_json::from_value(Value::Null).map_err(RequestError::Decode);
        }

        serde_json::from_slice(&response.body).map_err(RequestError::Decode)
    }
}

impl<T: Transport + 'static> RequestHelper<T> {
    /// Start a request on the tokio runtime without waiting for it.
    ///
    /// `on_success` runs later, once, if the request succeeds. Concurrent
    /// spawned requests complete in no particular order.
    pub fn spawn_request<F>(
        &self,
        method: Method,
        url: impl Into<String>,
        payload: Option<Value>,
        on_success: F,
    ) -> JoinHandle<Result<()>>
    where
        F: FnOnce(Value) + Send + 'static,
    {
        let helper = self.clone();
        let url = url.into();
        tokio::spawn(async move { helper.request(method, &url, payload, on_success).await })
    }
}

fn build_request(method: Method, url: &str, payload: Option<Value>) -> JsonRequest {
    let request = JsonRequest::new(method, url);
    match payload {
        Some(payload) => request.payload(payload),
        None => request,
    }
}
