//! # fetchjson
//!
//! A small async helper that sends one HTTP request with a JSON body and
//! content type, parses the JSON reply, and hands it to a callback.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fetchjson::prelude::*;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), RequestError> {
//!     let helper = RequestHelper::new(HelperConfig::new().base_url("http://localhost:8080"));
//!
//!     helper
//!         .request(Method::Get, "/api/items", None, |items| {
//!             println!("items: {}", items);
//!         })
//!         .await?;
//!
//!     helper
//!         .request(Method::Post, "/api/items", Some(json!({"name": "x"})), |created| {
//!             println!("created: {}", created);
//!         })
//!         .await
//! }
//! ```
//!
//! ## Request contract
//!
//! - Every request carries `Content-Type: application/json;charset=UTF-8`.
//! - `POST`, `PUT` and `PATCH` send the payload as the JSON body; other
//!   methods ignore it.
//! - The success callback runs exactly once, and only for a 2xx reply whose
//!   body parses as JSON. An empty reply (or `204`, or `HEAD`) yields `null`.
//! - Network failures, non-2xx statuses and malformed bodies come back as
//!   [`RequestError`] variants.

pub mod client;
pub mod http;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::client::{HelperConfig, RequestError, RequestHelper, Transport};
    pub use crate::http::{JsonRequest, Method, StatusCode};
}

// Re-export for convenience
pub use client::{HelperConfig, HyperTransport, RequestError, RequestHelper, Transport};
pub use http::{HttpRequest, HttpResponse, JsonRequest, Method, StatusCode, JSON_CONTENT_TYPE};
