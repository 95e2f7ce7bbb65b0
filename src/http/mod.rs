//! HTTP types: supported methods, the JSON request model, and the wire
//! request/response exchanged with a transport.

mod request;
mod response;

pub use request::{HttpRequest, JsonRequest, Method, JSON_CONTENT_TYPE};
pub use response::{HttpResponse, StatusCode};
