//! The request helper and the pieces it is built from.

pub mod config;
pub mod error;
pub mod helper;
pub mod transport;

pub use config::HelperConfig;
pub use error::{RequestError, Result};
pub use helper::RequestHelper;
pub use transport::{HyperTransport, Transport};
