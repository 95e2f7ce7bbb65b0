//! fetchjson - send one JSON request from the command line.
//!
//! ```text
//! fetchjson <METHOD> <URL> [JSON_PAYLOAD]
//! ```
//!
//! `FETCHJSON_BASE_URL` sets the origin for paths like `/api/items`, and
//! `FETCHJSON_TIMEOUT_MS` sets a request timeout.

use fetchjson::prelude::*;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: fetchjson <METHOD> <URL> [JSON_PAYLOAD]";

/// Build the helper configuration from the environment.
fn config_from_env() -> Result<HelperConfig, String> {
    let mut config = HelperConfig::new();

    if let Ok(base_url) = std::env::var("FETCHJSON_BASE_URL") {
        config = config.base_url(base_url);
    }

    if let Ok(timeout) = std::env::var("FETCHJSON_TIMEOUT_MS") {
        let millis: u64 = timeout
            .parse()
            .map_err(|e| format!("invalid FETCHJSON_TIMEOUT_MS '{}': {}", timeout, e))?;
        config = config.timeout(Duration::from_millis(millis));
    }

    Ok(config)
}

async fn run(args: Vec<String>) -> Result<(), String> {
    let (method, url, payload) = match args.as_slice() {
        [method, url] => (method, url, None),
        [method, url, payload] => (method, url, Some(payload)),
        _ => return Err(USAGE.to_string()),
    };

    let method: Method = method.parse().map_err(|e: RequestError| e.to_string())?;
    let payload = payload
        .map(|p| serde_json::from_str(p))
        .transpose()
        .map_err(|e| format!("invalid JSON payload: {}", e))?;

    let helper = RequestHelper::new(config_from_env()?);

    helper
        .request(method, url, payload, |value| {
            match serde_json::to_string_pretty(&value) {
                Ok(text) => println!("{}", text),
                Err(_) => println!("{}", value),
            }
        })
        .await
        .map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!("{}", message);
            ExitCode::FAILURE
        }
    }
}
