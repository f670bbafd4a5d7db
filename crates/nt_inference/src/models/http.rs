use std::time::Duration;

use nt_core::{Error, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Check the status of a capability response and decode its JSON body.
///
/// A non-success status becomes [`Error::Upstream`] carrying the body text so
/// the caller sees what the service said. A body that does not match `T`
/// becomes [`Error::Decode`].
pub async fn read_json<T: DeserializeOwned>(service: &str, response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::Upstream {
            service: service.to_string(),
            status: status.as_u16(),
            message: upstream_message(&body),
        });
    }

    parse_json(service, &body)
}

pub fn parse_json<T: DeserializeOwned>(service: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::decode(service, e))
}

// Hosted inference APIs wrap failures as {"error": "..."}; unwrap that when present.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
