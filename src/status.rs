//! Harvest service status page.

use std::time::Duration;

use serde_json::{Map, Value};

/// Public status endpoint of the Harvest service.
pub const HARVEST_STATUS_URL: &str = "http://www.harveststatus.com/api/v2/status.json";

/// Current service status, or an empty object if it cannot be determined.
///
/// Uses its own unauthenticated client so account credentials never reach
/// the status site.
pub async fn status() -> Value {
    fetch_status(HARVEST_STATUS_URL).await
}

/// Fetch the `status` member of the document at `url`.
///
/// Every failure (transport, decoding, missing member) yields `{}`.
pub async fn fetch_status(url: &str) -> Value {
    let empty = || Value::Object(Map::new());

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            tracing::debug!(error = %e, "could not build status client");
            return empty();
        }
    };

    let document: Value = match client.get(url).send().await {
        Ok(response) => match response.json().await {
            Ok(document) => document,
            Err(e) => {
                tracing::debug!(error = %e, "status page is not JSON");
                return empty();
            }
        },
        Err(e) => {
            tracing::debug!(error = %e, "status page unreachable");
            return empty();
        }
    };

    document.get("status").cloned().unwrap_or_else(empty)
}
