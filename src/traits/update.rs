//! Update trait for modifying records.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;

/// Update an existing record.
///
/// # Example
///
/// ```ignore
/// use harvestapi::{HarvestClient, Tasks, Update};
/// use serde_json::json;
///
/// let client = HarvestClient::with_basic("https://acme.harvestapp.com", "me@acme.com", "pw")?;
/// Tasks::update(&client, 7, &json!({"task": {"name": "Design"}})).await?;
/// ```
#[async_trait]
pub trait Update {
    /// Send `body` as the new state of record `id`.
    async fn update(client: &HarvestClient, id: u64, body: &Value) -> Result<HarvestResponse>;
}
