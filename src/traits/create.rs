//! Create trait for adding records.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;

/// Create a record from a JSON document.
///
/// The document is sent as-is, e.g. `{"client": {"name": "Acme"}}`.
#[async_trait]
pub trait Create {
    async fn create(client: &HarvestClient, body: &Value) -> Result<HarvestResponse>;
}
