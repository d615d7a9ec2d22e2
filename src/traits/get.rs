//! Get trait for fetching single records.

use async_trait::async_trait;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;

/// Fetch a single record by id.
///
/// # Example
///
/// ```ignore
/// use harvestapi::{Clients, Get, HarvestClient};
///
/// let client = HarvestClient::with_basic("https://acme.harvestapp.com", "me@acme.com", "pw")?;
/// let record = Clients::get(&client, 42).await?;
/// ```
#[async_trait]
pub trait Get {
    /// Fetch the record.
    ///
    /// # Errors
    ///
    /// Returns an error only if the request cannot be sent or read.
    async fn get(client: &HarvestClient, id: u64) -> Result<HarvestResponse>;
}
