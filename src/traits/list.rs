//! List trait for fetching collections.

use async_trait::async_trait;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;

/// List a collection, optionally filtered.
///
/// # Example
///
/// ```ignore
/// use harvestapi::{HarvestClient, List, Projects, ProjectListQuery};
///
/// let client = HarvestClient::with_basic("https://acme.harvestapp.com", "me@acme.com", "pw")?;
/// let all = Projects::list(&client, &Default::default()).await?;
/// let for_client = Projects::list(&client, &ProjectListQuery::for_client(23445)).await?;
/// ```
#[async_trait]
pub trait List {
    /// Filters accepted by the collection endpoint.
    type Query: Default + Send + Sync;

    /// List records matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if a request cannot be sent or read.
    async fn list(client: &HarvestClient, query: &Self::Query) -> Result<HarvestResponse>;
}
