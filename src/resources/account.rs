//! Account endpoints.

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;

/// Describe the authenticated user and their company.
#[tracing::instrument(skip(client))]
pub async fn who_am_i(client: &HarvestClient) -> Result<HarvestResponse> {
    client.get("account/who_am_i").await
}
