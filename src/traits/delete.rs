//! Delete trait for removing records.

use async_trait::async_trait;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;

/// Delete (or archive, where Harvest decides so) a record.
///
/// The response is always returned raw.
#[async_trait]
pub trait Delete {
    async fn delete(client: &HarvestClient, id: u64) -> Result<HarvestResponse>;
}
