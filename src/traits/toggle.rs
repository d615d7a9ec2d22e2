//! Toggle trait for flipping a record's active flag.

use async_trait::async_trait;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;

/// Flip the active flag of a record (or the running timer of a time entry).
///
/// Harvest uses a different HTTP verb per resource; implementations pick
/// the right one.
#[async_trait]
pub trait Toggle {
    async fn toggle(client: &HarvestClient, id: u64) -> Result<HarvestResponse>;
}
