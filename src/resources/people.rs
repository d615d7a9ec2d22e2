//! People (users of the account).

use async_trait::async_trait;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;
use crate::traits::{Delete, Get, List, Toggle};

#[derive(Debug, Clone, Copy)]
pub struct People;

#[async_trait]
impl List for People {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &HarvestClient, _query: &()) -> Result<HarvestResponse> {
        client.get("people").await
    }
}

#[async_trait]
impl Get for People {
    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.get(&format!("people/{id}")).await
    }
}

#[async_trait]
impl Toggle for People {
    // Harvest toggles people with a GET.
    #[tracing::instrument(skip(client))]
    async fn toggle(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.get(&format!("people/{id}/toggle")).await
    }
}

#[async_trait]
impl Delete for People {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.delete(&format!("people/{id}")).await
    }
}
