//! Client records.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::query::UpdatedSinceQuery;
use crate::response::HarvestResponse;
use crate::traits::{Create, Delete, Get, List, Toggle, Update};

/// The companies time is billed to.
#[derive(Debug, Clone, Copy)]
pub struct Clients;

#[async_trait]
impl List for Clients {
    type Query = UpdatedSinceQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &HarvestClient, query: &Self::Query) -> Result<HarvestResponse> {
        client.get_with_query("clients", query).await
    }
}

#[async_trait]
impl Get for Clients {
    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.get(&format!("clients/{id}")).await
    }
}

#[async_trait]
impl Create for Clients {
    #[tracing::instrument(skip(client, body))]
    async fn create(client: &HarvestClient, body: &Value) -> Result<HarvestResponse> {
        client.post("clients/", Some(body)).await
    }
}

#[async_trait]
impl Update for Clients {
    #[tracing::instrument(skip(client, body))]
    async fn update(client: &HarvestClient, id: u64, body: &Value) -> Result<HarvestResponse> {
        client.put(&format!("clients/{id}"), Some(body)).await
    }
}

#[async_trait]
impl Toggle for Clients {
    #[tracing::instrument(skip(client))]
    async fn toggle(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.post(&format!("clients/{id}/toggle"), None).await
    }
}

#[async_trait]
impl Delete for Clients {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.delete(&format!("clients/{id}")).await
    }
}
