//! Task records.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::query::UpdatedSinceQuery;
use crate::response::HarvestResponse;
use crate::traits::{Create, Delete, Get, List, Update};

#[derive(Debug, Clone, Copy)]
pub struct Tasks;

impl Tasks {
    /// Reactivate an archived task.
    #[tracing::instrument(skip(client))]
    pub async fn activate(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.post(&format!("tasks/{id}/activate"), None).await
    }
}

#[async_trait]
impl List for Tasks {
    type Query = UpdatedSinceQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &HarvestClient, query: &Self::Query) -> Result<HarvestResponse> {
        client.get_with_query("tasks", query).await
    }
}

#[async_trait]
impl Get for Tasks {
    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.get(&format!("tasks/{id}")).await
    }
}

#[async_trait]
impl Create for Tasks {
    #[tracing::instrument(skip(client, body))]
    async fn create(client: &HarvestClient, body: &Value) -> Result<HarvestResponse> {
        client.post("tasks/", Some(body)).await
    }
}

#[async_trait]
impl Update for Tasks {
    #[tracing::instrument(skip(client, body))]
    async fn update(client: &HarvestClient, id: u64, body: &Value) -> Result<HarvestResponse> {
        client.put(&format!("tasks/{id}"), Some(body)).await
    }
}

#[async_trait]
impl Delete for Tasks {
    /// Harvest deletes a task without logged hours and archives it otherwise.
    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.delete(&format!("tasks/{id}")).await
    }
}
