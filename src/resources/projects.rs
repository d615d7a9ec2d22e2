//! Project records and their per-project listings.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::query::{DateRange, UpdatedSince};
use crate::response::HarvestResponse;
use crate::traits::{Create, Delete, Get, List, Toggle, Update};

#[derive(Debug, Clone, Copy)]
pub struct Projects;

/// Query parameters for listing projects.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectListQuery {
    /// Only projects belonging to this client id.
    pub client: Option<u64>,
    pub updated_since: Option<UpdatedSince>,
}

impl ProjectListQuery {
    pub fn for_client(client_id: u64) -> Self {
        Self {
            client: Some(client_id),
            ..Default::default()
        }
    }
}

impl Projects {
    /// Projects belonging to one client.
    #[tracing::instrument(skip(client))]
    pub async fn for_client(client: &HarvestClient, client_id: u64) -> Result<HarvestResponse> {
        Self::list(client, &ProjectListQuery::for_client(client_id)).await
    }

    /// Time entries logged against a project within `range`.
    #[tracing::instrument(skip(client))]
    pub async fn timesheets(
        client: &HarvestClient,
        project_id: u64,
        range: DateRange,
    ) -> Result<HarvestResponse> {
        client
            .get_with_query(&format!("projects/{project_id}/entries"), &range)
            .await
    }

    /// Expenses recorded against a project within `range`.
    #[tracing::instrument(skip(client))]
    pub async fn expenses(
        client: &HarvestClient,
        project_id: u64,
        range: DateRange,
    ) -> Result<HarvestResponse> {
        client
            .get_with_query(&format!("projects/{project_id}/expenses"), &range)
            .await
    }
}

#[async_trait]
impl List for Projects {
    type Query = ProjectListQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &HarvestClient, query: &Self::Query) -> Result<HarvestResponse> {
        client.get_with_query("projects", query).await
    }
}

#[async_trait]
impl Get for Projects {
    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.get(&format!("projects/{id}")).await
    }
}

#[async_trait]
impl Create for Projects {
    #[tracing::instrument(skip(client, body))]
    async fn create(client: &HarvestClient, body: &Value) -> Result<HarvestResponse> {
        client.post("projects", Some(body)).await
    }
}

#[async_trait]
impl Update for Projects {
    #[tracing::instrument(skip(client, body))]
    async fn update(client: &HarvestClient, id: u64, body: &Value) -> Result<HarvestResponse> {
        client.put(&format!("projects/{id}"), Some(body)).await
    }
}

#[async_trait]
impl Toggle for Projects {
    #[tracing::instrument(skip(client))]
    async fn toggle(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.put(&format!("projects/{id}/toggle"), None).await
    }
}

#[async_trait]
impl Delete for Projects {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.delete(&format!("projects/{id}")).await
    }
}
