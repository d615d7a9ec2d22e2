//! Time tracking (the `daily` endpoints).

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;
use crate::traits::{Create, Delete, Get, Toggle, Update};

/// Time entries of the authenticated user.
///
/// Unlike other resources these live under `/daily` with verb-style paths.
#[derive(Debug, Clone, Copy)]
pub struct TimeEntries;

#[derive(Serialize)]
struct OfUser {
    of_user: u64,
}

impl TimeEntries {
    /// Today's entries and the projects they can be logged against.
    #[tracing::instrument(skip(client))]
    pub async fn today(client: &HarvestClient) -> Result<HarvestResponse> {
        client.get("daily").await
    }

    /// Entries of a given day, addressed by day of the year (1-based).
    #[tracing::instrument(skip(client))]
    pub async fn day(
        client: &HarvestClient,
        day_of_year: u32,
        year: i32,
    ) -> Result<HarvestResponse> {
        client.get(&format!("daily/{day_of_year}/{year}")).await
    }

    /// Log an entry on behalf of another user.
    #[tracing::instrument(skip(client, body))]
    pub async fn create_for_user(
        client: &HarvestClient,
        user_id: u64,
        body: &Value,
    ) -> Result<HarvestResponse> {
        client
            .post_with_query("daily/add", &OfUser { of_user: user_id }, Some(body))
            .await
    }
}

#[async_trait]
impl Get for TimeEntries {
    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.get(&format!("daily/show/{id}")).await
    }
}

#[async_trait]
impl Toggle for TimeEntries {
    /// Start or stop the timer of an entry.
    #[tracing::instrument(skip(client))]
    async fn toggle(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.get(&format!("daily/timer/{id}")).await
    }
}

#[async_trait]
impl Create for TimeEntries {
    #[tracing::instrument(skip(client, body))]
    async fn create(client: &HarvestClient, body: &Value) -> Result<HarvestResponse> {
        client.post("daily/add", Some(body)).await
    }
}

#[async_trait]
impl Update for TimeEntries {
    // Harvest updates entries with a POST.
    #[tracing::instrument(skip(client, body))]
    async fn update(client: &HarvestClient, id: u64, body: &Value) -> Result<HarvestResponse> {
        client.post(&format!("daily/update/{id}"), Some(body)).await
    }
}

#[async_trait]
impl Delete for TimeEntries {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.delete(&format!("daily/delete/{id}")).await
    }
}
