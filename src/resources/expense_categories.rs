//! Expense categories.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;
use crate::traits::{Delete, Get, List, Toggle, Update};

#[derive(Debug, Clone, Copy)]
pub struct ExpenseCategories;

impl ExpenseCategories {
    /// Create a category under a caller-chosen id.
    #[tracing::instrument(skip(client, body))]
    pub async fn create(
        client: &HarvestClient,
        new_expense_category_id: u64,
        body: &Value,
    ) -> Result<HarvestResponse> {
        client
            .post(
                &format!("expense_categories/{new_expense_category_id}"),
                Some(body),
            )
            .await
    }
}

#[async_trait]
impl List for ExpenseCategories {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &HarvestClient, _query: &()) -> Result<HarvestResponse> {
        client.get("expense_categories").await
    }
}

#[async_trait]
impl Get for ExpenseCategories {
    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.get(&format!("expense_categories/{id}")).await
    }
}

#[async_trait]
impl Update for ExpenseCategories {
    #[tracing::instrument(skip(client, body))]
    async fn update(client: &HarvestClient, id: u64, body: &Value) -> Result<HarvestResponse> {
        client.put(&format!("expense_categories/{id}"), Some(body)).await
    }
}

#[async_trait]
impl Toggle for ExpenseCategories {
    #[tracing::instrument(skip(client))]
    async fn toggle(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.get(&format!("expense_categories/{id}/toggle")).await
    }
}

#[async_trait]
impl Delete for ExpenseCategories {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.delete(&format!("expense_categories/{id}")).await
    }
}
