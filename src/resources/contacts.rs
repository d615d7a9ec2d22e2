//! Client contacts.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::client::HarvestClient;
use crate::error::Result;
use crate::query::UpdatedSinceQuery;
use crate::response::HarvestResponse;
use crate::traits::{Delete, Get, List, Update};

/// People at a client company.
#[derive(Debug, Clone, Copy)]
pub struct Contacts;

impl Contacts {
    /// Create a contact.
    ///
    /// `first-name` and `last-name` are merged into `extra`, overriding any
    /// values already present there.
    #[tracing::instrument(skip(client, extra))]
    pub async fn create(
        client: &HarvestClient,
        new_contact_id: u64,
        first_name: &str,
        last_name: &str,
        extra: Map<String, Value>,
    ) -> Result<HarvestResponse> {
        let mut body = extra;
        body.insert("first-name".to_string(), Value::from(first_name));
        body.insert("last-name".to_string(), Value::from(last_name));

        client
            .post(&format!("contacts/{new_contact_id}"), Some(&Value::Object(body)))
            .await
    }

    /// All contacts of one client.
    #[tracing::instrument(skip(client))]
    pub async fn for_client(
        client: &HarvestClient,
        client_id: u64,
        query: &UpdatedSinceQuery,
    ) -> Result<HarvestResponse> {
        client
            .get_with_query(&format!("clients/{client_id}/contacts"), query)
            .await
    }
}

#[async_trait]
impl List for Contacts {
    type Query = UpdatedSinceQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &HarvestClient, query: &Self::Query) -> Result<HarvestResponse> {
        client.get_with_query("contacts", query).await
    }
}

#[async_trait]
impl Get for Contacts {
    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.get(&format!("contacts/{id}")).await
    }
}

#[async_trait]
impl Update for Contacts {
    #[tracing::instrument(skip(client, body))]
    async fn update(client: &HarvestClient, id: u64, body: &Value) -> Result<HarvestResponse> {
        client.put(&format!("contacts/{id}"), Some(body)).await
    }
}

#[async_trait]
impl Delete for Contacts {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.delete(&format!("contacts/{id}")).await
    }
}
