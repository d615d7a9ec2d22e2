//! Invoices, including the paginated listing.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::pagination::{collect_pages, PageSelection};
use crate::query::UpdatedSince;
use crate::response::HarvestResponse;
use crate::traits::{Create, Delete, Get, List, Update};

#[derive(Debug, Clone, Copy)]
pub struct Invoices;

/// Invoice states accepted by the `status` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Open,
    Partial,
    Draft,
    Paid,
    Unpaid,
    Pastdue,
}

/// Query parameters for listing invoices.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceListQuery {
    /// Issued on or after this date.
    pub from: Option<NaiveDate>,
    /// Issued on or before this date.
    pub to: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
    pub updated_since: Option<UpdatedSince>,

    /// Pages to fetch; every page by default.
    #[serde(skip)]
    pub pages: PageSelection,
}

#[async_trait]
impl List for Invoices {
    type Query = InvoiceListQuery;

    /// Fetch the selected pages and concatenate their records.
    ///
    /// Stops at the first empty page. A first page that is not a JSON array
    /// (an authentication failure, say) is returned unchanged.
    #[tracing::instrument(skip(client))]
    async fn list(client: &HarvestClient, query: &Self::Query) -> Result<HarvestResponse> {
        #[derive(Serialize)]
        struct RequestParams<'a> {
            page: u32,
            #[serde(flatten)]
            query: &'a InvoiceListQuery,
        }

        collect_pages(&query.pages, |page| async move {
            client
                .get_with_query("invoices", &RequestParams { page, query })
                .await
        })
        .await
    }
}

#[async_trait]
impl Get for Invoices {
    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.get(&format!("invoices/{id}")).await
    }
}

#[async_trait]
impl Create for Invoices {
    #[tracing::instrument(skip(client, body))]
    async fn create(client: &HarvestClient, body: &Value) -> Result<HarvestResponse> {
        client.post("invoices", Some(body)).await
    }
}

#[async_trait]
impl Update for Invoices {
    #[tracing::instrument(skip(client, body))]
    async fn update(client: &HarvestClient, id: u64, body: &Value) -> Result<HarvestResponse> {
        client.put(&format!("invoices/{id}"), Some(body)).await
    }
}

#[async_trait]
impl Delete for Invoices {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        client.delete(&format!("invoices/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_query_serialization() {
        let query = InvoiceListQuery {
            from: NaiveDate::from_ymd_opt(2016, 1, 1),
            to: NaiveDate::from_ymd_opt(2016, 12, 31),
            status: Some(InvoiceStatus::Pastdue),
            pages: PageSelection::Pages(vec![1, 2]),
            ..Default::default()
        };
        let serialized = serde_qs::to_string(&query).expect("Failed to serialize query");
        assert_eq!(serialized, "from=2016-01-01&to=2016-12-31&status=pastdue");
    }
}
