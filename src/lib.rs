//! Harvest API client library.
//!
//! A thin Rust client for the Harvest time-tracking REST API. Each resource
//! (clients, projects, tasks, ...) is a type implementing the operation
//! traits its endpoints support; records are passed through as opaque JSON.
//!
//! # Quick Start
//!
//! ```no_run
//! use harvestapi::{Clients, Get, HarvestClient, List, Projects, ProjectListQuery};
//!
//! #[tokio::main]
//! async fn main() -> harvestapi::Result<()> {
//!     let client = HarvestClient::with_basic(
//!         "https://acme.harvestapp.com",
//!         "me@acme.com",
//!         "secret",
//!     )?;
//!
//!     // List all clients
//!     let clients = Clients::list(&client, &Default::default()).await?;
//!     println!("Found {} clients", clients.items().map_or(0, Vec::len));
//!
//!     // Projects of one client
//!     let projects = Projects::list(&client, &ProjectListQuery::for_client(23445)).await?;
//!
//!     // A single project
//!     let project = Projects::get(&client, 42).await?;
//!     if project.is_auth_failure() {
//!         eprintln!("check your credentials");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around six operation traits:
//!
//! - [`Get`] - Fetch a single record by id
//! - [`List`] - Fetch a collection, optionally filtered
//! - [`Create`], [`Update`], [`Delete`] - Modify records
//! - [`Toggle`] - Flip a record's active flag
//!
//! Endpoints that do not fit a trait (task assignments, per-project
//! timesheets, time entries of a given day, ...) are associated functions on
//! the resource types.
//!
//! Every call returns a [`HarvestResponse`]: the decoded JSON document, or
//! the raw body when it is not JSON. HTTP error statuses are not errors;
//! only transport failures are.
//!
//! # Configuration
//!
//! [`HarvestConfig`] reads a JSON credentials file (`~/.harvest` by default)
//! or `HARVEST_*` environment variables.

mod auth;
pub mod cli;
mod client;
mod config;
mod error;
pub mod export;
pub mod logging;
mod output;
mod pagination;
mod query;
mod resources;
mod response;
mod status;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use auth::{Auth, AuthMode, OAuth2Token};
pub use client::HarvestClient;
pub use config::{app_uri, CredentialsFile, HarvestConfig, CREDENTIALS_ENV};
pub use error::{HarvestError, Result};
pub use pagination::{collect_pages, PageCollector, PageSelection, PageStep, MAX_PAGES};
pub use query::{DateRange, UpdatedSince, UpdatedSinceQuery};
pub use response::{HarvestResponse, AUTH_FAILED_MESSAGE};
pub use status::{fetch_status, status, HARVEST_STATUS_URL};

// Re-export output formatting
pub use output::{PrettyPrint, SummaryRow};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Toggle, Update};

// Re-export resources
pub use resources::{
    who_am_i, Clients, Contacts, ExpenseCategories, InvoiceListQuery, InvoiceStatus, Invoices,
    People, ProjectListQuery, Projects, TaskAssignments, Tasks, TimeEntries, UserAssignments,
};
