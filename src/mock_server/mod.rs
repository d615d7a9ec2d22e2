//! Mock Harvest API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Harvest
//! v1 API for integration and end-to-end testing. Unlike wiremock which mocks
//! at the HTTP level per-test, this server keeps state across requests, so a
//! create followed by a get sees the new record.
//!
//! # Example
//!
//! ```ignore
//! use harvestapi::mock_server::MockServer;
//! use harvestapi::{Clients, Get, HarvestClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = HarvestClient::with_basic(server.url(), "ada@acme.com", "secret").unwrap();
//!
//!     // Server comes with default fixtures
//!     let acme = Clients::get(&client, 1).await.unwrap();
//!     assert_eq!(acme.json().unwrap()["client"]["name"], "Acme Corp");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::{Collection, MockCredentials, MockState, SharedState};
