//! Mock Harvest API server.
//!
//! Provides an axum-based HTTP server that simulates the Harvest v1 API.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::{MockState, SharedState};
use crate::response::AUTH_FAILED_MESSAGE;

/// A mock Harvest API server for testing.
///
/// The server runs in the background and can be used to test the Harvest
/// client against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_scenario()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `HarvestClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the axum router with all routes.
    fn create_router(state: SharedState) -> Router {
        let records = get(handlers::get_record)
            .put(handlers::update_record)
            .delete(handlers::delete_record);

        Router::new()
            // Account
            .route("/account/who_am_i", get(handlers::who_am_i))
            // Clients
            .route("/clients", get(handlers::list_records))
            .route("/clients/", post(handlers::create_record))
            .route("/clients/:id", records.clone())
            .route("/clients/:id/toggle", post(handlers::toggle_record))
            .route("/clients/:id/contacts", get(handlers::list_client_contacts))
            // Contacts
            .route("/contacts", get(handlers::list_records))
            .route(
                "/contacts/:id",
                records.clone().post(handlers::create_record_with_id),
            )
            // People
            .route("/people", get(handlers::list_records))
            .route("/people/:id", records.clone())
            .route("/people/:id/toggle", get(handlers::toggle_record))
            // Projects
            .route(
                "/projects",
                get(handlers::list_records).post(handlers::create_record),
            )
            .route("/projects/:id", records.clone())
            .route("/projects/:id/toggle", put(handlers::toggle_record))
            .route("/projects/:id/entries", get(handlers::list_project_entries))
            .route(
                "/projects/:id/expenses",
                get(handlers::list_project_expenses),
            )
            .route(
                "/projects/:id/task_assignments",
                get(handlers::list_task_assignments),
            )
            .route(
                "/projects/:id/task_assignments/",
                post(handlers::assign_task),
            )
            .route(
                "/projects/:id/task_assignments/add_with_create_new_task",
                post(handlers::create_task_and_assign),
            )
            .route(
                "/projects/:id/task_assignments/:assignment",
                get(handlers::get_task_assignment)
                    .put(handlers::change_task_assignment)
                    .delete(handlers::remove_task_assignment),
            )
            .route(
                "/projects/:id/user_assignments",
                post(handlers::assign_user),
            )
            // Tasks
            .route("/tasks", get(handlers::list_records))
            .route("/tasks/", post(handlers::create_record))
            .route("/tasks/:id", records.clone())
            .route("/tasks/:id/activate", post(handlers::activate_task))
            // Expense categories
            .route("/expense_categories", get(handlers::list_records))
            .route(
                "/expense_categories/:id",
                records.clone().post(handlers::create_record_with_id),
            )
            .route(
                "/expense_categories/:id/toggle",
                get(handlers::toggle_record),
            )
            // Invoices
            .route(
                "/invoices",
                get(handlers::list_records).post(handlers::create_record),
            )
            .route("/invoices/:id", records)
            // Time tracking
            .route("/daily", get(handlers::list_today))
            .route("/daily/add", post(handlers::add_entry))
            .route("/daily/show/:id", get(handlers::show_entry))
            .route("/daily/timer/:id", get(handlers::toggle_timer))
            .route("/daily/update/:id", post(handlers::update_entry))
            .route("/daily/delete/:id", axum::routing::delete(handlers::delete_entry))
            .route("/daily/:day/:year", get(handlers::list_day))
            .route_layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn_with_state(state.clone(), require_auth)),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject requests without the configured credentials the way Harvest does.
async fn require_auth(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if !state.read().await.authorize(header) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": AUTH_FAILED_MESSAGE })),
        )
            .into_response();
    }
    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
