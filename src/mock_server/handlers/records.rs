//! Handlers shared by the flat record collections.
//!
//! The collection is taken from the first path segment, so one handler
//! serves `/clients/1`, `/tasks/1`, `/expense_categories/1` and so on.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{collection_of, created, empty_ok, not_found};
use crate::mock_server::state::{Collection, SharedState};

/// Query parameters accepted by collection listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub client: Option<u64>,
    pub page: Option<usize>,
}

/// GET /{collection}
pub async fn list_records(
    State(state): State<SharedState>,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> Response {
    let Some(collection) = collection_of(&uri) else {
        return not_found(uri.path());
    };
    let state = state.read().await;

    let records = match (collection, params.client) {
        (Collection::Invoices, _) => state.invoice_page(params.page.unwrap_or(1)),
        (Collection::Projects, Some(client_id)) => {
            state.list_by(collection, "client_id", client_id)
        }
        _ => state.list(collection),
    };
    Json(records).into_response()
}

/// GET /{collection}/{id}
pub async fn get_record(
    State(state): State<SharedState>,
    uri: Uri,
    Path(id): Path<u64>,
) -> Response {
    let Some(collection) = collection_of(&uri) else {
        return not_found(uri.path());
    };
    match state.read().await.get(collection, id) {
        Some(record) => Json(record).into_response(),
        None => not_found(collection.wrapper()),
    }
}

/// POST /{collection}
pub async fn create_record(
    State(state): State<SharedState>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    let Some(collection) = collection_of(&uri) else {
        return not_found(uri.path());
    };
    let id = state.write().await.insert(collection, body);
    created(collection, id)
}

/// POST /{collection}/{id}, where the caller picks the new id.
pub async fn create_record_with_id(
    State(state): State<SharedState>,
    uri: Uri,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let Some(collection) = collection_of(&uri) else {
        return not_found(uri.path());
    };
    let mut state = state.write().await;
    let mut record = match body {
        Value::Object(mut fields) => fields
            .remove(collection.wrapper())
            .filter(Value::is_object)
            .unwrap_or(Value::Object(fields)),
        other => other,
    };
    if let Value::Object(fields) = &mut record {
        fields.insert("id".to_string(), Value::from(id));
    }
    let id = state.insert(collection, record);
    created(collection, id)
}

/// PUT /{collection}/{id}
pub async fn update_record(
    State(state): State<SharedState>,
    uri: Uri,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let Some(collection) = collection_of(&uri) else {
        return not_found(uri.path());
    };
    match state.write().await.update(collection, id, body) {
        Some(record) => Json(record).into_response(),
        None => not_found(collection.wrapper()),
    }
}

/// DELETE /{collection}/{id}
pub async fn delete_record(
    State(state): State<SharedState>,
    uri: Uri,
    Path(id): Path<u64>,
) -> Response {
    let Some(collection) = collection_of(&uri) else {
        return not_found(uri.path());
    };
    if state.write().await.remove(collection, id) {
        empty_ok()
    } else {
        not_found(collection.wrapper())
    }
}

/// GET, POST or PUT /{collection}/{id}/toggle
pub async fn toggle_record(
    State(state): State<SharedState>,
    uri: Uri,
    Path(id): Path<u64>,
) -> Response {
    let Some(collection) = collection_of(&uri) else {
        return not_found(uri.path());
    };
    match state.write().await.toggle(collection, id) {
        Some(record) => Json(record).into_response(),
        None => not_found(collection.wrapper()),
    }
}

/// POST /tasks/{id}/activate
pub async fn activate_task(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    if state.write().await.activate(Collection::Tasks, id) {
        empty_ok()
    } else {
        not_found("task")
    }
}

/// GET /clients/{id}/contacts
pub async fn list_client_contacts(
    State(state): State<SharedState>,
    Path(client_id): Path<u64>,
) -> Response {
    let state = state.read().await;
    if state.record(Collection::Clients, client_id).is_none() {
        return not_found("client");
    }
    Json(state.list_by(Collection::Contacts, "client_id", client_id)).into_response()
}

/// GET /account/who_am_i
pub async fn who_am_i(State(state): State<SharedState>) -> Response {
    (StatusCode::OK, Json(state.read().await.account.clone())).into_response()
}
