//! HTTP request handlers for the mock server.

pub mod daily;
pub mod projects;
pub mod records;

pub use daily::*;
pub use projects::*;
pub use records::*;

use axum::{
    http::{header::LOCATION, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::state::Collection;

/// Collection addressed by the first path segment, e.g. `/clients/1`.
fn collection_of(uri: &Uri) -> Option<Collection> {
    uri.path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .and_then(Collection::from_segment)
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{what} not found") })),
    )
        .into_response()
}

/// Harvest answers a create with an empty body and the new record's path.
fn created(collection: Collection, id: u64) -> Response {
    (
        StatusCode::CREATED,
        [(LOCATION, format!("/{}/{}", collection.segment(), id))],
    )
        .into_response()
}

/// Empty `200 OK`, as answered to deletes.
fn empty_ok() -> Response {
    StatusCode::OK.into_response()
}
