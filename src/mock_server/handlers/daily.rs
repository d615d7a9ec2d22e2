//! Time tracking handlers (`/daily`).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{empty_ok, not_found};
use crate::mock_server::state::{Collection, MockState, SharedState};

/// Query parameters of `POST /daily/add`.
#[derive(Debug, Default, Deserialize)]
pub struct AddParams {
    pub of_user: Option<u64>,
}

/// GET /daily
pub async fn list_today(State(state): State<SharedState>) -> Response {
    let today = Utc::now().date_naive();
    day_listing(&*state.read().await, today)
}

/// GET /daily/{day_of_year}/{year}
pub async fn list_day(
    State(state): State<SharedState>,
    Path((day_of_year, year)): Path<(u32, i32)>,
) -> Response {
    match NaiveDate::from_yo_opt(year, day_of_year) {
        Some(day) => day_listing(&*state.read().await, day),
        None => not_found("day"),
    }
}

fn day_listing(state: &MockState, day: NaiveDate) -> Response {
    let entries: Vec<Value> = state
        .list_on(Collection::DayEntries, day)
        .into_iter()
        .filter_map(|e| e.get(Collection::DayEntries.wrapper()).cloned())
        .collect();
    let projects: Vec<Value> = state
        .list(Collection::Projects)
        .into_iter()
        .filter_map(|p| p.get(Collection::Projects.wrapper()).cloned())
        .collect();
    Json(json!({
        "for_day": day.to_string(),
        "day_entries": entries,
        "projects": projects,
    }))
    .into_response()
}

/// GET /daily/show/{id}
pub async fn show_entry(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    match state.read().await.get(Collection::DayEntries, id) {
        Some(entry) => Json(entry).into_response(),
        None => not_found("day_entry"),
    }
}

/// GET /daily/timer/{id}
pub async fn toggle_timer(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    match state.write().await.toggle(Collection::DayEntries, id) {
        Some(entry) => Json(entry).into_response(),
        None => not_found("day_entry"),
    }
}

/// POST /daily/add
///
/// Unlike the other creates this answers with the new entry.
pub async fn add_entry(
    State(state): State<SharedState>,
    Query(params): Query<AddParams>,
    Json(body): Json<Value>,
) -> Response {
    let mut entry = body;
    if let Value::Object(fields) = &mut entry {
        fields
            .entry("spent_at")
            .or_insert_with(|| Value::from(Utc::now().date_naive().to_string()));
        if let Some(user_id) = params.of_user {
            fields.insert("user_id".to_string(), Value::from(user_id));
        }
    }

    let mut state = state.write().await;
    let id = state.insert(Collection::DayEntries, entry);
    match state.record(Collection::DayEntries, id) {
        Some(entry) => (StatusCode::CREATED, Json(entry.clone())).into_response(),
        None => not_found("day_entry"),
    }
}

/// POST /daily/update/{id}
pub async fn update_entry(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    match state.write().await.update(Collection::DayEntries, id, body) {
        Some(entry) => Json(entry).into_response(),
        None => not_found("day_entry"),
    }
}

/// DELETE /daily/delete/{id}
pub async fn delete_entry(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    if state.write().await.remove(Collection::DayEntries, id) {
        empty_ok()
    } else {
        not_found("day_entry")
    }
}
