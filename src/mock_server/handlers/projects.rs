//! Handlers for the listings nested under a project.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{created, empty_ok, not_found};
use crate::mock_server::state::{Collection, SharedState};

/// Query parameters of the timesheet and expense listings.
#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// GET /projects/{id}/entries
pub async fn list_project_entries(
    State(state): State<SharedState>,
    Path(project_id): Path<u64>,
    Query(range): Query<RangeParams>,
) -> Response {
    list_spent(state, Collection::DayEntries, project_id, range).await
}

/// GET /projects/{id}/expenses
pub async fn list_project_expenses(
    State(state): State<SharedState>,
    Path(project_id): Path<u64>,
    Query(range): Query<RangeParams>,
) -> Response {
    list_spent(state, Collection::Expenses, project_id, range).await
}

async fn list_spent(
    state: SharedState,
    collection: Collection,
    project_id: u64,
    range: RangeParams,
) -> Response {
    let state = state.read().await;
    if state.record(Collection::Projects, project_id).is_none() {
        return not_found("project");
    }
    Json(state.list_spent(collection, project_id, range.from, range.to)).into_response()
}

/// GET /projects/{id}/task_assignments
pub async fn list_task_assignments(
    State(state): State<SharedState>,
    Path(project_id): Path<u64>,
) -> Response {
    let state = state.read().await;
    if state.record(Collection::Projects, project_id).is_none() {
        return not_found("project");
    }
    Json(state.list_by(Collection::TaskAssignments, "project_id", project_id)).into_response()
}

/// GET /projects/{id}/task_assignments/{assignment}
pub async fn get_task_assignment(
    State(state): State<SharedState>,
    Path((project_id, assignment_id)): Path<(u64, u64)>,
) -> Response {
    let state = state.read().await;
    match state.record(Collection::TaskAssignments, assignment_id) {
        Some(record) if belongs_to(record, project_id) => {
            Json(state.get(Collection::TaskAssignments, assignment_id)).into_response()
        }
        _ => not_found("task_assignment"),
    }
}

/// POST /projects/{id}/task_assignments/
pub async fn assign_task(
    State(state): State<SharedState>,
    Path(project_id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let Some(task_id) = body.pointer("/task/id").and_then(Value::as_u64) else {
        return not_found("task");
    };
    let mut state = state.write().await;
    if state.record(Collection::Tasks, task_id).is_none() {
        return not_found("task");
    }
    let id = state.insert(
        Collection::TaskAssignments,
        json!({ "project_id": project_id, "task_id": task_id, "deactivated": false }),
    );
    created(Collection::TaskAssignments, id)
}

/// POST /projects/{id}/task_assignments/add_with_create_new_task
pub async fn create_task_and_assign(
    State(state): State<SharedState>,
    Path(project_id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    let task_id = state.insert(Collection::Tasks, body);
    let id = state.insert(
        Collection::TaskAssignments,
        json!({ "project_id": project_id, "task_id": task_id, "deactivated": false }),
    );
    created(Collection::TaskAssignments, id)
}

/// PUT /projects/{id}/task_assignments/{assignment}
pub async fn change_task_assignment(
    State(state): State<SharedState>,
    Path((project_id, assignment_id)): Path<(u64, u64)>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if !state
        .record(Collection::TaskAssignments, assignment_id)
        .is_some_and(|r| belongs_to(r, project_id))
    {
        return not_found("task_assignment");
    }
    let changes = match body {
        Value::Object(mut fields) => fields
            .remove("task-assignment")
            .unwrap_or(Value::Object(Map::new())),
        _ => Value::Object(Map::new()),
    };
    match state.update(Collection::TaskAssignments, assignment_id, changes) {
        Some(record) => Json(record).into_response(),
        None => not_found("task_assignment"),
    }
}

/// DELETE /projects/{id}/task_assignments/{assignment}
pub async fn remove_task_assignment(
    State(state): State<SharedState>,
    Path((project_id, assignment_id)): Path<(u64, u64)>,
) -> Response {
    let mut state = state.write().await;
    if !state
        .record(Collection::TaskAssignments, assignment_id)
        .is_some_and(|r| belongs_to(r, project_id))
    {
        return not_found("task_assignment");
    }
    state.remove(Collection::TaskAssignments, assignment_id);
    empty_ok()
}

/// POST /projects/{id}/user_assignments
pub async fn assign_user(
    State(state): State<SharedState>,
    Path(project_id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let Some(user_id) = body.pointer("/user/id").and_then(Value::as_u64) else {
        return not_found("user");
    };
    let mut state = state.write().await;
    if state.record(Collection::People, user_id).is_none() {
        return not_found("user");
    }
    let id = state.insert(
        Collection::UserAssignments,
        json!({ "project_id": project_id, "user_id": user_id, "deactivated": false }),
    );
    created(Collection::UserAssignments, id)
}

fn belongs_to(record: &Value, project_id: u64) -> bool {
    record.get("project_id").and_then(Value::as_u64) == Some(project_id)
}
