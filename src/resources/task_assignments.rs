//! Tasks assigned to projects.

use serde_json::{Map, Value};

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;

/// Task assignments are nested under a project, so none of the id-only
/// traits apply.
#[derive(Debug, Clone, Copy)]
pub struct TaskAssignments;

impl TaskAssignments {
    /// All tasks assigned to a project.
    #[tracing::instrument(skip(client))]
    pub async fn list(client: &HarvestClient, project_id: u64) -> Result<HarvestResponse> {
        client
            .get(&format!("projects/{project_id}/task_assignments"))
            .await
    }

    #[tracing::instrument(skip(client))]
    pub async fn get(
        client: &HarvestClient,
        project_id: u64,
        assignment_id: u64,
    ) -> Result<HarvestResponse> {
        client
            .get(&format!("projects/{project_id}/task_assignments/{assignment_id}"))
            .await
    }

    /// Assign an existing task, e.g. `{"task": {"id": 7}}`.
    #[tracing::instrument(skip(client, body))]
    pub async fn assign(
        client: &HarvestClient,
        project_id: u64,
        body: &Value,
    ) -> Result<HarvestResponse> {
        client
            .post(&format!("projects/{project_id}/task_assignments/"), Some(body))
            .await
    }

    /// Create a new task and assign it in one call.
    #[tracing::instrument(skip(client, body))]
    pub async fn create_with_new_task(
        client: &HarvestClient,
        project_id: u64,
        body: &Value,
    ) -> Result<HarvestResponse> {
        client
            .post(
                &format!("projects/{project_id}/task_assignments/add_with_create_new_task"),
                Some(body),
            )
            .await
    }

    #[tracing::instrument(skip(client))]
    pub async fn remove(
        client: &HarvestClient,
        project_id: u64,
        assignment_id: u64,
    ) -> Result<HarvestResponse> {
        client
            .delete(&format!("projects/{project_id}/task_assignments/{assignment_id}"))
            .await
    }

    /// Change an assignment. `data` is sent under `task-assignment`,
    /// alongside any `extra` members.
    #[tracing::instrument(skip(client, data, extra))]
    pub async fn change(
        client: &HarvestClient,
        project_id: u64,
        assignment_id: u64,
        data: Value,
        extra: Map<String, Value>,
    ) -> Result<HarvestResponse> {
        let mut body = extra;
        body.insert("task-assignment".to_string(), data);

        client
            .put(
                &format!("projects/{project_id}/task_assignments/{assignment_id}"),
                Some(&Value::Object(body)),
            )
            .await
    }
}
