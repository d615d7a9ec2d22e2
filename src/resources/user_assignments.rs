//! People assigned to projects.

use serde_json::json;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::response::HarvestResponse;

#[derive(Debug, Clone, Copy)]
pub struct UserAssignments;

impl UserAssignments {
    /// Assign a person to a project.
    #[tracing::instrument(skip(client))]
    pub async fn assign(
        client: &HarvestClient,
        project_id: u64,
        user_id: u64,
    ) -> Result<HarvestResponse> {
        let body = json!({ "user": { "id": user_id } });
        client
            .post(&format!("projects/{project_id}/user_assignments"), Some(&body))
            .await
    }
}
