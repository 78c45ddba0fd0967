//! HTTP Request/Response Types

use crate::error::ApiError;
use serde::Deserialize;
use taskboard_core::domain::{DomainError, ProjectId, TaskPatch, TaskStatus};
use taskboard_core::error::AppError;

/// POST /projects
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// POST /tasks
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// PUT /tasks/{id}
///
/// Absent fields are left unchanged. Any `project_id` in the body is
/// ignored along with other unknown fields.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> Result<TaskPatch, ApiError> {
        let status = self
            .status
            .map(|raw| raw.parse::<TaskStatus>())
            .transpose()
            .map_err(|e: DomainError| ApiError::App(AppError::from(e)))?;

        Ok(TaskPatch {
            title: self.title,
            description: self.description,
            status,
        })
    }
}

/// GET /tasks
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub project_id: Option<ProjectId>,
}
