// Task Domain Model

use super::error::{check_length, require_name, DomainError, Result, MAX_DESCRIPTION_CHARS};
use super::project::{OwnerId, ProjectId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Task ID (assigned by the repository)
pub type TaskId = i64;

/// Task Status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(TaskStatus::Open),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// Task Entity
///
/// `project_id` is fixed at creation. Only `title`, `description` and
/// `status` change afterwards, via [`Task::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub owner_id: OwnerId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: i64, // epoch ms
    pub updated_at: i64, // epoch ms
}

impl Task {
    /// Materialize a persisted task from its validated draft
    pub fn from_new(id: TaskId, new: NewTask) -> Self {
        Self {
            id,
            project_id: new.project_id,
            owner_id: new.owner_id,
            title: new.title,
            description: new.description,
            status: new.status,
            created_at: new.created_at,
            updated_at: new.created_at,
        }
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }

    /// Apply the mutable fields of `patch` with explicit timestamp
    pub fn apply(&mut self, patch: TaskPatch, now_millis: i64) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now_millis;
    }
}

/// Validated task draft, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub project_id: ProjectId,
    pub owner_id: OwnerId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: i64,
}

impl NewTask {
    /// Create a new task draft in `Open` status
    pub fn new(
        owner_id: impl Into<String>,
        project_id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: i64,
    ) -> Result<Self> {
        let title = title.into();
        let description = description.into();

        require_name("title", &title)?;
        check_length("description", &description, MAX_DESCRIPTION_CHARS)?;

        Ok(Self {
            project_id,
            owner_id: owner_id.into(),
            title: title.trim().to_string(),
            description,
            status: TaskStatus::Open,
            created_at,
        })
    }
}

/// Partial update of a task's mutable fields
///
/// There is intentionally no `project_id` here: a task's project reference
/// cannot change after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Validate supplied fields, trimming the title
    pub fn validated(self) -> Result<Self> {
        let title = match self.title {
            Some(title) => {
                require_name("title", &title)?;
                Some(title.trim().to_string())
            }
            None => None,
        };
        if let Some(description) = &self.description {
            check_length("description", description, MAX_DESCRIPTION_CHARS)?;
        }
        Ok(Self { title, ..self })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task::from_new(7, NewTask::new("u1", 3, "t1", "d", 1000).unwrap())
    }

    #[test]
    fn test_new_task_starts_open() {
        let task = sample_task();
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_new_task_rejects_blank_title() {
        let err = NewTask::new("u1", 1, "", "", 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidField { field: "title", .. }));
    }

    #[test]
    fn test_title_limit_applies_to_trimmed_value() {
        let padded = format!("  {}  ", "t".repeat(200));
        let draft = NewTask::new("u1", 1, padded.as_str(), "", 0).unwrap();
        assert_eq!(draft.title.chars().count(), 200);

        let patch = TaskPatch {
            title: Some(padded),
            ..TaskPatch::default()
        };
        assert_eq!(patch.validated().unwrap().title.unwrap().len(), 200);

        let err = NewTask::new("u1", 1, "t".repeat(201), "", 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidField { field: "title", .. }));
    }

    #[test]
    fn test_apply_keeps_project_reference() {
        let mut task = sample_task();
        task.apply(
            TaskPatch {
                title: Some("renamed".into()),
                description: None,
                status: Some(TaskStatus::Done),
            },
            2000,
        );

        assert_eq!(task.project_id, 3);
        assert_eq!(task.title, "renamed");
        assert_eq!(task.description, "d");
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.updated_at, 2000);
        assert_eq!(task.created_at, 1000);
    }

    #[test]
    fn test_patch_rejects_blank_title() {
        let patch = TaskPatch {
            title: Some("  ".into()),
            ..TaskPatch::default()
        };
        assert!(patch.validated().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::Done.to_string(), "done");
        assert!("closed".parse::<TaskStatus>().is_err());
    }
}
