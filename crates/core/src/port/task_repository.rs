// Task Repository Port (Interface)

use crate::domain::{NewTask, ProjectId, Task, TaskId};
use crate::error::Result;
use async_trait::async_trait;

/// Optional filters for listing tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub project_id: Option<ProjectId>,
}

impl TaskFilter {
    pub fn project(project_id: ProjectId) -> Self {
        Self {
            project_id: Some(project_id),
        }
    }
}

/// Repository interface for Task persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a new task, returning it with its assigned ID
    async fn create(&self, task: NewTask) -> Result<Task>;

    /// Find task by ID (no ownership filtering)
    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>>;

    /// List tasks owned by `owner_id`, oldest first, narrowed by `filter`
    async fn list_by_owner(&self, owner_id: &str, filter: TaskFilter) -> Result<Vec<Task>>;

    /// Persist the mutable fields of an existing task
    ///
    /// Never rewrites `project_id`. Returns `AppError::NotFound` if the row
    /// vanished since it was loaded.
    async fn update(&self, task: Task) -> Result<Task>;
}
