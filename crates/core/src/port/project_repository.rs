// Project Repository Port (Interface)

use crate::domain::{NewProject, Project, ProjectId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Project persistence
///
/// Implementations must be safe for concurrent use without external locking.
/// Absence is reported as `Ok(None)`, never as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a new project, returning it with its assigned ID
    async fn create(&self, project: NewProject) -> Result<Project>;

    /// Find project by ID (no ownership filtering)
    async fn get_by_id(&self, id: ProjectId) -> Result<Option<Project>>;

    /// List all projects owned by `owner_id`, oldest first
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Project>>;
}
