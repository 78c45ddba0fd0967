// Project Accessor adapter
//
// Implements the narrow `ProjectAccessor` port on top of `ProjectService`,
// so the task service can check references without seeing anything else.

use super::project_service::ProjectService;
use crate::domain::ProjectId;
use crate::error::Result;
use crate::port::ProjectAccessor;
use async_trait::async_trait;
use std::sync::Arc;

pub struct ProjectServiceAccessor {
    projects: Arc<ProjectService>,
}

impl ProjectServiceAccessor {
    pub fn new(projects: Arc<ProjectService>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl ProjectAccessor for ProjectServiceAccessor {
    async fn exists(&self, id: ProjectId, owner_id: &str) -> Result<bool> {
        Ok(self.projects.get(id, owner_id).await?.is_some())
    }
}
