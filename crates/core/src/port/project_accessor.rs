// Project Accessor Port
//
// The only view of projects the task side is allowed to have. Keeping it
// this narrow lets the task service validate references without depending
// on the project service itself.

use crate::domain::ProjectId;
use crate::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectAccessor: Send + Sync {
    /// Whether project `id` exists and is visible to `owner_id`
    async fn exists(&self, id: ProjectId, owner_id: &str) -> Result<bool>;
}
