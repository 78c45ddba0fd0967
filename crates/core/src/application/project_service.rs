// Project Service - Project lifecycle use cases

use super::deadline::bounded;
use super::notifier::EventNotifier;
use super::options::ServiceOptions;
use crate::domain::{DomainEvent, NewProject, Project, ProjectId};
use crate::error::Result;
use crate::port::{EventPublisher, ProjectRepository, TimeProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Project Service
///
/// Owns project creation and owner-scoped reads. Holds only shared handles,
/// so one instance serves all concurrent requests.
pub struct ProjectService {
    project_repo: Arc<dyn ProjectRepository>,
    notifier: EventNotifier,
    time_provider: Arc<dyn TimeProvider>,
    repository_timeout: Option<Duration>,
}

impl ProjectService {
    pub fn new(
        project_repo: Arc<dyn ProjectRepository>,
        publisher: Arc<dyn EventPublisher>,
        time_provider: Arc<dyn TimeProvider>,
        options: ServiceOptions,
    ) -> Self {
        Self {
            project_repo,
            notifier: EventNotifier::new(publisher, &options),
            time_provider,
            repository_timeout: options.repository_timeout,
        }
    }

    /// Create a project owned by `owner_id`
    ///
    /// Publishes `project.created` on a best-effort basis after the write.
    pub async fn create(&self, owner_id: &str, name: &str, description: &str) -> Result<Project> {
        let draft = NewProject::new(owner_id, name, description, self.time_provider.now_millis())?;

        let project = bounded(
            self.repository_timeout,
            "project create",
            self.project_repo.create(draft),
        )
        .await?;

        info!(project_id = project.id, owner_id = %project.owner_id, "Project created");

        self.notifier
            .notify(DomainEvent::ProjectCreated(project.clone()))
            .await;

        Ok(project)
    }

    /// Fetch a project visible to `owner_id`
    ///
    /// Returns `Ok(None)` both when the project does not exist and when it
    /// belongs to someone else.
    pub async fn get(&self, id: ProjectId, owner_id: &str) -> Result<Option<Project>> {
        let found = bounded(
            self.repository_timeout,
            "project lookup",
            self.project_repo.get_by_id(id),
        )
        .await?;

        Ok(found.filter(|project| {
            let visible = project.is_owned_by(owner_id);
            if !visible {
                debug!(project_id = id, requester = %owner_id, "Project hidden from non-owner");
            }
            visible
        }))
    }

    /// List projects owned by `owner_id`
    pub async fn list(&self, owner_id: &str) -> Result<Vec<Project>> {
        bounded(
            self.repository_timeout,
            "project list",
            self.project_repo.list_by_owner(owner_id),
        )
        .await
    }
}
