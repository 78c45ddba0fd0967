// Task Service - Task lifecycle use cases

use super::deadline::bounded;
use super::notifier::EventNotifier;
use super::options::ServiceOptions;
use crate::domain::{DomainEvent, NewTask, ProjectId, Task, TaskId, TaskPatch};
use crate::error::{AppError, Result};
use crate::port::{EventPublisher, ProjectAccessor, TaskFilter, TaskRepository, TimeProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Task Service
///
/// Depends on projects only through [`ProjectAccessor`].
pub struct TaskService {
    task_repo: Arc<dyn TaskRepository>,
    projects: Arc<dyn ProjectAccessor>,
    notifier: EventNotifier,
    time_provider: Arc<dyn TimeProvider>,
    repository_timeout: Option<Duration>,
}

impl TaskService {
    pub fn new(
        task_repo: Arc<dyn TaskRepository>,
        projects: Arc<dyn ProjectAccessor>,
        publisher: Arc<dyn EventPublisher>,
        time_provider: Arc<dyn TimeProvider>,
        options: ServiceOptions,
    ) -> Self {
        Self {
            task_repo,
            projects,
            notifier: EventNotifier::new(publisher, &options),
            time_provider,
            repository_timeout: options.repository_timeout,
        }
    }

    /// Create a task in `project_id` for `owner_id`
    ///
    /// Algorithm:
    /// 1. Validate fields (no I/O on bad input)
    /// 2. Check the project exists and is visible to the caller
    /// 3. Persist, then publish `task.created` best-effort
    ///
    /// Step 2 and 3 are not atomic: a project invalidated in between is
    /// not detected here.
    pub async fn create(
        &self,
        owner_id: &str,
        project_id: ProjectId,
        title: &str,
        description: &str,
    ) -> Result<Task> {
        let draft = NewTask::new(
            owner_id,
            project_id,
            title,
            description,
            self.time_provider.now_millis(),
        )?;

        if !self.projects.exists(project_id, owner_id).await? {
            debug!(project_id, requester = %owner_id, "Task create rejected: project not visible");
            return Err(AppError::InvalidReference { project_id });
        }

        let task = bounded(
            self.repository_timeout,
            "task create",
            self.task_repo.create(draft),
        )
        .await?;

        info!(task_id = task.id, project_id = task.project_id, owner_id = %task.owner_id, "Task created");

        self.notifier.notify(DomainEvent::TaskCreated(task.clone())).await;

        Ok(task)
    }

    /// Fetch a task visible to `owner_id`; `Ok(None)` if missing or not owned
    pub async fn get(&self, id: TaskId, owner_id: &str) -> Result<Option<Task>> {
        let found = bounded(
            self.repository_timeout,
            "task lookup",
            self.task_repo.get_by_id(id),
        )
        .await?;

        Ok(found.filter(|task| {
            let visible = task.is_owned_by(owner_id);
            if !visible {
                debug!(task_id = id, requester = %owner_id, "Task hidden from non-owner");
            }
            visible
        }))
    }

    /// List tasks owned by `owner_id`, optionally within one project
    ///
    /// The project filter is not validated: an unknown project simply
    /// yields an empty list.
    pub async fn list(&self, owner_id: &str, project_id: Option<ProjectId>) -> Result<Vec<Task>> {
        let filter = TaskFilter { project_id };
        bounded(
            self.repository_timeout,
            "task list",
            self.task_repo.list_by_owner(owner_id, filter),
        )
        .await
    }

    /// Apply `patch` to a task visible to `owner_id`
    ///
    /// Only title, description and status change. An empty patch returns
    /// the task untouched without writing or publishing.
    pub async fn update(&self, id: TaskId, owner_id: &str, patch: TaskPatch) -> Result<Task> {
        let patch = patch.validated()?;

        let mut task = self
            .get(id, owner_id)
            .await?
            .ok_or_else(|| AppError::not_found_task(id))?;

        if patch.is_empty() {
            return Ok(task);
        }

        task.apply(patch, self.time_provider.now_millis());

        let task = bounded(
            self.repository_timeout,
            "task update",
            self.task_repo.update(task),
        )
        .await?;

        info!(task_id = task.id, status = %task.status, "Task updated");

        self.notifier.notify(DomainEvent::TaskUpdated(task.clone())).await;

        Ok(task)
    }
}
