//! Shared wiring for the end-to-end tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use taskboard_core::application::{
    ProjectService, ProjectServiceAccessor, ServiceOptions, TaskService,
};
use taskboard_core::domain::{DomainEvent, NewTask, Task, TaskId};
use taskboard_core::port::{
    EventPublisher, PublishError, SystemTimeProvider, TaskFilter, TaskRepository,
};
use taskboard_core::Result;
use taskboard_infra_sqlite::{
    create_pool, run_migrations, SqliteProjectRepository, SqliteTaskRepository,
};

/// Publisher that fails every call
pub struct FailingPublisher {
    pub attempts: AtomicUsize,
}

impl FailingPublisher {
    pub fn new() -> Self {
        Self {
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: &DomainEvent) -> std::result::Result<(), PublishError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(PublishError::Unavailable("bus unreachable".into()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Publisher whose calls never complete
pub struct HangingPublisher;

#[async_trait]
impl EventPublisher for HangingPublisher {
    async fn publish(&self, _event: &DomainEvent) -> std::result::Result<(), PublishError> {
        std::future::pending().await
    }

    fn name(&self) -> &'static str {
        "hanging"
    }
}

/// Task repository wrapper that counts writes
pub struct SpyTaskRepository {
    inner: SqliteTaskRepository,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
}

#[async_trait]
impl TaskRepository for SpyTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(task).await
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>> {
        self.inner.get_by_id(id).await
    }

    async fn list_by_owner(&self, owner_id: &str, filter: TaskFilter) -> Result<Vec<Task>> {
        self.inner.list_by_owner(owner_id, filter).await
    }

    async fn update(&self, task: Task) -> Result<Task> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(task).await
    }
}

pub struct Board {
    pub projects: Arc<ProjectService>,
    pub tasks: Arc<TaskService>,
    pub task_repo: Arc<SpyTaskRepository>,
}

impl Board {
    pub fn task_creates(&self) -> usize {
        self.task_repo.creates.load(Ordering::SeqCst)
    }
}

/// Fresh in-memory database wired with real adapters
pub async fn board(publisher: Arc<dyn EventPublisher>) -> Board {
    board_at("sqlite::memory:", publisher).await
}

pub async fn board_at(url: &str, publisher: Arc<dyn EventPublisher>) -> Board {
    board_with(url, publisher, ServiceOptions::default()).await
}

pub async fn board_with(
    url: &str,
    publisher: Arc<dyn EventPublisher>,
    options: ServiceOptions,
) -> Board {
    let pool = create_pool(url).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let time_provider = Arc::new(SystemTimeProvider);
    let projects = Arc::new(ProjectService::new(
        Arc::new(SqliteProjectRepository::new(pool.clone())),
        publisher.clone(),
        time_provider.clone(),
        options,
    ));

    let task_repo = Arc::new(SpyTaskRepository {
        inner: SqliteTaskRepository::new(pool),
        creates: AtomicUsize::new(0),
        updates: AtomicUsize::new(0),
    });
    let tasks = Arc::new(TaskService::new(
        task_repo.clone(),
        Arc::new(ProjectServiceAccessor::new(projects.clone())),
        publisher,
        time_provider,
        options,
    ));

    Board {
        projects,
        tasks,
        task_repo,
    }
}
