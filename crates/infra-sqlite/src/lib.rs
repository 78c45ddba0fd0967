// Taskboard Infrastructure - SQLite Adapter
// Implements: ProjectRepository, TaskRepository

mod connection;
mod error;
mod migration;
mod project_repository;
mod task_repository;

pub use connection::create_pool;
pub use migration::run_migrations;
pub use project_repository::SqliteProjectRepository;
pub use task_repository::SqliteTaskRepository;

// sqlx::Error -> AppError goes through `error::map_sqlx_error` (orphan rule)
