// Port Layer - Interfaces for external dependencies

pub mod event_publisher;
pub mod project_accessor;
pub mod project_repository;
pub mod task_repository;
pub mod time_provider; // For deterministic testing

// Re-exports
pub use event_publisher::{EventPublisher, NoopEventPublisher, PublishError};
pub use project_accessor::ProjectAccessor;
pub use project_repository::ProjectRepository;
pub use task_repository::{TaskFilter, TaskRepository};
pub use time_provider::{FixedTimeProvider, SystemTimeProvider, TimeProvider};

#[cfg(test)]
pub use event_publisher::MockEventPublisher;
#[cfg(test)]
pub use project_accessor::MockProjectAccessor;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
#[cfg(test)]
pub use task_repository::MockTaskRepository;
