// Domain Layer - Pure business logic and entities

pub mod error;
pub mod event;
pub mod project;
pub mod task;

// Re-exports
pub use error::DomainError;
pub use event::{DomainEvent, EventKind};
pub use project::{NewProject, OwnerId, Project, ProjectId};
pub use task::{NewTask, Task, TaskId, TaskPatch, TaskStatus};
