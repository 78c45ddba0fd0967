// Domain Events - advisory notifications emitted after durable writes

use super::project::{Project, ProjectId};
use super::task::{Task, TaskId};
use serde::{Deserialize, Serialize};

/// Event kind (extensible set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "project.created")]
    ProjectCreated,
    #[serde(rename = "task.created")]
    TaskCreated,
    #[serde(rename = "task.updated")]
    TaskUpdated,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ProjectCreated => "project.created",
            EventKind::TaskCreated => "task.created",
            EventKind::TaskUpdated => "task.updated",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain event carrying the entity snapshot it refers to
///
/// Losing an event never corrupts stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum DomainEvent {
    #[serde(rename = "project.created")]
    ProjectCreated(Project),
    #[serde(rename = "task.created")]
    TaskCreated(Task),
    #[serde(rename = "task.updated")]
    TaskUpdated(Task),
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::ProjectCreated(_) => EventKind::ProjectCreated,
            DomainEvent::TaskCreated(_) => EventKind::TaskCreated,
            DomainEvent::TaskUpdated(_) => EventKind::TaskUpdated,
        }
    }

    pub fn owner_id(&self) -> &str {
        match self {
            DomainEvent::ProjectCreated(p) => &p.owner_id,
            DomainEvent::TaskCreated(t) | DomainEvent::TaskUpdated(t) => &t.owner_id,
        }
    }

    pub fn project_id(&self) -> ProjectId {
        match self {
            DomainEvent::ProjectCreated(p) => p.id,
            DomainEvent::TaskCreated(t) | DomainEvent::TaskUpdated(t) => t.project_id,
        }
    }

    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            DomainEvent::ProjectCreated(_) => None,
            DomainEvent::TaskCreated(t) | DomainEvent::TaskUpdated(t) => Some(t.id),
        }
    }

    /// Timestamp of the state change the event describes (epoch ms)
    pub fn occurred_at(&self) -> i64 {
        match self {
            DomainEvent::ProjectCreated(p) => p.created_at,
            DomainEvent::TaskCreated(t) => t.created_at,
            DomainEvent::TaskUpdated(t) => t.updated_at,
        }
    }

    /// Partition key: the id of the entity the event is about
    pub fn entity_key(&self) -> String {
        match self.task_id() {
            Some(task_id) => format!("task-{}", task_id),
            None => format!("project-{}", self.project_id()),
        }
    }
}
