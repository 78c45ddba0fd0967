// Event wire format
//
// Flat fields are what downstream analytics consumers route and aggregate
// on; `payload` carries the full entity snapshot.

use serde::{Deserialize, Serialize};
use taskboard_core::domain::DomainEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event: String,
    pub owner_id: String,
    pub project_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub occurred_at: i64, // epoch ms
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    pub fn from_event(event: &DomainEvent) -> Result<Self, serde_json::Error> {
        let (name, title, status, payload) = match event {
            DomainEvent::ProjectCreated(project) => (
                Some(project.name.clone()),
                None,
                None,
                serde_json::to_value(project)?,
            ),
            DomainEvent::TaskCreated(task) | DomainEvent::TaskUpdated(task) => (
                None,
                Some(task.title.clone()),
                Some(task.status.to_string()),
                serde_json::to_value(task)?,
            ),
        };

        Ok(Self {
            event: event.kind().to_string(),
            owner_id: event.owner_id().to_string(),
            project_id: event.project_id(),
            task_id: event.task_id(),
            name,
            title,
            status,
            occurred_at: event.occurred_at(),
            payload,
        })
    }
}
