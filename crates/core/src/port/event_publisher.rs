// Event Publisher Port (Interface)

use crate::domain::DomainEvent;
use async_trait::async_trait;
use thiserror::Error;

/// Publish failure
///
/// Never surfaced to service callers; the notifier logs and discards it.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("event bus unavailable: {0}")]
    Unavailable(String),

    #[error("event rejected by bus (status {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("publish timed out after {0} ms")]
    Timeout(u64),
}

/// Fire-and-forget emitter of domain events
///
/// Implementations must tolerate concurrent use. The services behave
/// identically whether the real publisher or [`NoopEventPublisher`] is wired.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &DomainEvent) -> Result<(), PublishError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Publisher used when no event bus is configured or reachable
pub struct NoopEventPublisher;

#[async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), PublishError> {
        tracing::trace!(kind = %event.kind(), "Event bus disabled, dropping event");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
