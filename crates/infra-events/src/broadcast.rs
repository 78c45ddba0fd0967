// In-process event fan-out using tokio broadcast channels
//
// Events are lost on restart and slow receivers drop old events; this is
// acceptable because events are advisory.

use async_trait::async_trait;
use taskboard_core::domain::DomainEvent;
use taskboard_core::port::{EventPublisher, PublishError};
use tokio::sync::broadcast;
use tracing::debug;

/// Default channel capacity (events buffered per lagging receiver)
const DEFAULT_CAPACITY: usize = 1024;

#[derive(Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<DomainEvent>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to all events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), PublishError> {
        // send() only fails when nobody is listening
        match self.sender.send(event.clone()) {
            Ok(receivers) => debug!(kind = %event.kind(), receivers, "Event broadcast"),
            Err(_) => debug!(kind = %event.kind(), "No subscribers listening to event"),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "broadcast"
    }
}
