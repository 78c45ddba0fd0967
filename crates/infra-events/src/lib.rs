// Taskboard Infrastructure - Event Bus Adapters
// Implements: EventPublisher

mod broadcast;
mod envelope;
mod kafka_rest;

pub use broadcast::BroadcastEventPublisher;
pub use envelope::EventEnvelope;
pub use kafka_rest::{KafkaRestConfig, KafkaRestPublisher, DEFAULT_TOPIC};
