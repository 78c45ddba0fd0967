// Kafka REST Proxy publisher
//
// Produces one record per event to `{base_url}/topics/{topic}` using the
// v2 JSON embedded format. The record key is the entity key so all events
// about one task land on the same partition.

use crate::envelope::EventEnvelope;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use taskboard_core::domain::DomainEvent;
use taskboard_core::port::{EventPublisher, PublishError};
use tracing::debug;

pub const DEFAULT_TOPIC: &str = "task-events";

const RECORDS_CONTENT_TYPE: &str = "application/vnd.kafka.json.v2+json";
const PROXY_ACCEPT: &str = "application/vnd.kafka.v2+json";

/// Longest response body kept in a `Rejected` error
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone)]
pub struct KafkaRestConfig {
    pub base_url: String,
    pub topic: String,
    pub request_timeout: Duration,
}

impl KafkaRestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            topic: DEFAULT_TOPIC.to_string(),
            request_timeout: Duration::from_secs(2),
        }
    }
}

pub struct KafkaRestPublisher {
    client: Client,
    endpoint: String,
}

impl KafkaRestPublisher {
    pub fn new(config: KafkaRestConfig) -> Result<Self, PublishError> {
        if config.topic.trim().is_empty() {
            return Err(PublishError::Unavailable("topic must not be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PublishError::Unavailable(format!("http client: {}", e)))?;

        let endpoint = format!(
            "{}/topics/{}",
            config.base_url.trim_end_matches('/'),
            config.topic
        );

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn clip(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    body
}

#[async_trait]
impl EventPublisher for KafkaRestPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), PublishError> {
        let envelope = EventEnvelope::from_event(event)?;
        let body = serde_json::to_vec(&json!({
            "records": [{ "key": event.entity_key(), "value": envelope }]
        }))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, RECORDS_CONTENT_TYPE)
            .header(ACCEPT, PROXY_ACCEPT)
            .body(body)
            .send()
            .await
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body: clip(body),
            });
        }

        debug!(kind = %event.kind(), key = %event.entity_key(), "Event produced");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "kafka-rest"
    }
}
