//! Service configuration from environment variables
//!
//! Read once at startup. Unset variables take their defaults; set but
//! unparsable ones abort startup.

use crate::telemetry::LogFormat;
use anyhow::{anyhow, bail, Result};
use std::str::FromStr;
use std::time::Duration;
use taskboard_api_http::HttpServerConfig;
use taskboard_core::application::{PublishMode, ServiceOptions};
use taskboard_infra_events::DEFAULT_TOPIC;

const DEFAULT_DB_URL: &str = "sqlite://~/.taskboard/taskboard.db";
const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_PUBLISH_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_REPOSITORY_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 20;

/// Where domain events go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSink {
    None,
    KafkaRest { base_url: String, topic: String },
    Broadcast,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database_url: String,
    pub http: HttpServerConfig,
    pub log_format: LogFormat,
    pub event_sink: EventSink,
    pub service: ServiceOptions,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = shellexpand::tilde(
            &var("TASKBOARD_DB_PATH").unwrap_or_else(|| DEFAULT_DB_URL.to_string()),
        )
        .into_owned();

        let http = HttpServerConfig {
            host: var("TASKBOARD_HTTP_HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string()),
            port: parse_or(var("PORT"), "PORT", DEFAULT_HTTP_PORT)?,
            request_timeout: millis_or(
                var("TASKBOARD_REQUEST_TIMEOUT_MS"),
                "TASKBOARD_REQUEST_TIMEOUT_MS",
                DEFAULT_REQUEST_TIMEOUT_MS,
            )?,
            shutdown_grace: Duration::from_secs(parse_or(
                var("TASKBOARD_SHUTDOWN_GRACE_SECS"),
                "TASKBOARD_SHUTDOWN_GRACE_SECS",
                DEFAULT_SHUTDOWN_GRACE_SECS,
            )?),
        };

        let log_format = parse_or(var("TASKBOARD_LOG_FORMAT"), "TASKBOARD_LOG_FORMAT", LogFormat::Pretty)?;

        let kafka_url = var("TASKBOARD_KAFKA_REST_URL");
        let sink_name = var("TASKBOARD_EVENT_SINK").unwrap_or_else(|| {
            let default = if kafka_url.is_some() { "kafka-rest" } else { "none" };
            default.to_string()
        });
        let event_sink = match sink_name.to_ascii_lowercase().as_str() {
            "none" => EventSink::None,
            "broadcast" => EventSink::Broadcast,
            "kafka-rest" => EventSink::KafkaRest {
                base_url: kafka_url.ok_or_else(|| {
                    anyhow!("TASKBOARD_EVENT_SINK=kafka-rest requires TASKBOARD_KAFKA_REST_URL")
                })?,
                topic: var("TASKBOARD_EVENT_TOPIC").unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            },
            other => bail!(
                "TASKBOARD_EVENT_SINK: unknown sink '{}', expected none, kafka-rest or broadcast",
                other
            ),
        };

        let repository_timeout = millis_or(
            var("TASKBOARD_REPOSITORY_TIMEOUT_MS"),
            "TASKBOARD_REPOSITORY_TIMEOUT_MS",
            DEFAULT_REPOSITORY_TIMEOUT_MS,
        )?;
        let service = ServiceOptions {
            // 0 disables the bound
            repository_timeout: (!repository_timeout.is_zero()).then_some(repository_timeout),
            publish_timeout: millis_or(
                var("TASKBOARD_PUBLISH_TIMEOUT_MS"),
                "TASKBOARD_PUBLISH_TIMEOUT_MS",
                DEFAULT_PUBLISH_TIMEOUT_MS,
            )?,
            publish_mode: parse_or(var("TASKBOARD_PUBLISH_MODE"), "TASKBOARD_PUBLISH_MODE", PublishMode::Inline)?,
        };

        if service.publish_timeout >= http.request_timeout {
            bail!(
                "TASKBOARD_PUBLISH_TIMEOUT_MS ({} ms) must be below TASKBOARD_REQUEST_TIMEOUT_MS ({} ms)",
                service.publish_timeout.as_millis(),
                http.request_timeout.as_millis()
            );
        }

        Ok(Self {
            database_url,
            http,
            log_format,
            event_sink,
            service,
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("invalid value for {}: '{}' ({})", key, raw, e)),
    }
}

fn millis_or(raw: Option<String>, key: &str, default_ms: u64) -> Result<Duration> {
    parse_or(raw, key, default_ms).map(Duration::from_millis)
}
