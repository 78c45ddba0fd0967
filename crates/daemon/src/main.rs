//! Taskboard - Main Entry Point
//! HTTP API over SQLite with best-effort event publishing

mod config;
mod telemetry;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

// Import workspace crates
use config::{EventSink, ServiceConfig};
use taskboard_api_http::{AppState, HttpServer};
use taskboard_core::application::{ProjectService, ProjectServiceAccessor, TaskService};
use taskboard_core::port::{EventPublisher, NoopEventPublisher, SystemTimeProvider, TimeProvider};
use taskboard_infra_events::{BroadcastEventPublisher, KafkaRestConfig, KafkaRestPublisher};
use taskboard_infra_sqlite::{
    create_pool, run_migrations, SqliteProjectRepository, SqliteTaskRepository,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration (before logging so format errors are fatal early)
    let config = ServiceConfig::from_env().context("Invalid configuration")?;

    // 2. Initialize logging
    telemetry::init_logging(config.log_format).context("Failed to initialize logging")?;

    info!("Taskboard v{} starting...", taskboard_core::VERSION);

    // 3. Initialize database
    ensure_db_dir(&config.database_url)?;
    info!(database_url = %config.database_url, "Initializing database...");

    let pool = create_pool(&config.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let publisher = build_publisher(&config.event_sink, config.service.publish_timeout);
    info!(
        publisher = publisher.name(),
        mode = ?config.service.publish_mode,
        "Event publisher ready"
    );

    let projects = Arc::new(ProjectService::new(
        Arc::new(SqliteProjectRepository::new(pool.clone())),
        publisher.clone(),
        time_provider.clone(),
        config.service,
    ));
    let tasks = Arc::new(TaskService::new(
        Arc::new(SqliteTaskRepository::new(pool.clone())),
        Arc::new(ProjectServiceAccessor::new(projects.clone())),
        publisher,
        time_provider,
        config.service,
    ));

    // 5. Start HTTP server
    let server = HttpServer::bind(config.http.clone(), AppState { projects, tasks })
        .await
        .with_context(|| {
            format!("Failed to bind to {}:{}", config.http.host, config.http.port)
        })?;

    info!("System ready. Press Ctrl+C to shutdown");

    // 6. Serve until a shutdown signal, then drain
    server.run(shutdown_signal()).await.context("HTTP server failed")?;

    pool.close().await;
    info!("Shutdown complete.");

    Ok(())
}

/// Pick the event publisher for the configured sink
///
/// A publisher that cannot be built degrades to the no-op publisher; the
/// service keeps running without events.
fn build_publisher(sink: &EventSink, publish_timeout: Duration) -> Arc<dyn EventPublisher> {
    match sink {
        EventSink::None => Arc::new(NoopEventPublisher),
        EventSink::KafkaRest { base_url, topic } => {
            let config = KafkaRestConfig {
                base_url: base_url.clone(),
                topic: topic.clone(),
                request_timeout: publish_timeout,
            };
            match KafkaRestPublisher::new(config) {
                Ok(publisher) => {
                    info!(endpoint = publisher.endpoint(), "Publishing events to Kafka REST proxy");
                    Arc::new(publisher)
                }
                Err(e) => {
                    warn!(error = %e, "Event publisher unavailable, continuing without events");
                    Arc::new(NoopEventPublisher)
                }
            }
        }
        EventSink::Broadcast => {
            let publisher = BroadcastEventPublisher::default();
            spawn_event_log_tap(&publisher);
            Arc::new(publisher)
        }
    }
}

/// Log every broadcast event; the in-process sink has no other consumer
fn spawn_event_log_tap(publisher: &BroadcastEventPublisher) {
    let mut rx = publisher.subscribe();
    tokio::spawn(async move {
        use tokio::sync::broadcast::error::RecvError;
        loop {
            match rx.recv().await {
                Ok(event) => info!(
                    kind = %event.kind(),
                    owner_id = %event.owner_id(),
                    project_id = event.project_id(),
                    task_id = ?event.task_id(),
                    "Domain event"
                ),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event log tap lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });
}

/// Create the parent directory of a file-backed database
fn ensure_db_dir(database_url: &str) -> Result<()> {
    if database_url.contains(":memory:") {
        return Ok(());
    }

    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);

    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create database directory {}", dir.display()))?;
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbuildable_publisher_falls_back_to_noop() {
        let sink = EventSink::KafkaRest {
            base_url: "http://localhost:8082".into(),
            topic: " ".into(),
        };
        assert_eq!(build_publisher(&sink, Duration::from_secs(1)).name(), "noop");
    }

    #[tokio::test]
    async fn test_sink_selection() {
        let timeout = Duration::from_secs(1);
        assert_eq!(build_publisher(&EventSink::None, timeout).name(), "noop");
        assert_eq!(build_publisher(&EventSink::Broadcast, timeout).name(), "broadcast");

        let kafka = EventSink::KafkaRest {
            base_url: "http://localhost:8082".into(),
            topic: "task-events".into(),
        };
        assert_eq!(build_publisher(&kafka, timeout).name(), "kafka-rest");
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let root = std::env::temp_dir().join(format!("taskboard-dir-{}", std::process::id()));
        let url = format!("sqlite://{}/nested/board.db", root.display());

        ensure_db_dir(&url).unwrap();
        assert!(root.join("nested").is_dir());

        std::fs::remove_dir_all(&root).unwrap();
        ensure_db_dir("sqlite::memory:").unwrap();
    }
}
