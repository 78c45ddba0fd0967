// Best-effort event dispatch
//
// A durable write is acknowledged regardless of what happens here: publish
// errors and timeouts are logged and dropped.

use super::deadline::remaining_request_time;
use super::options::{PublishMode, ServiceOptions};
use crate::domain::DomainEvent;
use crate::port::{EventPublisher, PublishError};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Time kept free for writing the response after an inline publish
const RESPONSE_RESERVE: Duration = Duration::from_millis(100);

#[derive(Clone)]
pub struct EventNotifier {
    publisher: Arc<dyn EventPublisher>,
    mode: PublishMode,
    timeout: Duration,
}

impl EventNotifier {
    pub fn new(publisher: Arc<dyn EventPublisher>, options: &ServiceOptions) -> Self {
        Self {
            publisher,
            mode: options.publish_mode,
            timeout: options.publish_timeout,
        }
    }

    /// Hand `event` to the publisher; never fails
    ///
    /// Inline publishing is awaited only while it fits inside the enclosing
    /// request deadline (see [`super::with_request_deadline`]). Past that
    /// point it carries on in the background so the already committed write
    /// is still acknowledged.
    pub async fn notify(&self, event: DomainEvent) {
        match self.mode {
            PublishMode::Inline => match inline_budget(self.timeout) {
                None => publish_isolated(self.publisher.as_ref(), self.timeout, event).await,
                Some(budget) => {
                    let mut handle = self.spawn_publish(event);
                    if tokio::time::timeout(budget, &mut handle).await.is_err() {
                        debug!(
                            budget_ms = budget.as_millis() as u64,
                            "Request deadline near, publish continues in background"
                        );
                    }
                }
            },
            PublishMode::Detached => {
                self.spawn_publish(event);
            }
        }
    }

    fn spawn_publish(&self, event: DomainEvent) -> JoinHandle<()> {
        let publisher = Arc::clone(&self.publisher);
        let timeout = self.timeout;
        tokio::spawn(async move {
            publish_isolated(publisher.as_ref(), timeout, event).await;
        })
    }
}

/// How long an inline publish may hold the caller
///
/// `None` when the full publish timeout fits before the request deadline
/// (or there is no deadline); otherwise the time left minus the response
/// reserve.
fn inline_budget(publish_timeout: Duration) -> Option<Duration> {
    let usable = remaining_request_time()?.saturating_sub(RESPONSE_RESERVE);
    (usable < publish_timeout).then_some(usable)
}

async fn publish_isolated(publisher: &dyn EventPublisher, timeout: Duration, event: DomainEvent) {
    let outcome = match tokio::time::timeout(timeout, publisher.publish(&event)).await {
        Ok(result) => result,
        Err(_) => Err(PublishError::Timeout(timeout.as_millis() as u64)),
    };

    match outcome {
        Ok(()) => debug!(kind = %event.kind(), key = %event.entity_key(), "Event published"),
        Err(e) => warn!(
            kind = %event.kind(),
            key = %event.entity_key(),
            error = %e,
            "Event publish failed, continuing without notification"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewProject, Project};
    use crate::application::with_request_deadline;
    use crate::port::MockEventPublisher;
    use async_trait::async_trait;
    use tokio::time::Instant;

    /// Publisher whose calls never complete
    struct HangingPublisher;

    #[async_trait]
    impl EventPublisher for HangingPublisher {
        async fn publish(&self, _event: &DomainEvent) -> Result<(), PublishError> {
            std::future::pending().await
        }

        fn name(&self) -> &'static str {
            "hanging"
        }
    }

    fn event() -> DomainEvent {
        DomainEvent::ProjectCreated(Project::from_new(
            1,
            NewProject::new("u1", "P1", "", 0).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_inline_failure_is_swallowed() {
        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .times(1)
            .returning(|_| Err(PublishError::Unavailable("broker down".into())));

        let notifier = EventNotifier::new(Arc::new(publisher), &ServiceOptions::default());
        notifier.notify(event()).await;
    }

    #[tokio::test]
    async fn test_detached_publish_runs_in_background() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let tx = std::sync::Mutex::new(Some(tx));

        let mut publisher = MockEventPublisher::new();
        publisher.expect_publish().times(1).returning(move |_| {
            if let Some(tx) = tx.lock().unwrap().take() {
                let _ = tx.send(());
            }
            Ok(())
        });

        let options = ServiceOptions {
            publish_mode: PublishMode::Detached,
            ..ServiceOptions::default()
        };
        let notifier = EventNotifier::new(Arc::new(publisher), &options);
        notifier.notify(event()).await;

        tokio::time::timeout(Duration::from_secs(1), rx)
            .await
            .expect("detached publish never ran")
            .unwrap();
    }

    #[tokio::test]
    async fn test_inline_publish_returns_before_request_deadline() {
        let options = ServiceOptions {
            publish_timeout: Duration::from_secs(5),
            ..ServiceOptions::default()
        };
        let notifier = EventNotifier::new(Arc::new(HangingPublisher), &options);

        let deadline = Instant::now() + Duration::from_millis(300);
        with_request_deadline(deadline, notifier.notify(event())).await;

        assert!(Instant::now() < deadline);
    }

    #[tokio::test]
    async fn test_inline_publish_is_awaited_when_it_fits() {
        let mut publisher = MockEventPublisher::new();
        publisher.expect_publish().times(1).returning(|_| Ok(()));
        let notifier = EventNotifier::new(Arc::new(publisher), &ServiceOptions::default());

        let deadline = Instant::now() + Duration::from_secs(30);
        with_request_deadline(deadline, notifier.notify(event())).await;
    }
}
