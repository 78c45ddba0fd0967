// Deadline enforcement for outbound calls

use crate::error::{AppError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

tokio::task_local! {
    static REQUEST_DEADLINE: Instant;
}

/// Run `fut` with `deadline` as the caller's overall deadline
///
/// Inside the scope, inline event publishing never waits past the deadline.
pub async fn with_request_deadline<F: Future>(deadline: Instant, fut: F) -> F::Output {
    REQUEST_DEADLINE.scope(deadline, fut).await
}

/// Time left before the enclosing request deadline, if one is set
pub(crate) fn remaining_request_time() -> Option<Duration> {
    REQUEST_DEADLINE
        .try_with(|deadline| deadline.saturating_duration_since(Instant::now()))
        .ok()
}

/// Await `fut`, giving up with `AppError::Timeout` once `limit` elapses
///
/// A repository write that is abandoned here may still complete on the
/// storage side; rollback is left to the repository.
pub(crate) async fn bounded<T, F>(limit: Option<Duration>, operation: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
            AppError::Timeout(format!(
                "{} did not complete within {} ms",
                operation,
                limit.as_millis()
            ))
        })?,
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_passes_result_through() {
        let value = bounded(Some(Duration::from_secs(1)), "op", async { Ok(42) })
            .await
            .unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let result: Result<()> = bounded(Some(Duration::from_millis(10)), "slow op", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        match result {
            Err(AppError::Timeout(msg)) => assert!(msg.contains("slow op")),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remaining_request_time_only_inside_scope() {
        assert_eq!(remaining_request_time(), None);

        let deadline = Instant::now() + Duration::from_secs(3);
        let left = with_request_deadline(deadline, async { remaining_request_time() })
            .await
            .unwrap();
        assert!(left <= Duration::from_secs(3));
        assert!(left > Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_unbounded_keeps_inner_error() {
        let result: Result<()> =
            bounded(None, "op", async { Err(AppError::Persistence("x".into())) }).await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }
}
