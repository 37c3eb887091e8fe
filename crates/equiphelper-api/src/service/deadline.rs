use std::future::Future;
use std::time::Duration;

/// Result of an external call bounded by a deadline
#[derive(Debug)]
pub enum CallOutcome<T> {
    Success(T),
    Timeout,
    Error(anyhow::Error),
}

/// Await `fut` for at most `budget`
pub async fn with_deadline<T, F>(budget: Duration, fut: F) -> CallOutcome<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::time::timeout(budget, fut).await {
        Ok(Ok(value)) => CallOutcome::Success(value),
        Ok(Err(e)) => CallOutcome::Error(e),
        Err(_) => CallOutcome::Timeout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_within_budget() {
        let outcome = with_deadline(Duration::from_millis(100), async { Ok(7) }).await;
        assert!(matches!(outcome, CallOutcome::Success(7)));
    }

    #[tokio::test]
    async fn test_error_is_kept() {
        let outcome: CallOutcome<()> =
            with_deadline(Duration::from_millis(100), async { Err(anyhow::anyhow!("boom")) }).await;
        match outcome {
            CallOutcome::Error(e) => assert_eq!(e.to_string(), "boom"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_future_times_out() {
        let outcome = with_deadline(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await;
        assert!(matches!(outcome, CallOutcome::Timeout));
    }
}
