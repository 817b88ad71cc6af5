use crate::error::BrokerError;
use std::future::Future;
use std::time::Duration;

/// Backoff durations for the two retryable conditions in §7's taxonomy.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub time_wait_retrying: Duration,
    pub time_wait_429_suspends: Duration,
}

/// Retries `op` forever on [`BrokerError::Transient`] (fixed `time_wait_retrying` backoff) and
/// on [`BrokerError::RateLimited`] (the longer `time_wait_429_suspends` backoff). Any other
/// error is returned immediately — this wrapper only ever traps the two conditions the broker
/// considers retryable, never `UnexpectedResponse`/`Cancelled`/transport/model errors.
pub async fn with_retry<F, Fut, T>(config: RetryConfig, mut op: F) -> Result<T, BrokerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BrokerError>>,
{
    loop {
        match op().await {
            Err(BrokerError::Transient) => {
                tracing::debug!(wait = ?config.time_wait_retrying, "retrying after transient condition");
                tokio::time::sleep(config.time_wait_retrying).await;
            }
            Err(BrokerError::RateLimited) => {
                tracing::debug!(wait = ?config.time_wait_429_suspends, "retrying after rate limit");
                tokio::time::sleep(config.time_wait_429_suspends).await;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn retries_transient_until_success() {
        let config = RetryConfig {
            time_wait_retrying: Duration::from_millis(1),
            time_wait_429_suspends: Duration::from_millis(1),
        };
        let attempts = AtomicUsize::new(0);
        let result = with_retry(config, || async {
            if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(BrokerError::Transient)
            } else {
                Ok(42)
            }
        })
        .await
        .unwrap();
        assert_eq!(result, 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn fatal_errors_are_not_retried() {
        let config = RetryConfig {
            time_wait_retrying: Duration::from_millis(1),
            time_wait_429_suspends: Duration::from_millis(1),
        };
        let attempts = AtomicUsize::new(0);
        let result: Result<(), BrokerError> = with_retry(config, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(BrokerError::UnexpectedResponse("bad body".to_string()))
        })
        .await;
        assert!(matches!(result, Err(BrokerError::UnexpectedResponse(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
