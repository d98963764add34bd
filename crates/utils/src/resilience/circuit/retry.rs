//! Retry logic for resilient operations.

use super::config::RetryConfig;
use super::state::CircuitBreaker;
use rampart_core::{Error, Result};
use std::future::Future;
use tokio::time::sleep;

/// Execute an operation with retry logic
///
/// Only errors accepted by `config.retry_on` are retried; anything else is
/// returned immediately.
pub async fn retry<F, Fut, T>(config: &RetryConfig, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    tracing::info!(retries = attempt, "operation succeeded after retrying");
                }
                return Ok(result);
            }
            Err(error) if attempt < config.max_retries && config.should_retry(&error) => {
                let delay = config.calculate_delay(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts = config.max_retries + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "operation failed, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(exhausted(error, attempt)),
        }
    }
}

fn exhausted(error: Error, retries: usize) -> Error {
    if retries == 0 {
        error
    } else {
        error.with_context("retries", retries)
    }
}

/// Retry inside one circuit breaker admission
///
/// The whole retry sequence is a single breaker outcome: exhausting the
/// retries records one failure, not one per attempt. A rejected admission
/// returns `CIRCUIT_OPEN` without invoking `operation`.
pub async fn retry_with_circuit_breaker<F, Fut, T>(
    retry_config: &RetryConfig,
    circuit_breaker: &CircuitBreaker,
    operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    circuit_breaker
        .call(|| retry(retry_config, operation))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::circuit::types::RetryOn;
    use rampart_core::codes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn fast_config(max_retries: usize) -> RetryConfig {
        RetryConfig {
            max_retries,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            jitter_factor: 0.0,
            retry_on: RetryOn::Network,
        }
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_network_errors() {
        let attempts = AtomicUsize::new(0);

        let result = retry(&fast_config(3), || async {
            if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(Error::network("api", "connection reset"))
            } else {
                Ok("done")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_retries() {
        let attempts = AtomicUsize::new(0);

        let result: Result<()> = retry(&fast_config(2), || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(Error::network("api", "down"))
        })
        .await;

        let error = result.unwrap_err();
        assert_eq!(error.code(), codes::NETWORK_ERROR);
        assert_eq!(error.context_value("retries"), Some("2"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_skips_non_retryable_errors() {
        let attempts = AtomicUsize::new(0);

        let result: Result<()> = retry(&fast_config(5), || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(Error::validation("bad input"))
        })
        .await;

        assert_eq!(result.unwrap_err().code(), codes::VALIDATION_ERROR);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
