use std::time::Duration;
use std::future::Future;

use super::classification::ErrorClassification;
use super::types::HoundError;
use tracing::warn;

impl ErrorClassification {
    /// Calculate the retry delay for this error classification based on the
    /// current attempt number (0-indexed).
    ///
    /// - StoreBusyError: 50ms * 2^attempt + random jitter (0-50ms), capped at 2s
    /// - Default: 100ms * 2^attempt, capped at 2s
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let base_ms = match self.error_type {
            "StoreBusyError" => {
                let jitter: u64 = rand::random::<u64>() % 50;
                50u64.saturating_mul(1u64 << attempt.min(10)) + jitter
            }
            _ => 100u64.saturating_mul(1u64 << attempt.min(10)),
        };
        Duration::from_millis(base_ms.min(2_000))
    }
}

/// Retry configuration for store writes.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retries: 5 }
    }
}

/// Execute an async operation with retry logic.
///
/// Retries only if the error is classified as retryable and we haven't
/// exceeded max_retries.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, HoundError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, HoundError>>,
{
    let max_attempts = config.max_retries + 1;
    let mut last_error = None;

    for attempt in 0..max_attempts {
        match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let classification = e.classify();

                if !classification.retryable || attempt + 1 >= max_attempts {
                    if classification.retryable {
                        warn!(
                            operation = operation_name,
                            attempt = attempt + 1,
                            max = max_attempts,
                            "Max retries exhausted"
                        );
                    }
                    return Err(e);
                }

                let delay = classification.retry_delay(attempt);
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    max = max_attempts,
                    error_type = classification.error_type,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying after error"
                );

                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| HoundError::Internal("Retry loop exited unexpectedly".into())))
}
