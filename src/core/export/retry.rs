//! Retry with exponential backoff
//!
//! Wraps a fallible async operation. Only errors classified as transient by
//! [`crate::domain::ShutterError::is_transient`] are retried; everything else is returned
//! on the first failure.

use crate::config::schema::RetryConfig;
use crate::domain::Result;
use std::future::Future;
use std::time::Duration;

/// Delay before the given retry (1-based)
pub fn backoff_delay(config: &RetryConfig, retry: usize) -> Duration {
    let exponent = retry.saturating_sub(1) as i32;
    let delay_ms = config.initial_delay_ms as f64 * config.backoff_multiplier.powi(exponent);
    let delay_ms = (delay_ms as u64).min(config.max_delay_ms);
    Duration::from_millis(delay_ms)
}

/// Runs `operation`, retrying transient failures up to `config.max_retries`
/// times.
pub async fn retry_with_backoff<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retries = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !e.is_transient() || retries >= config.max_retries {
                    return Err(e);
                }
                retries += 1;

                let delay = backoff_delay(config, retries);
                crate::log_retry_attempt!(retries, config.max_retries, operation_name, &e);
                tracing::debug!(delay_ms = delay.as_millis() as u64, "Backing off");

                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DownloadError, ShutterError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_config(max_retries: usize) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            backoff_multiplier: 2.0,
        }
    }

    #[test]
    fn test_backoff_delay_grows_and_caps() {
        let config = RetryConfig {
            max_retries: 5,
            initial_delay_ms: 100,
            max_delay_ms: 1000,
            backoff_multiplier: 2.0,
        };

        assert_eq!(backoff_delay(&config, 1), Duration::from_millis(100));
        assert_eq!(backoff_delay(&config, 2), Duration::from_millis(200));
        assert_eq!(backoff_delay(&config, 3), Duration::from_millis(400));
        assert_eq!(backoff_delay(&config, 10), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_transient_failures() {
        let attempts = AtomicUsize::new(0);
        let attempts = &attempts;

        let result = retry_with_backoff(&fast_config(3), "test", || async move {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(DownloadError::Timeout("slow".to_string()).into())
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_retries() {
        let attempts = AtomicUsize::new(0);
        let attempts = &attempts;

        let result: Result<()> = retry_with_backoff(&fast_config(2), "test", || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(DownloadError::ConnectionFailed("refused".to_string()).into())
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let attempts = AtomicUsize::new(0);
        let attempts = &attempts;

        let result: Result<()> = retry_with_backoff(&fast_config(5), "test", || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(DownloadError::FileNotFound("7".to_string()).into())
        })
        .await;

        assert!(matches!(
            result,
            Err(ShutterError::Download(DownloadError::FileNotFound(_)))
        ));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
