use crate::weather_data::error::WeatherDataError;
use log::warn;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Longest pause between two attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(120);

/// Distinguishes failures worth another attempt from ones that will not improve.
#[derive(Debug)]
pub enum RetryError {
    /// Connection problems, timeouts and 500/502/504 responses.
    Retryable(WeatherDataError),
    /// Everything else, e.g. a 400 for a malformed request.
    NonRetryable(WeatherDataError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Backoff before retry `n` (0-based) is `backoff_factor * 2^n` seconds.
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 5,
            backoff_factor: 0.2,
        }
    }
}

impl RetryPolicy {
    pub fn backoff(&self, retry: u32) -> Duration {
        let seconds = self.backoff_factor * 2f64.powi(retry as i32);
        Duration::try_from_secs_f64(seconds)
            .unwrap_or(MAX_BACKOFF)
            .min(MAX_BACKOFF)
    }
}

/// Runs `func` until it succeeds, fails with a non-retryable error, or the policy's
/// retries are used up.
pub async fn with_retry<F, Fut, T>(
    url: &str,
    policy: &RetryPolicy,
    func: F,
) -> Result<T, WeatherDataError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, RetryError>>,
{
    let mut retry = 0;
    loop {
        match func().await {
            Ok(result) => return Ok(result),
            Err(RetryError::NonRetryable(err)) => return Err(err),
            Err(RetryError::Retryable(err)) if retry >= policy.max_retries => {
                return Err(WeatherDataError::RetriesExhausted {
                    url: url.to_string(),
                    attempts: retry + 1,
                    source: Box::new(err),
                });
            }
            Err(RetryError::Retryable(err)) => {
                let delay = policy.backoff(retry);
                warn!(
                    "Retry {}/{} for {} after {:?}: {}",
                    retry + 1,
                    policy.max_retries,
                    url,
                    delay,
                    err
                );
                sleep(delay).await;
                retry += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn instant_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            backoff_factor: 0.0,
        }
    }

    fn transient() -> WeatherDataError {
        WeatherDataError::InvalidInterval(0)
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::from_millis(200));
        assert_eq!(policy.backoff(1), Duration::from_millis(400));
        assert_eq!(policy.backoff(2), Duration::from_millis(800));
        assert_eq!(policy.backoff(20), MAX_BACKOFF);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = with_retry("u", &instant_policy(5), || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(RetryError::Retryable(transient()))
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 6);
        match result {
            Err(WeatherDataError::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 6),
            other => panic!("expected RetriesExhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retry("u", &instant_policy(5), || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(RetryError::Retryable(transient()))
            } else {
                Ok("done")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_stops_immediately() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = with_retry("u", &instant_policy(5), || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(RetryError::NonRetryable(transient()))
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(WeatherDataError::InvalidInterval(0))));
    }
}
