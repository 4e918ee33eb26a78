//! Generation Retry Policy
//!
//! A single policy value object consumed uniformly by every
//! generation-bearing stage, replacing ad hoc retry loops. Transient
//! failures (timeouts, network hiccups, rate limits) are retried with
//! jittered exponential backoff; non-retryable errors (auth, bad request)
//! fail fast. An exhausted budget surfaces the last error, which aborts the
//! whole run.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::constants::retry as retry_constants;
use crate::types::{MillError, Result};

/// Retry policy for generation calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts (1 initial + retries)
    pub max_attempts: usize,
    /// Base delay for exponential backoff
    pub base_delay: Duration,
    /// Ceiling on any single delay
    pub max_delay: Duration,
    /// Backoff multiplier
    pub backoff_factor: f32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: retry_constants::DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(retry_constants::BASE_DELAY_MS),
            max_delay: Duration::from_secs(retry_constants::MAX_DELAY_SECS),
            backoff_factor: retry_constants::BACKOFF_FACTOR,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_secs(config.max_delay_secs),
            backoff_factor: config.backoff_factor,
        }
    }

    /// Run `operation` until it succeeds, the error is non-retryable, or the
    /// attempt budget is exhausted. The last error is returned unchanged so
    /// the caller sees the real failure category.
    pub async fn run<T, F, Fut>(&self, operation_name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_err: Option<MillError> = None;

        for attempt in 1..=self.max_attempts {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(
                            operation = operation_name,
                            attempt, "generation call recovered"
                        );
                    }
                    return Ok(value);
                }
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.delay_for(attempt, &err);
                    warn!(
                        operation = operation_name,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "generation call failed, retrying"
                    );
                    last_err = Some(err);
                    sleep(delay).await;
                }
                Err(err) => {
                    warn!(
                        operation = operation_name,
                        attempt,
                        error = %err,
                        "generation call failed, not retrying"
                    );
                    return Err(err);
                }
            }
        }

        // Only reachable when max_attempts is 0; treat as exhausted budget.
        Err(last_err.unwrap_or_else(|| {
            MillError::Config("retry policy allows zero attempts".to_string())
        }))
    }

    /// Jittered exponential backoff, honoring any provider-suggested wait
    fn delay_for(&self, attempt: usize, err: &MillError) -> Duration {
        if let MillError::Llm(llm) = err
            && let Some(retry_after) = llm.retry_after
        {
            return retry_after.min(self.max_delay);
        }

        let exp = self.backoff_factor.powi(attempt.saturating_sub(1) as i32);
        let base = self.base_delay.as_millis() as f32 * exp;
        let jitter = rand::rng().random_range(0.0..0.25_f32);
        let with_jitter = base * (1.0 + jitter);
        Duration::from_millis(with_jitter as u64).min(self.max_delay)
    }
}
