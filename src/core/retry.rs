//! Exponential backoff with jitter for flaky async calls

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// How hard to retry a failing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryOptions {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    /// Fractional jitter applied to each delay, e.g. 0.25 for ±25%
    pub jitter_percent: f64,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            jitter_percent: 0.25,
        }
    }
}

/// Delay before retrying after failed attempt `attempt` (1-indexed):
/// `round(base × 2^(attempt-1) × (1 + U(-jitter, +jitter)))`.
pub fn calculate_delay(attempt: u32, base_delay_ms: u64, jitter_percent: f64) -> u64 {
    let exponent = attempt.saturating_sub(1).min(63) as i32;
    let exponential = base_delay_ms as f64 * 2f64.powi(exponent);

    let jitter = jitter_percent.abs();
    let factor = if jitter > 0.0 {
        1.0 + rand::rng().random_range(-jitter..=jitter)
    } else {
        1.0
    };

    (exponential * factor).round().max(0.0) as u64
}

/// Run `op` until it succeeds or `options.max_attempts` is reached.
///
/// Returns the first success, or the error of the final attempt.
pub async fn retry_with_backoff<T, E, F, Fut>(op: F, options: &RetryOptions) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_with_backoff_notify(op, options, |_, _| {}).await
}

/// Like [`retry_with_backoff`], calling `on_retry(attempt, delay_ms)` after
/// each failed attempt that will be retried, before sleeping.
///
/// Dropping the returned future stops the loop at its next await point.
pub async fn retry_with_backoff_notify<T, E, F, Fut, N>(
    mut op: F,
    options: &RetryOptions,
    mut on_retry: N,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    N: FnMut(u32, u64),
{
    let max_attempts = options.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_attempts => {
                tracing::warn!(attempts = attempt, "Retries exhausted");
                return Err(err);
            }
            Err(_) => {
                let delay = calculate_delay(attempt, options.base_delay_ms, options.jitter_percent);
                tracing::debug!(attempt, delay_ms = delay, "Attempt failed, backing off");
                on_retry(attempt, delay);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                attempt += 1;
            }
        }
    }
}
