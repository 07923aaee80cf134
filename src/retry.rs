use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::{AdvisorError, Result};

/// Bounded exponential backoff with random jitter.
///
/// The delay before retry number `attempt` (counted from 0) is
/// `2^attempt * base_delay_ms` plus a jitter drawn from `[0, max_jitter_ms)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: usize,
    /// Delay unit in milliseconds, doubled on every failure.
    pub base_delay_ms: u64,
    /// Upper bound (exclusive) of the random jitter in milliseconds.
    pub max_jitter_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 1_000,
            max_jitter_ms: 1_000,
        }
    }
}

impl RetryPolicy {
    /// Exponential part of the delay, without jitter. Saturates at `u64::MAX`.
    pub fn base_delay_for(&self, attempt: usize) -> u64 {
        let exp = attempt.min(63) as u32;
        self.base_delay_ms.saturating_mul(1u64 << exp)
    }

    /// Full delay before the retry following failed `attempt`.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let jitter = if self.max_jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..self.max_jitter_ms)
        };
        Duration::from_millis(self.base_delay_for(attempt).saturating_add(jitter))
    }
}

/// Runs `op` until it succeeds or `policy.max_attempts` attempts have failed.
///
/// Every error is retried the same way. After the last attempt the error is
/// wrapped in [`AdvisorError::RetriesExhausted`].
pub async fn retry_with_backoff<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0usize;

    loop {
        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        attempt += 1;

        if attempt >= max_attempts {
            #[cfg(feature = "tracing")]
            tracing::error!(attempts = attempt, error = %err, "giving up on request");

            return Err(AdvisorError::RetriesExhausted {
                attempts: attempt,
                message: err.to_string(),
            });
        }

        let delay = policy.delay_for(attempt - 1);

        #[cfg(feature = "tracing")]
        tracing::warn!(
            attempt,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "request attempt failed, retrying"
        );

        sleep(delay).await;
    }
}
