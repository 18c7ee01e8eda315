//! Bounded, type-driven retry execution for agent operations.
//!
//! [`execute_with_retry`] drives an operation returning
//! `Outcome<T, AgentError>` through at most `max_retries + 1` attempts. The
//! error kind decides the transition: validation-class failures stop
//! immediately, cancellation aborts at attempt boundaries and during backoff,
//! and everything else retries until attempts run out. Backoff is capped
//! exponential with deterministic jitter.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::outcome::Outcome;

/// Cooperative cancellation handle checked once per retry attempt.
///
/// Cancellation is observed at attempt boundaries and during backoff delays;
/// an in-flight operation is never interrupted mid-call. Clones share state.
#[derive(Clone, Debug)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns true if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // wait_for returns immediately when already cancelled; the sender is
        // held by self, so the channel cannot close while we wait.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

/// Backoff shape applied between retry attempts.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Delay before the first retry; doubles each attempt.
    pub base_delay: Duration,
    /// Cap applied to every computed delay.
    pub max_delay: Duration,
    /// Jitter amplitude as a percentage of the capped delay (0-100).
    pub jitter_percent: u8,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            jitter_percent: 10,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given shape.
    pub fn new(base_delay: Duration, max_delay: Duration, jitter_percent: u8) -> Self {
        Self {
            base_delay,
            max_delay,
            jitter_percent: jitter_percent.min(100),
        }
    }

    /// Policy with no delays, for tests and callers that pace themselves.
    pub fn immediate() -> Self {
        Self {
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter_percent: 0,
        }
    }

    /// Computes the backoff delay before the given 1-based retry attempt.
    ///
    /// `base_delay * 2^(attempt - 1)`, capped at `max_delay`, with
    /// deterministic jitter so tests stay reproducible.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return self.base_delay;
        }

        let exponent = (attempt - 1).min(31);
        let multiplier = 1u64 << exponent;
        let base_millis = self.base_delay.as_millis() as u64;
        let capped_millis = base_millis
            .saturating_mul(multiplier)
            .min(self.max_delay.as_millis() as u64);

        let jitter_range = (capped_millis as f64 * self.jitter_percent as f64) / 100.0;
        let jitter = Self::deterministic_jitter(attempt, jitter_range);

        let final_millis = (capped_millis as i64 + jitter).max(0) as u64;
        Duration::from_millis(final_millis)
    }

    /// Alternating, attempt-scaled jitter: pseudo-random but reproducible.
    fn deterministic_jitter(attempt: u32, jitter_range: f64) -> i64 {
        let sign = if attempt % 2 == 0 { 1.0 } else { -1.0 };
        let factor = ((attempt % 5) as f64 + 1.0) / 5.0;
        (jitter_range * sign * factor) as i64
    }
}

/// Executes an operation with bounded retry under the default policy.
///
/// The operation is invoked up to `max_retries + 1` times. Success returns
/// immediately. An error whose kind is non-retryable (validation-class or
/// cancellation) returns immediately regardless of remaining attempts. A
/// cancelled token aborts before the next attempt and during any backoff
/// delay, yielding a `CANCELLED` error. Exhausted attempts return the last
/// observed error.
pub async fn execute_with_retry<T, F, Fut>(
    cancel: &CancelToken,
    operation: F,
    max_retries: u32,
) -> Outcome<T, AgentError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Outcome<T, AgentError>>,
{
    execute_with_retry_policy(cancel, operation, max_retries, &RetryPolicy::default()).await
}

/// Executes an operation with bounded retry under an explicit backoff policy.
pub async fn execute_with_retry_policy<T, F, Fut>(
    cancel: &CancelToken,
    mut operation: F,
    max_retries: u32,
    policy: &RetryPolicy,
) -> Outcome<T, AgentError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Outcome<T, AgentError>>,
{
    let mut last_error: Option<AgentError> = None;

    for attempt in 0..=max_retries {
        match operation().await {
            Outcome::Ok(value) => {
                debug!(attempt, "operation succeeded");
                return Outcome::Ok(value);
            }
            Outcome::Err(err) => {
                if !err.is_retryable() {
                    warn!(kind = err.kind.code(), "non-retryable failure, giving up");
                    return Outcome::Err(err);
                }
                last_error = Some(err);
            }
        }

        if cancel.is_cancelled() {
            return Outcome::Err(AgentError::cancelled("operation cancelled"));
        }

        if attempt < max_retries {
            let delay = policy.delay_for_attempt(attempt + 1);
            debug!(
                attempt = attempt + 1,
                max_attempts = max_retries + 1,
                delay_ms = delay.as_millis() as u64,
                "retrying after backoff"
            );
            tokio::select! {
                _ = sleep(delay) => {}
                _ = cancel.cancelled() => {
                    return Outcome::Err(AgentError::cancelled("operation cancelled"));
                }
            }
        }
    }

    // Loop ran at least once, so a retryable error was recorded.
    Outcome::Err(last_error.expect("retry loop exited without recording an error"))
}
