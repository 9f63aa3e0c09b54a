//! Retry policy with backoff
//!
//! A policy is independent of what it retries: the caller supplies the
//! operation and a predicate deciding which failures are worth another
//! attempt.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

/// Default number of attempts, the first one included
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the second attempt
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(2);

/// Wait between consecutive attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Retry immediately
    None,

    /// Same delay before every retry
    Fixed(Duration),

    /// `base * factor^(n-1)` before retry `n`
    Exponential {
        /// Delay before the first retry
        base: Duration,
        /// Growth factor per retry
        factor: u32,
    },
}

impl Backoff {
    /// Delay after failed attempt number `attempt` (1-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { base, factor } => {
                let multiplier = factor.saturating_pow(attempt.saturating_sub(1));
                base.saturating_mul(multiplier)
            }
        }
    }
}

/// Why a retried operation gave up
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    /// A failure the predicate refused to retry
    #[error("{error}")]
    Fatal {
        /// The failure
        error: E,
        /// Attempts made, the failing one included
        attempts: u32,
    },

    /// Every attempt failed with a retryable error
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted {
        /// Failure of the final attempt
        last: E,
        /// Attempts made
        attempts: u32,
    },
}

/// Bounded retry with backoff
///
/// # Examples
///
/// ```
/// use markguard_llm::{Backoff, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 3);
/// assert_eq!(policy.backoff.delay(1), Duration::from_secs(2));
/// assert_eq!(policy.backoff.delay(2), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included (at least 1 is always made)
    pub max_attempts: u32,

    /// Wait between attempts
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::exponential(DEFAULT_MAX_ATTEMPTS, DEFAULT_BASE_DELAY)
    }
}

impl RetryPolicy {
    /// Create a policy
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Doubling backoff starting at `base`
    pub fn exponential(max_attempts: u32, base: Duration) -> Self {
        Self::new(max_attempts, Backoff::Exponential { base, factor: 2 })
    }

    /// Run `op` until it succeeds, fails fatally, or the attempts run out
    ///
    /// `op` receives the 1-based attempt number.
    pub async fn run<T, E, F, Fut, P>(&self, mut op: F, is_retryable: P) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let err = match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !is_retryable(&err) {
                return Err(RetryError::Fatal {
                    error: err,
                    attempts: attempt,
                });
            }

            if attempt >= max_attempts {
                error!(
                    "Request failed after {} attempts due to timeout: {}",
                    max_attempts, err
                );
                return Err(RetryError::Exhausted {
                    last: err,
                    attempts: attempt,
                });
            }

            let delay = self.backoff.delay(attempt);
            warn!(
                "Timeout error. Retrying in {} seconds... (Attempt {}/{})",
                delay.as_secs(),
                attempt,
                max_attempts
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
