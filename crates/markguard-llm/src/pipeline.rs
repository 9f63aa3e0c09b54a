//! Resilient request pipeline
//!
//! Wraps a [`CompletionTransport`] with a per-attempt timeout, a retry policy
//! that retries only timeouts, and an attempt counter shared across tasks.
//! Whatever happens, the caller gets either the completion text or an
//! [`AssessmentError`] whose text can be shown in place of a verdict.

use crate::retry::{RetryError, RetryPolicy};
use crate::LlmError;
use markguard_domain::traits::CompletionTransport;
use markguard_domain::{AssessmentError, EndpointRoute};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Default cap on a single attempt
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(120);

/// Counts outbound attempts across every task sharing it
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicU64>);

impl CallCounter {
    /// Create a counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attempt, returning the new total
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Attempts recorded so far
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Timeout, retry and accounting around one transport
#[derive(Debug, Clone)]
pub struct RequestPipeline<T> {
    transport: T,
    policy: RetryPolicy,
    attempt_timeout: Duration,
    counter: CallCounter,
}

impl<T> RequestPipeline<T>
where
    T: CompletionTransport<Error = LlmError>,
{
    /// Pipeline with the default policy (3 attempts, 2s doubling) and a 120s cap
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            counter: CallCounter::new(),
        }
    }

    /// Replace the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the per-attempt timeout
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Share an existing counter
    pub fn with_counter(mut self, counter: CallCounter) -> Self {
        self.counter = counter;
        self
    }

    /// Attempt counter
    pub fn counter(&self) -> &CallCounter {
        &self.counter
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `prompt` to `route`, retrying timeouts
    ///
    /// Non-timeout failures are surfaced after one attempt as
    /// [`AssessmentError::Network`]; running out of attempts on timeouts gives
    /// [`AssessmentError::TimedOut`].
    pub async fn invoke(&self, route: &EndpointRoute, prompt: &str) -> Result<String, AssessmentError> {
        self.send(route, prompt, None).await
    }

    /// Like [`invoke`](Self::invoke), also counting attempts on `tally`
    pub async fn invoke_tallied(
        &self,
        route: &EndpointRoute,
        prompt: &str,
        tally: &CallCounter,
    ) -> Result<String, AssessmentError> {
        self.send(route, prompt, Some(tally)).await
    }

    async fn send(
        &self,
        route: &EndpointRoute,
        prompt: &str,
        tally: Option<&CallCounter>,
    ) -> Result<String, AssessmentError> {
        let result = self
            .policy
            .run(
                |attempt| async move {
                    let total = self.counter.increment();
                    if let Some(tally) = tally {
                        tally.increment();
                    }
                    debug!(
                        "Sending request to route {} (attempt {}, call #{})",
                        route.id, attempt, total
                    );
                    match tokio::time::timeout(
                        self.attempt_timeout,
                        self.transport.complete(route, prompt),
                    )
                    .await
                    {
                        Ok(outcome) => outcome,
                        Err(_) => Err(LlmError::Timeout),
                    }
                },
                LlmError::is_timeout,
            )
            .await;

        result.map_err(|e| match e {
            RetryError::Fatal { error: err, .. } => {
                error!("Error requesting trademark conflict assessment: {}", err);
                AssessmentError::Network {
                    detail: err.to_string(),
                }
            }
            RetryError::Exhausted { attempts, .. } => AssessmentError::TimedOut { attempts },
        })
    }
}
