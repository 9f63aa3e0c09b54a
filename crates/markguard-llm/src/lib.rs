//! Markguard LLM Transport Layer
//!
//! Chat-completions transports and the resilient request pipeline used by the
//! conflict assessor.
//!
//! # Architecture
//!
//! This crate provides implementations of the `CompletionTransport` trait from
//! `markguard-domain`. A transport performs exactly one attempt; the
//! [`RequestPipeline`] layers per-attempt timeouts, retry with backoff and call
//! accounting on top of any transport.
//!
//! # Transports
//!
//! - `MockTransport`: Scripted replies for deterministic testing
//! - `AzureChatTransport`: Azure OpenAI chat-completions deployments
//!
//! # Examples
//!
//! ```
//! use markguard_domain::{EndpointRoute, RouteId};
//! use markguard_llm::{MockTransport, RequestPipeline};
//!
//! # tokio_test::block_on(async {
//! let pipeline = RequestPipeline::new(MockTransport::new("Conflict Level: Low"));
//! let route = EndpointRoute {
//!     id: RouteId::A,
//!     base_url: "http://localhost".to_string(),
//!     deployment: "gpt".to_string(),
//!     api_key: "key".to_string(),
//!     api_version: "2024-02-01".to_string(),
//! };
//!
//! let verdict = pipeline.invoke(&route, "assess this").await.unwrap();
//! assert_eq!(verdict, "Conflict Level: Low");
//! assert_eq!(pipeline.counter().get(), 1);
//! # });
//! ```

#![warn(missing_docs)]

pub mod azure;
pub mod config;
pub mod pipeline;
pub mod retry;

use markguard_domain::traits::CompletionTransport;
use markguard_domain::{EndpointRoute, RouteId};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use azure::AzureChatTransport;
pub use config::ServiceConfig;
pub use pipeline::{CallCounter, RequestPipeline};
pub use retry::{Backoff, RetryError, RetryPolicy};

/// Errors that can occur during a single completion attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The attempt did not finish in time
    #[error("Request timed out")]
    Timeout,

    /// Network or API communication error (connection failure, error status)
    #[error("Communication error: {0}")]
    Communication(String),

    /// The service answered with a body that could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing or malformed service configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl LlmError {
    /// Whether this failure is timeout-class and worth retrying
    pub fn is_timeout(&self) -> bool {
        matches!(self, LlmError::Timeout)
    }
}

/// One scripted outcome for [`MockTransport`]
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Succeed with this text
    Text(String),

    /// Fail with this error
    Fail(LlmError),

    /// Never complete; only a caller-side timeout ends the attempt
    Stall,
}

/// Mock transport for deterministic testing
///
/// Replies are chosen in this order: the first prompt rule whose needle the
/// prompt contains, then the next queued reply, then the default reply.
/// Clones share their script and call log.
///
/// # Examples
///
/// ```
/// use markguard_llm::{LlmError, MockReply, MockTransport};
///
/// let transport = MockTransport::new("Conflict Level: Low");
/// transport.respond_when("Status: Cancelled", MockReply::Text("Conflict Level: Low (cancelled)".into()));
/// transport.push_reply(MockReply::Fail(LlmError::Timeout));
/// assert_eq!(transport.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockTransport {
    default_reply: MockReply,
    rules: Arc<Mutex<Vec<(String, MockReply)>>>,
    queue: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<(RouteId, String)>>>,
}

impl MockTransport {
    /// Create a transport that answers every prompt with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// Create a transport whose fallback is an arbitrary reply
    pub fn with_default(reply: MockReply) -> Self {
        Self {
            default_reply: reply,
            rules: Arc::new(Mutex::new(Vec::new())),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every prompt containing `needle` with `reply`
    pub fn respond_when(&self, needle: impl Into<String>, reply: MockReply) {
        lock(&self.rules).push((needle.into(), reply));
    }

    /// Queue a one-shot reply
    pub fn push_reply(&self, reply: MockReply) {
        lock(&self.queue).push_back(reply);
    }

    /// Number of attempts received
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Every `(route, prompt)` received, in arrival order
    pub fn calls(&self) -> Vec<(RouteId, String)> {
        lock(&self.calls).clone()
    }

    fn next_reply(&self, prompt: &str) -> MockReply {
        let rule = lock(&self.rules)
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone());

        rule.or_else(|| lock(&self.queue).pop_front())
            .unwrap_or_else(|| self.default_reply.clone())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl CompletionTransport for MockTransport {
    type Error = LlmError;

    fn complete(
        &self,
        route: &EndpointRoute,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send {
        lock(&self.calls).push((route.id, prompt.to_string()));
        let reply = self.next_reply(prompt);

        async move {
            match reply {
                MockReply::Text(text) => Ok(text),
                MockReply::Fail(err) => Err(err),
                MockReply::Stall => std::future::pending().await,
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
