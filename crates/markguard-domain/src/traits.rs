//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ConflictAssessment, EndpointRoute, Record};
use std::future::Future;

/// Trait for sending one prompt to a chat-completions deployment
///
/// Implemented by the infrastructure layer (markguard-llm). One call is one
/// attempt; retries are the caller's concern.
pub trait CompletionTransport {
    /// Error type for a failed attempt
    type Error;

    /// Send `prompt` to `route` and return the completion text
    fn complete(
        &self,
        route: &EndpointRoute,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for persisting extracted records and their assessments
///
/// Implemented by the infrastructure layer (markguard-store). Writes are
/// upserts keyed by the record's application number.
pub trait RecordSink {
    /// Error type for sink operations
    type Error;

    /// Insert or replace a record, returning its identity key
    fn upsert_record(&mut self, record: &Record) -> Result<String, Self::Error>;

    /// Insert or replace the assessment attached to a record
    fn upsert_assessment(&mut self, assessment: &ConflictAssessment) -> Result<(), Self::Error>;
}
