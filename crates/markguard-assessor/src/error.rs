//! Error types for the Assessor

use markguard_llm::LlmError;
use thiserror::Error;

/// Errors that can occur while setting up an assessor
///
/// Per-record failures never surface here; they become inline verdict text.
#[derive(Error, Debug)]
pub enum AssessorError {
    /// Invalid assessor settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parse or serialization failure
    #[error("TOML error: {0}")]
    Toml(String),

    /// The transport could not be built
    #[error("Transport error: {0}")]
    Transport(#[from] LlmError),
}
