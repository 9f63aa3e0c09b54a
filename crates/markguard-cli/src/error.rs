//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input document yielded no text
    #[error("Failed to extract text from the uploaded document.")]
    EmptyDocument,

    /// Reasoning-service configuration or transport error
    #[error("Service error: {0}")]
    Llm(#[from] markguard_llm::LlmError),

    /// Assessor setup error
    #[error("Assessor error: {0}")]
    Assessor(#[from] markguard_assessor::AssessorError),

    /// Storage error
    #[error("Store error: {0}")]
    Store(#[from] markguard_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
