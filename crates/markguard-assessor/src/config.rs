//! Configuration for the Assessor

use crate::error::AssessorError;
use markguard_llm::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Assessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessorConfig {
    /// Maximum assessment requests in flight at once
    pub max_concurrency: usize,

    /// Maximum time for a single attempt (seconds)
    pub request_timeout_secs: u64,

    /// Attempts per record, the first one included
    pub max_attempts: u32,

    /// Delay before the first retry (seconds); doubles per retry
    pub base_delay_secs: u64,
}

impl AssessorConfig {
    /// Per-attempt timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// First retry delay as a Duration
    pub fn base_delay(&self) -> Duration {
        Duration::from_secs(self.base_delay_secs)
    }

    /// Retry policy described by this configuration
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::exponential(self.max_attempts, self.base_delay())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AssessorError> {
        if self.max_concurrency == 0 {
            return Err(AssessorError::Config(
                "max_concurrency must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(AssessorError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(AssessorError::Config(
                "max_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AssessorConfig {
    /// Three attempts, 2s doubling backoff, 120s per attempt
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            request_timeout_secs: 120,
            max_attempts: 3,
            base_delay_secs: 2,
        }
    }
}

impl AssessorConfig {
    /// Aggressive preset: more parallelism, shorter waits, fewer retries
    pub fn aggressive() -> Self {
        Self {
            max_concurrency: 16,
            request_timeout_secs: 60,
            max_attempts: 2,
            base_delay_secs: 1,
        }
    }

    /// Lenient preset: gentler on the service, more patient with it
    pub fn lenient() -> Self {
        Self {
            max_concurrency: 4,
            request_timeout_secs: 300,
            max_attempts: 5,
            base_delay_secs: 4,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, AssessorError> {
        toml::from_str(toml_str).map_err(|e| AssessorError::Toml(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, AssessorError> {
        toml::to_string_pretty(self)
            .map_err(|e| AssessorError::Toml(format!("Failed to serialize to TOML: {}", e)))
    }
}
