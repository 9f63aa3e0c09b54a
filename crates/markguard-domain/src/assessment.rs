//! Conflict assessment results

use crate::route::RouteId;
use std::fmt;

/// Why an assessment could not produce a verdict
///
/// The `Display` output is the inline text shown in place of a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// A non-retryable failure (connection refused, HTTP error status, bad payload)
    Network {
        /// Underlying failure, for logs
        detail: String,
    },

    /// Every attempt timed out
    TimedOut {
        /// Number of attempts made
        attempts: u32,
    },
}

impl fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentError::Network { .. } => f.write_str(
                "Error: Unable to fetch assessment due to network issues or API error.",
            ),
            AssessmentError::TimedOut { attempts } => {
                write!(f, "Error: Request timed out after {} retries.", attempts)
            }
        }
    }
}

impl std::error::Error for AssessmentError {}

/// Verdict text returned by the reasoning service, or the failure in its place
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentOutcome {
    /// Free-text verdict: conflict level, satisfied rule codes, reasoning
    Verdict(String),

    /// The request pipeline gave up
    Failed(AssessmentError),
}

impl AssessmentOutcome {
    /// Text to present for this outcome
    pub fn text(&self) -> String {
        match self {
            AssessmentOutcome::Verdict(text) => text.clone(),
            AssessmentOutcome::Failed(err) => err.to_string(),
        }
    }

    /// Whether the pipeline failed
    pub fn is_error(&self) -> bool {
        matches!(self, AssessmentOutcome::Failed(_))
    }
}

/// The assessment of one record against the target trademark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictAssessment {
    /// Position of the assessed record in the assembled sequence
    pub record_index: usize,

    /// Application number of the assessed record
    pub application_number: Option<String>,

    /// Route the request was sent to
    pub route: RouteId,

    /// Verdict or failure
    pub outcome: AssessmentOutcome,
}

impl ConflictAssessment {
    /// Text to present for this assessment
    pub fn text(&self) -> String {
        self.outcome.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_texts_are_distinct() {
        let network = AssessmentError::Network {
            detail: "HTTP 500".to_string(),
        };
        let timed_out = AssessmentError::TimedOut { attempts: 3 };

        assert_eq!(
            network.to_string(),
            "Error: Unable to fetch assessment due to network issues or API error."
        );
        assert_eq!(
            timed_out.to_string(),
            "Error: Request timed out after 3 retries."
        );
        assert_ne!(network.to_string(), timed_out.to_string());
    }

    #[test]
    fn test_outcome_text() {
        let ok = AssessmentOutcome::Verdict("Conflict Level: Low".to_string());
        assert_eq!(ok.text(), "Conflict Level: Low");
        assert!(!ok.is_error());

        let failed = AssessmentOutcome::Failed(AssessmentError::TimedOut { attempts: 3 });
        assert!(failed.is_error());
        assert!(failed.text().starts_with("Error:"));
    }
}
