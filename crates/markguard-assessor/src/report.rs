//! Batch assessment results

use markguard_domain::ConflictAssessment;
use std::collections::BTreeMap;

/// Text shown for a record with no assessment
pub const NO_RESULT: &str = "No result available";

/// Every assessment from one batch, in record order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentReport {
    assessments: Vec<ConflictAssessment>,
    api_calls: u64,
}

impl AssessmentReport {
    /// Build a report; assessments are ordered by record index
    pub fn new(mut assessments: Vec<ConflictAssessment>, api_calls: u64) -> Self {
        assessments.sort_by_key(|a| a.record_index);
        Self {
            assessments,
            api_calls,
        }
    }

    /// Assessments in record order
    pub fn assessments(&self) -> &[ConflictAssessment] {
        &self.assessments
    }

    /// Outbound attempts counted while the batch ran
    pub fn api_calls(&self) -> u64 {
        self.api_calls
    }

    /// Number of assessments
    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    /// Whether the batch was empty
    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    /// Number of assessments that ended in an error
    pub fn failures(&self) -> usize {
        self.assessments.iter().filter(|a| a.outcome.is_error()).count()
    }

    /// Assessment of the record at `index`
    pub fn for_record(&self, index: usize) -> Option<&ConflictAssessment> {
        self.assessments
            .binary_search_by_key(&index, |a| a.record_index)
            .ok()
            .map(|i| &self.assessments[i])
    }

    /// Verdict text for an application number
    ///
    /// With duplicate application numbers the earliest record wins.
    pub fn verdict_for(&self, application_number: &str) -> String {
        self.assessments
            .iter()
            .find(|a| a.application_number.as_deref() == Some(application_number))
            .map(|a| a.text())
            .unwrap_or_else(|| NO_RESULT.to_string())
    }

    /// Verdict text keyed by application number
    ///
    /// Records without an application number are left out.
    pub fn by_application(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for a in &self.assessments {
            if let Some(number) = &a.application_number {
                map.entry(number.clone()).or_insert_with(|| a.text());
            }
        }
        map
    }
}
