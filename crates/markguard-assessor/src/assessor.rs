//! Core Assessor implementation

use crate::config::AssessorConfig;
use crate::error::AssessorError;
use crate::prompt::PromptBuilder;
use crate::report::AssessmentReport;
use crate::routing::route_for;
use futures_util::stream::{self, StreamExt};
use markguard_domain::traits::CompletionTransport;
use markguard_domain::{
    AssessmentOutcome, ConflictAssessment, Record, TargetTrademark, SHIELD_TARGET,
};
use markguard_llm::{AzureChatTransport, CallCounter, LlmError, RequestPipeline, ServiceConfig};
use tracing::{debug, info, warn};

/// Assesses records against a target trademark through two routed deployments
pub struct ConflictAssessor<T> {
    pipeline: RequestPipeline<T>,
    service: ServiceConfig,
    target: TargetTrademark,
    max_concurrency: usize,
}

impl ConflictAssessor<AzureChatTransport> {
    /// Assessor talking to Azure OpenAI deployments
    pub fn azure(service: ServiceConfig, config: &AssessorConfig) -> Result<Self, AssessorError> {
        let transport = AzureChatTransport::new(config.request_timeout())?;
        Self::new(transport, service, config)
    }
}

impl<T> ConflictAssessor<T>
where
    T: CompletionTransport<Error = LlmError>,
{
    /// Create a new assessor over any transport
    pub fn new(
        transport: T,
        service: ServiceConfig,
        config: &AssessorConfig,
    ) -> Result<Self, AssessorError> {
        config.validate()?;

        let pipeline = RequestPipeline::new(transport)
            .with_policy(config.retry_policy())
            .with_attempt_timeout(config.request_timeout());

        Ok(Self {
            pipeline,
            service,
            target: SHIELD_TARGET,
            max_concurrency: config.max_concurrency,
        })
    }

    /// Compare against a different target application
    pub fn with_target(mut self, target: TargetTrademark) -> Self {
        self.target = target;
        self
    }

    /// Count attempts on a shared counter
    ///
    /// Each report's `api_calls` still covers only its own batch.
    pub fn with_counter(mut self, counter: CallCounter) -> Self {
        self.pipeline = self.pipeline.with_counter(counter);
        self
    }

    /// Attempts made so far by this assessor
    pub fn call_count(&self) -> u64 {
        self.pipeline.counter().get()
    }

    /// Underlying request pipeline
    pub fn pipeline(&self) -> &RequestPipeline<T> {
        &self.pipeline
    }

    /// Assess one record
    ///
    /// Never fails: pipeline errors become the assessment's outcome.
    pub async fn assess_one(&self, record_index: usize, record: &Record) -> ConflictAssessment {
        self.assess_tallied(record_index, record, &CallCounter::new())
            .await
    }

    async fn assess_tallied(
        &self,
        record_index: usize,
        record: &Record,
        tally: &CallCounter,
    ) -> ConflictAssessment {
        let route_id = route_for(record);
        let route = self.service.route(route_id);
        let prompt = PromptBuilder::new(record).with_target(&self.target).build();
        let application_number = record.application_number().map(str::to_string);
        let label = application_number.as_deref().unwrap_or("<none>");

        debug!(
            "Assessing application {} via route {} ({} chars)",
            label,
            route_id,
            prompt.len()
        );

        let outcome = match self.pipeline.invoke_tallied(route, &prompt, tally).await {
            Ok(text) => AssessmentOutcome::Verdict(text),
            Err(e) => {
                warn!("Assessment failed for application {}: {}", label, e);
                AssessmentOutcome::Failed(e)
            }
        };

        ConflictAssessment {
            record_index,
            application_number,
            route: route_id,
            outcome,
        }
    }

    /// Assess every record, at most `max_concurrency` at a time
    ///
    /// The report is in record order whatever order the requests complete in.
    pub async fn assess_all(&self, records: &[Record]) -> AssessmentReport {
        info!(
            "Assessing {} records (max {} concurrent requests)",
            records.len(),
            self.max_concurrency
        );
        let batch = CallCounter::new();

        let assessments: Vec<ConflictAssessment> = stream::iter(records.iter().enumerate())
            .map(|(i, record)| self.assess_tallied(i, record, &batch))
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let report = AssessmentReport::new(assessments, batch.get());
        info!(
            "Assessment complete: {} records, {} failed, {} API calls",
            report.len(),
            report.failures(),
            report.api_calls()
        );
        report
    }
}
