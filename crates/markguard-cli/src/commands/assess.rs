//! Assess command implementation.

use super::extract::{load_records, report_upload};
use crate::cli::AssessArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use markguard_assessor::{AssessmentReport, AssessorConfig, ConflictAssessor};
use markguard_domain::traits::CompletionTransport;
use markguard_domain::Record;
use markguard_llm::{LlmError, ServiceConfig};
use markguard_store::{upload_assessments, upload_records, SqliteStore};
use std::path::Path;

/// Execute the assess command.
pub async fn execute_assess(
    args: AssessArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let records = load_records(&args.file)?;
    if records.is_empty() {
        println!("{}", formatter.warning("No details found in the uploaded document."));
        return Ok(());
    }

    let assessor_config = effective_config(&args, config);
    let service = ServiceConfig::from_env()?;
    let assessor = ConflictAssessor::azure(service, &assessor_config)?;

    run_assessment(&assessor, &records, args.store.as_deref(), formatter).await?;
    Ok(())
}

/// Assessor settings after applying the preset and concurrency flags.
fn effective_config(args: &AssessArgs, config: &Config) -> AssessorConfig {
    let mut assessor_config = args
        .preset
        .map(Into::into)
        .unwrap_or_else(|| config.assessor.clone());
    if let Some(concurrency) = args.concurrency {
        assessor_config.max_concurrency = concurrency;
    }
    assessor_config
}

/// Assess records, print the report and optionally store the results.
pub async fn run_assessment<T>(
    assessor: &ConflictAssessor<T>,
    records: &[Record],
    store: Option<&Path>,
    formatter: &Formatter,
) -> Result<AssessmentReport>
where
    T: CompletionTransport<Error = LlmError>,
{
    let report = assessor.assess_all(records).await;
    println!("{}", formatter.format_report(records, &report)?);

    if let Some(db) = store {
        let mut store = SqliteStore::new(db)?;
        let summary = upload_records(&mut store, records);
        report_upload(formatter, "record", summary.uploaded, summary.failed);
        let summary = upload_assessments(&mut store, report.assessments());
        report_upload(formatter, "verdict", summary.uploaded, summary.failed);
    }

    Ok(report)
}
