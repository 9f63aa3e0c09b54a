//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::document;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use markguard_domain::Record;
use markguard_store::{upload_records, SqliteStore};
use std::path::Path;
use tracing::info;

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, formatter: &Formatter) -> Result<()> {
    let records = load_records(&args.file)?;
    if records.is_empty() {
        println!("{}", formatter.warning("No details found in the uploaded document."));
        return Ok(());
    }

    println!("{}", formatter.format_records(&records)?);

    if let Some(db) = args.store {
        let mut store = SqliteStore::new(&db)?;
        let summary = upload_records(&mut store, &records);
        report_upload(formatter, "record", summary.uploaded, summary.failed);
    }

    Ok(())
}

/// Read a report and assemble its records.
///
/// A document with no text is an error; a document with text but no
/// recognizable fields yields an empty list.
pub(crate) fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = document::load_text(path)?;
    if text.trim().is_empty() {
        return Err(CliError::EmptyDocument);
    }

    info!("Loaded {} chars from {}", text.len(), path.display());
    Ok(markguard_extractor::extract_records(&text))
}

/// Print the outcome of a store upload.
pub(crate) fn report_upload(formatter: &Formatter, noun: &str, uploaded: usize, failed: usize) {
    if failed == 0 {
        eprintln!("{}", formatter.success(&format!("Stored {} {}(s)", uploaded, noun)));
    } else if uploaded == 0 {
        eprintln!("{}", formatter.error(&format!("No {}s could be stored", noun)));
    } else {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "Stored {} {}(s), {} could not be stored",
                uploaded, noun, failed
            ))
        );
    }
}
