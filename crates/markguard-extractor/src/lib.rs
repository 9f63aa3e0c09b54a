//! Markguard Extractor
//!
//! Reconstructs trademark records from the raw text of a search report.
//!
//! # Overview
//!
//! Report text arrives as one unstructured string (the PDF-to-text step is an
//! external collaborator). Each of the nine record fields is located by its
//! own anchor pattern, producing one ordered sequence per field. The sequences
//! are then zipped by position into [`Record`]s.
//!
//! # Architecture
//!
//! ```text
//! Text → FieldExtractor → FieldSequences → assemble_records → Vec<Record>
//! ```
//!
//! # Key Features
//!
//! - **Declarative layout**: one [`FieldPattern`] row per field, iterated uniformly
//! - **Lazy stop anchors**: a capture ends at the earliest stop anchor
//! - **Best effort**: malformed documents give short or empty sequences, never errors
//! - **Artifact cleanup**: known anchor bleed-through is stripped from Class and
//!   Publication Date
//!
//! # Example Usage
//!
//! ```
//! use markguard_domain::Field;
//! use markguard_extractor::extract_records;
//!
//! let text = "Application#: 123 Nice Classes: 9 Application Date: 01-01-2020";
//! let records = extract_records(text);
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].get(Field::ApplicationNumber), Some("123"));
//! assert_eq!(records[0].get(Field::Class), Some("9"));
//! ```
//!
//! # Known Fragility
//!
//! Sequences are aligned by index only. A record missing one anchor shifts
//! every later value of that field into the wrong record. The report layout
//! this crate targets always prints every anchor, so the alignment holds there.

#![warn(missing_docs)]

mod assembler;
mod error;
mod extractor;
mod layout;
mod normalize;


pub use assembler::{assemble_records, SUFFIX_RULES};
pub use error::ExtractorError;
pub use extractor::{FieldExtractor, FieldSequences};
pub use layout::{FieldPattern, StopAnchor, REPORT_LAYOUT};
pub use normalize::{clean_suffix, normalize};

use markguard_domain::Record;
use once_cell::sync::Lazy;
use tracing::{error, info};

static REPORT_EXTRACTOR: Lazy<Result<FieldExtractor, ExtractorError>> =
    Lazy::new(FieldExtractor::new);

/// Extract every record from a report's text using the standard layout
///
/// All-or-nothing at the document level: if the layout's patterns cannot be
/// compiled the fault is logged and no records are returned.
pub fn extract_records(text: &str) -> Vec<Record> {
    match REPORT_EXTRACTOR.as_ref() {
        Ok(extractor) => extract_with(extractor, text),
        Err(e) => {
            error!("Error while extracting details: {}", e);
            Vec::new()
        }
    }
}

/// Extract every record from `text` with a caller-supplied extractor
pub fn extract_with(extractor: &FieldExtractor, text: &str) -> Vec<Record> {
    let sequences = extractor.extract(text);
    let records = assemble_records(&sequences);
    info!("Successfully extracted {} records from text.", records.len());
    records
}
