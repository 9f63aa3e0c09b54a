//! Positional assembly of field sequences into records

use crate::extractor::FieldSequences;
use crate::normalize::clean_suffix;
use markguard_domain::{Field, Record};

/// Trailing artifacts stripped from specific fields after assembly
///
/// A neighbouring anchor can bleed into a token capture when the PDF text
/// has no space between them.
pub const SUFFIX_RULES: &[(Field, &[&str])] = &[
    (Field::Class, &["Application#:"]),
    (Field::PublicationDate, &["Applicant:"]),
];

/// Zip per-field sequences into records by index
///
/// The record count is the longest sequence's length. Record `i` takes
/// element `i` of every sequence, and a field whose sequence is too short is
/// absent. Suffix rules are applied to the assembled values.
pub fn assemble_records(sequences: &FieldSequences) -> Vec<Record> {
    (0..sequences.max_len())
        .map(|i| {
            let mut values: [Option<String>; Field::COUNT] =
                Field::ALL.map(|f| sequences.get(f).get(i).cloned());

            for (field, suffixes) in SUFFIX_RULES {
                let slot = &mut values[field.index()];
                *slot = clean_suffix(slot.as_deref(), suffixes);
            }

            Record::new(values)
        })
        .collect()
}
