//! Error types for the Extractor

use markguard_domain::Field;
use thiserror::Error;

/// Errors that can occur while building a field extractor
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// An anchor pattern failed to compile
    #[error("Invalid {anchor} anchor for field '{field}': {source}")]
    Pattern {
        /// Field whose pattern is broken
        field: Field,
        /// Which anchor ("start" or "stop")
        anchor: &'static str,
        /// Compiler error
        #[source]
        source: regex::Error,
    },

    /// A start anchor matches the empty string and would never advance
    #[error("Start anchor for field '{0}' matches empty text")]
    EmptyAnchor(Field),

    /// A stop anchor list was empty
    #[error("Stop anchor list for field '{0}' is empty")]
    NoStopAnchors(Field),

    /// The same field appears twice in a layout
    #[error("Field '{0}' appears more than once in the layout")]
    DuplicateField(Field),
}
