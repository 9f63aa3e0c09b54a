//! Declarative anchor table for the trademark report layout

use markguard_domain::Field;

/// Where a field's captured span ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopAnchor {
    /// The capture is a single whitespace-delimited token
    Whitespace,

    /// The capture runs up to the earliest of these literals, or to end of text
    Literals(&'static [&'static str]),
}

/// How one field is located in report text
///
/// `start` is a regular expression; whitespace after it is skipped before
/// the capture begins. Stop literals are matched verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPattern {
    /// Field this pattern fills
    pub field: Field,

    /// Start anchor (regex)
    pub start: &'static str,

    /// Stop condition
    pub stop: StopAnchor,

    /// Whether the capture may span line breaks
    pub multiline: bool,

    /// Whether whitespace runs inside the capture are collapsed
    pub normalize: bool,
}

impl FieldPattern {
    const fn token(field: Field, start: &'static str) -> Self {
        Self {
            field,
            start,
            stop: StopAnchor::Whitespace,
            multiline: false,
            normalize: false,
        }
    }

    const fn span(
        field: Field,
        start: &'static str,
        stops: &'static [&'static str],
        normalize: bool,
    ) -> Self {
        Self {
            field,
            start,
            stop: StopAnchor::Literals(stops),
            multiline: true,
            normalize,
        }
    }
}

/// Anchor table for the standard trademark search report
pub const REPORT_LAYOUT: [FieldPattern; Field::COUNT] = [
    FieldPattern::token(Field::ApplicationNumber, r"Application#:"),
    FieldPattern::span(
        Field::GoodsAndServices,
        r"Goods & Services translation",
        &["Register Mark", "Applicant", "Owner", "Class"],
        true,
    ),
    FieldPattern::span(Field::Owner, r"Owner:", &["Owner Address:"], false),
    FieldPattern::span(Field::Applicant, r"Applicant:", &["Owner:"], true),
    FieldPattern::span(Field::RegisterMark, r"Register Mark:", &["Application#"], false),
    FieldPattern::token(Field::Class, r"Nice Classes:"),
    FieldPattern::token(Field::ApplicationDate, r"Application Date:"),
    FieldPattern::span(
        Field::Status,
        r"Status:",
        &["Publication for Opposition:"],
        true,
    ),
    FieldPattern::token(Field::PublicationDate, r"Publication for Opposition:"),
];
