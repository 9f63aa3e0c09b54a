//! Field module - the nine columns of the trademark report layout

use std::fmt;

/// A named field of a trademark record
///
/// The declaration order is the column order used for display, prompts and
/// persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Application number (`Application#:`)
    ApplicationNumber,

    /// Goods and services description
    GoodsAndServices,

    /// Registered owner
    Owner,

    /// Applicant of record
    Applicant,

    /// Register mark text
    RegisterMark,

    /// Nice classification
    Class,

    /// Filing date
    ApplicationDate,

    /// Registry status (e.g. "Registered", "Cancelled")
    Status,

    /// Publication for opposition date
    PublicationDate,
}

impl Field {
    /// Number of fields in a record
    pub const COUNT: usize = 9;

    /// All fields in column order
    pub const ALL: [Field; Field::COUNT] = [
        Field::ApplicationNumber,
        Field::GoodsAndServices,
        Field::Owner,
        Field::Applicant,
        Field::RegisterMark,
        Field::Class,
        Field::ApplicationDate,
        Field::Status,
        Field::PublicationDate,
    ];

    /// Column index of this field
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name, also used as the map key when a record is serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::ApplicationNumber => "Application_Number",
            Field::GoodsAndServices => "Goods & Services",
            Field::Owner => "Owner",
            Field::Applicant => "Applicant",
            Field::RegisterMark => "Register Mark",
            Field::Class => "Class",
            Field::ApplicationDate => "Application Date",
            Field::Status => "Status",
            Field::PublicationDate => "Publication Date",
        }
    }

    /// Parse a field from its display name
    pub fn parse(s: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
