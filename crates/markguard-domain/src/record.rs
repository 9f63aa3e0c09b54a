//! Record module - one reconstructed trademark entry

use crate::field::Field;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// One trademark entry reconstructed from a report
///
/// Every field is optional: a value is absent when the field's extracted
/// sequence was shorter than the longest sequence at this record's index.
/// Records are built once during assembly and not mutated afterwards.
///
/// Serializes as a map keyed by [`Field::as_str`] in column order, with
/// absent values as `null`.
///
/// # Examples
///
/// ```
/// use markguard_domain::{Field, Record};
///
/// let record = Record::default()
///     .with(Field::ApplicationNumber, "12345")
///     .with(Field::Class, "9");
///
/// assert_eq!(record.application_number(), Some("12345"));
/// assert_eq!(record.get(Field::Owner), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<String>>")]
pub struct Record {
    values: [Option<String>; Field::COUNT],
}

impl Record {
    /// Create a record from values in column order
    pub fn new(values: [Option<String>; Field::COUNT]) -> Self {
        Self { values }
    }

    /// Return a copy of this record with `field` set to `value`
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.values[field.index()] = Some(value.into());
        self
    }

    /// Value of a field, if present
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    /// The record's identity key
    pub fn application_number(&self) -> Option<&str> {
        self.get(Field::ApplicationNumber)
    }

    /// Iterate `(field, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Number of fields that carry a value
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), &value)?;
        }
        map.end()
    }
}

impl From<BTreeMap<String, Option<String>>> for Record {
    fn from(map: BTreeMap<String, Option<String>>) -> Self {
        let mut record = Record::default();
        for (key, value) in map {
            if let Some(field) = Field::parse(&key) {
                record.values[field.index()] = value;
            }
        }
        record
    }
}
