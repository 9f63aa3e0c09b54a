//! Anchor-driven field scanner

use crate::error::ExtractorError;
use crate::layout::{FieldPattern, StopAnchor, REPORT_LAYOUT};
use crate::normalize::normalize;
use markguard_domain::Field;
use regex::Regex;
use tracing::debug;

/// Compiled stop condition
#[derive(Debug, Clone)]
enum CompiledStop {
    Whitespace,
    Literals(Regex),
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    field: Field,
    start: Regex,
    stop: CompiledStop,
    multiline: bool,
    normalize: bool,
}

impl CompiledPattern {
    fn compile(pattern: &FieldPattern) -> Result<Self, ExtractorError> {
        let start = Regex::new(pattern.start).map_err(|source| ExtractorError::Pattern {
            field: pattern.field,
            anchor: "start",
            source,
        })?;

        if start.is_match("") {
            return Err(ExtractorError::EmptyAnchor(pattern.field));
        }

        let stop = match pattern.stop {
            StopAnchor::Whitespace => CompiledStop::Whitespace,
            StopAnchor::Literals(literals) => {
                let alternation = literals
                    .iter()
                    .filter(|l| !l.is_empty())
                    .map(|l| regex::escape(l))
                    .collect::<Vec<_>>()
                    .join("|");

                if alternation.is_empty() {
                    return Err(ExtractorError::NoStopAnchors(pattern.field));
                }

                let re = Regex::new(&alternation).map_err(|source| ExtractorError::Pattern {
                    field: pattern.field,
                    anchor: "stop",
                    source,
                })?;
                CompiledStop::Literals(re)
            }
        };

        Ok(Self {
            field: pattern.field,
            start,
            stop,
            multiline: pattern.multiline,
            normalize: pattern.normalize,
        })
    }

    /// Every non-overlapping occurrence of this field, in document order
    fn scan(&self, text: &str) -> Vec<String> {
        let mut values = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(m) = self.start.find_at(text, pos) else {
                break;
            };

            if m.start() == m.end() {
                // Zero-width hit; step past it so the scan keeps moving.
                match text[m.end()..].chars().next() {
                    Some(c) => {
                        pos = m.end() + c.len_utf8();
                        continue;
                    }
                    None => break,
                }
            }

            let after = skip_whitespace(text, m.end());

            match &self.stop {
                CompiledStop::Whitespace => {
                    let end = text[after..]
                        .find(char::is_whitespace)
                        .map_or(text.len(), |i| after + i);
                    if end == after {
                        break;
                    }
                    values.push(text[after..end].to_string());
                    pos = end;
                }
                CompiledStop::Literals(stops) => {
                    let end = stops.find_at(text, after).map_or(text.len(), |s| s.start());
                    let span = &text[after..end];

                    if !self.multiline && span.contains('\n') {
                        pos = m.end();
                        continue;
                    }

                    let span = span.trim_end();
                    values.push(if self.normalize {
                        normalize(span)
                    } else {
                        span.to_string()
                    });
                    pos = end;
                }
            }
        }

        values
    }
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    let rest = &text[from..];
    from + (rest.len() - rest.trim_start().len())
}

/// Per-field ordered value sequences for one document
///
/// Sequences are independent; their lengths may differ.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSequences {
    values: [Vec<String>; Field::COUNT],
}

impl FieldSequences {
    /// Values found for `field`, in document order
    pub fn get(&self, field: Field) -> &[String] {
        &self.values[field.index()]
    }

    /// Length of the longest sequence
    pub fn max_len(&self) -> usize {
        self.values.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of values found per field, in column order
    pub fn counts(&self) -> [(Field, usize); Field::COUNT] {
        Field::ALL.map(|f| (f, self.values[f.index()].len()))
    }

    fn set(&mut self, field: Field, values: Vec<String>) {
        self.values[field.index()] = values;
    }
}

/// Locates every field's values in report text
///
/// Built once from a layout table; extraction itself never fails.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    patterns: Vec<CompiledPattern>,
}

impl FieldExtractor {
    /// Build an extractor for the standard report layout
    pub fn new() -> Result<Self, ExtractorError> {
        Self::with_patterns(&REPORT_LAYOUT)
    }

    /// Build an extractor from a custom layout
    ///
    /// Fields missing from `patterns` always yield empty sequences.
    pub fn with_patterns(patterns: &[FieldPattern]) -> Result<Self, ExtractorError> {
        let mut seen = [false; Field::COUNT];
        let mut compiled = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            if std::mem::replace(&mut seen[pattern.field.index()], true) {
                return Err(ExtractorError::DuplicateField(pattern.field));
            }
            compiled.push(CompiledPattern::compile(pattern)?);
        }

        Ok(Self { patterns: compiled })
    }

    /// Scan `text` for every field
    pub fn extract(&self, text: &str) -> FieldSequences {
        let mut sequences = FieldSequences::default();

        for pattern in &self.patterns {
            let values = pattern.scan(text);
            debug!("Field '{}': {} value(s)", pattern.field, values.len());
            sequences.set(pattern.field, values);
        }

        sequences
    }
}
