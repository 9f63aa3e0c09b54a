//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use markguard_assessor::AssessmentReport;
use markguard_domain::{Field, Record};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest cell shown in record tables
const MAX_CELL_CHARS: usize = 40;

/// Columns shown in record tables
const TABLE_FIELDS: [Field; 6] = [
    Field::ApplicationNumber,
    Field::RegisterMark,
    Field::Class,
    Field::Status,
    Field::Owner,
    Field::ApplicationDate,
];

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format extracted records.
    pub fn format_records(&self, records: &[Record]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(format_quiet(records)),
        }
    }

    fn format_records_table(&self, records: &[Record]) -> String {
        if records.is_empty() {
            return self.colorize("No records found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(TABLE_FIELDS.iter().map(|f| f.as_str().to_string()));

        for record in records {
            builder.push_record(
                TABLE_FIELDS
                    .iter()
                    .map(|f| truncate(record.get(*f).unwrap_or("-"))),
            );
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format assessments alongside the records they were made for.
    pub fn format_report(&self, records: &[Record], report: &AssessmentReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(records, report),
            OutputFormat::Table => Ok(self.format_report_sections(records, report)),
            OutputFormat::Quiet => Ok(format_quiet(records)),
        }
    }

    fn format_report_json(&self, records: &[Record], report: &AssessmentReport) -> Result<String> {
        let entries: Vec<serde_json::Value> = report
            .assessments()
            .iter()
            .map(|a| {
                serde_json::json!({
                    "application_number": a.application_number,
                    "route": a.route.as_str(),
                    "is_error": a.outcome.is_error(),
                    "verdict": a.text(),
                    "record": records.get(a.record_index),
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "assessments": entries,
            "api_calls": report.api_calls(),
        }))?)
    }

    fn format_report_sections(&self, records: &[Record], report: &AssessmentReport) -> String {
        let mut out = String::new();

        for assessment in report.assessments() {
            let label = assessment.application_number.as_deref().unwrap_or("-");
            let heading = format!("Assessment for Application {}", label);
            out.push_str(&self.colorize(&heading, "cyan"));
            out.push('\n');

            if let Some(record) = records.get(assessment.record_index) {
                for (field, value) in record.iter() {
                    out.push_str(&format!("  {}: {}\n", field, value.unwrap_or("-")));
                }
            }

            let verdict = assessment.text();
            if assessment.outcome.is_error() {
                out.push_str(&self.colorize(&verdict, "red"));
            } else {
                out.push_str(&verdict);
            }
            out.push_str("\n\n");
        }

        out.push_str(&self.info(&format!("Total API calls made: {}", report.api_calls())));
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Application numbers, one per line.
fn format_quiet(records: &[Record]) -> String {
    records
        .iter()
        .filter_map(Record::application_number)
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(value: &str) -> String {
    let flat = value.replace('\n', " ");
    if flat.chars().count() <= MAX_CELL_CHARS {
        return flat;
    }
    let mut short: String = flat.chars().take(MAX_CELL_CHARS - 1).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use markguard_domain::{AssessmentError, AssessmentOutcome, ConflictAssessment, RouteId};

    fn records() -> Vec<Record> {
        vec![
            Record::default()
                .with(Field::ApplicationNumber, "97123456")
                .with(Field::RegisterMark, "SHIELDGUARD")
                .with(Field::Class, "9"),
            Record::default()
                .with(Field::ApplicationNumber, "88001122")
                .with(Field::Status, "Cancelled"),
        ]
    }

    fn report() -> AssessmentReport {
        AssessmentReport::new(
            vec![
                ConflictAssessment {
                    record_index: 1,
                    application_number: Some("88001122".into()),
                    route: RouteId::A,
                    outcome: AssessmentOutcome::Failed(AssessmentError::TimedOut { attempts: 3 }),
                },
                ConflictAssessment {
                    record_index: 0,
                    application_number: Some("97123456".into()),
                    route: RouteId::B,
                    outcome: AssessmentOutcome::Verdict("Conflict Level: High".into()),
                },
            ],
            5,
        )
    }

    #[test]
    fn test_quiet_lists_application_numbers() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_records(&records()).unwrap();
        assert_eq!(output, "97123456\n88001122");
    }

    #[test]
    fn test_table_shows_headers_and_placeholders() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_records(&records()).unwrap();
        assert!(output.contains("Register Mark"));
        assert!(output.contains("SHIELDGUARD"));
        assert!(output.contains("Cancelled"));
        assert!(output.contains('-'));
    }

    #[test]
    fn test_empty_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.format_records(&[]).unwrap(), "No records found.");
    }

    #[test]
    fn test_json_records_keep_absent_fields_as_null() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_records(&records()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["Register Mark"], "SHIELDGUARD");
        assert!(value[1]["Owner"].is_null());
    }

    #[test]
    fn test_report_sections_follow_record_order() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&records(), &report()).unwrap();

        let first = output.find("Assessment for Application 97123456").unwrap();
        let second = output.find("Assessment for Application 88001122").unwrap();
        assert!(first < second);
        assert!(output.contains("Conflict Level: High"));
        assert!(output.contains("Error: Request timed out after 3 retries."));
        assert!(output.ends_with("ℹ Total API calls made: 5"));
    }

    #[test]
    fn test_report_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&records(), &report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["api_calls"], 5);
        assert_eq!(value["assessments"][0]["route"], "B");
        assert_eq!(value["assessments"][1]["is_error"], true);
        assert_eq!(value["assessments"][1]["record"]["Status"], "Cancelled");
    }

    #[test]
    fn test_long_values_are_truncated() {
        let long = "x".repeat(100);
        let short = truncate(&long);
        assert_eq!(short.chars().count(), MAX_CELL_CHARS);
        assert!(short.ends_with('…'));
        assert_eq!(truncate("a\nb"), "a b");
    }

    #[test]
    fn test_messages_without_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
        assert_eq!(formatter.error("failed"), "✗ failed");
    }
}
