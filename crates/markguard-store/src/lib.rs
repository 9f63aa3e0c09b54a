//! Markguard Storage Layer
//!
//! Implements the RecordSink trait using SQLite.
//!
//! # Architecture
//!
//! - One `records` row per application number, one column per field
//! - One `assessments` row per application number holding the latest verdict
//! - Every write is an upsert, so re-running a report replaces earlier rows
//!
//! # Examples
//!
//! ```
//! use markguard_domain::traits::RecordSink;
//! use markguard_domain::{Field, Record};
//! use markguard_store::SqliteStore;
//!
//! let mut store = SqliteStore::new(":memory:").unwrap();
//! let record = Record::default().with(Field::ApplicationNumber, "97123456");
//! assert_eq!(store.upsert_record(&record).unwrap(), "97123456");
//! ```

#![warn(missing_docs)]

use markguard_domain::traits::RecordSink;
use markguard_domain::{ConflictAssessment, Field, Record};
use rusqlite::{params, Connection, OptionalExtension};
use std::fmt::Display;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{error, info};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The item has no application number to key it by
    #[error("Record has no application number")]
    MissingKey,
}

/// Outcome of a batch upload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Items written
    pub uploaded: usize,

    /// Items rejected; earlier and later items are unaffected
    pub failed: usize,
}

impl UploadSummary {
    /// Whether every item was written
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// SQLite-based implementation of RecordSink
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

/// Field columns in `Field::ALL` order
const FIELD_COLUMNS: [&str; Field::COUNT] = [
    "application_number",
    "goods_and_services",
    "owner",
    "applicant",
    "register_mark",
    "class",
    "application_date",
    "status",
    "publication_date",
];

const SELECT_RECORD: &str = "SELECT application_number, goods_and_services, owner, applicant, \
     register_mark, class, application_date, status, publication_date FROM records";

impl SqliteStore {
    /// Open (or create) a store at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Fetch a record by application number
    pub fn get_record(&self, application_number: &str) -> Result<Option<Record>, StoreError> {
        let record = self
            .conn
            .query_row(
                &format!("{} WHERE application_number = ?1", SELECT_RECORD),
                params![application_number],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Every stored record, ordered by application number
    pub fn list_records(&self) -> Result<Vec<Record>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY application_number", SELECT_RECORD))?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Number of stored records
    pub fn count_records(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Latest verdict text stored for an application number
    pub fn get_verdict(&self, application_number: &str) -> Result<Option<String>, StoreError> {
        let verdict = self
            .conn
            .query_row(
                "SELECT verdict FROM assessments WHERE application_number = ?1",
                params![application_number],
                |row| row.get(0),
            )
            .optional()?;
        Ok(verdict)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
    let mut values: [Option<String>; Field::COUNT] = Default::default();
    for (i, slot) in values.iter_mut().enumerate() {
        *slot = row.get(i)?;
    }
    Ok(Record::new(values))
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

impl RecordSink for SqliteStore {
    type Error = StoreError;

    fn upsert_record(&mut self, record: &Record) -> Result<String, Self::Error> {
        let key = record
            .application_number()
            .ok_or(StoreError::MissingKey)?
            .to_string();

        let updates = FIELD_COLUMNS[1..]
            .iter()
            .map(|c| format!("{c} = excluded.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO records ({}, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(application_number) DO UPDATE SET {}, updated_at = excluded.updated_at",
            FIELD_COLUMNS.join(", "),
            updates
        );

        self.conn.execute(
            &sql,
            params![
                &key,
                record.get(Field::GoodsAndServices),
                record.get(Field::Owner),
                record.get(Field::Applicant),
                record.get(Field::RegisterMark),
                record.get(Field::Class),
                record.get(Field::ApplicationDate),
                record.get(Field::Status),
                record.get(Field::PublicationDate),
                now_secs(),
            ],
        )?;

        Ok(key)
    }

    fn upsert_assessment(&mut self, assessment: &ConflictAssessment) -> Result<(), Self::Error> {
        let key = assessment
            .application_number
            .as_deref()
            .ok_or(StoreError::MissingKey)?;

        self.conn.execute(
            "INSERT INTO assessments (application_number, route, verdict, is_error, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(application_number) DO UPDATE SET
             route = excluded.route, verdict = excluded.verdict,
             is_error = excluded.is_error, updated_at = excluded.updated_at",
            params![
                key,
                assessment.route.as_str(),
                assessment.text(),
                assessment.outcome.is_error(),
                now_secs(),
            ],
        )?;

        Ok(())
    }
}

/// Upsert every record, continuing past failures
///
/// Records written before a failure stay written.
pub fn upload_records<S>(sink: &mut S, records: &[Record]) -> UploadSummary
where
    S: RecordSink,
    S::Error: Display,
{
    let mut summary = UploadSummary::default();
    for (i, record) in records.iter().enumerate() {
        match sink.upsert_record(record) {
            Ok(_) => summary.uploaded += 1,
            Err(e) => {
                error!("Error while uploading record {}: {}", i, e);
                summary.failed += 1;
            }
        }
    }
    info!(
        "Uploaded {} records ({} failed)",
        summary.uploaded, summary.failed
    );
    summary
}

/// Upsert every assessment, continuing past failures
pub fn upload_assessments<S>(sink: &mut S, assessments: &[ConflictAssessment]) -> UploadSummary
where
    S: RecordSink,
    S::Error: Display,
{
    let mut summary = UploadSummary::default();
    for assessment in assessments {
        match sink.upsert_assessment(assessment) {
            Ok(()) => summary.uploaded += 1,
            Err(e) => {
                error!(
                    "Error while uploading assessment for record {}: {}",
                    assessment.record_index, e
                );
                summary.failed += 1;
            }
        }
    }
    info!(
        "Uploaded {} assessments ({} failed)",
        summary.uploaded, summary.failed
    );
    summary
}
