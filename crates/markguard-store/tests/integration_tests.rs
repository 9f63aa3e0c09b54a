//! Integration tests for markguard-store
//!
//! These tests cover upsert semantics and partial batch uploads.

use markguard_domain::traits::RecordSink;
use markguard_domain::{
    AssessmentError, AssessmentOutcome, ConflictAssessment, Field, Record, RouteId,
};
use markguard_store::{upload_assessments, upload_records, SqliteStore, StoreError};

fn record(number: &str, status: &str) -> Record {
    Record::default()
        .with(Field::ApplicationNumber, number)
        .with(Field::Owner, "Guard Systems Inc.")
        .with(Field::Class, "9")
        .with(Field::Status, status)
}

fn assessment(index: usize, number: Option<&str>, outcome: AssessmentOutcome) -> ConflictAssessment {
    ConflictAssessment {
        record_index: index,
        application_number: number.map(str::to_string),
        route: RouteId::B,
        outcome,
    }
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_upsert_and_get_record() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let original = record("97123456", "Registered");

    let key = store.upsert_record(&original).unwrap();
    assert_eq!(key, "97123456");

    let fetched = store.get_record("97123456").unwrap();
    assert_eq!(fetched, Some(original));
    assert_eq!(store.get_record("missing").unwrap(), None);
}

#[test]
fn test_upsert_replaces_existing_row() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.upsert_record(&record("1", "Pending")).unwrap();
    store.upsert_record(&record("1", "Registered")).unwrap();

    assert_eq!(store.count_records().unwrap(), 1);
    let fetched = store.get_record("1").unwrap().unwrap();
    assert_eq!(fetched.get(Field::Status), Some("Registered"));
}

#[test]
fn test_absent_fields_stay_absent() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let sparse = Record::default().with(Field::ApplicationNumber, "42");
    store.upsert_record(&sparse).unwrap();

    let fetched = store.get_record("42").unwrap().unwrap();
    assert_eq!(fetched.present_count(), 1);
    assert_eq!(fetched.get(Field::Owner), None);
}

#[test]
fn test_record_without_key_is_rejected() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let keyless = Record::default().with(Field::Owner, "Nobody");

    let err = store.upsert_record(&keyless).unwrap_err();
    assert!(matches!(err, StoreError::MissingKey));
    assert_eq!(store.count_records().unwrap(), 0);
}

#[test]
fn test_partial_upload_continues_past_failures() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let records = vec![
        record("1", "Registered"),
        Record::default().with(Field::Status, "Registered"),
        record("3", "Cancelled"),
    ];

    let summary = upload_records(&mut store, &records);

    assert_eq!(summary.uploaded, 2);
    assert_eq!(summary.failed, 1);
    assert!(!summary.is_complete());
    let numbers: Vec<String> = store
        .list_records()
        .unwrap()
        .iter()
        .filter_map(|r| r.application_number().map(str::to_string))
        .collect();
    assert_eq!(numbers, vec!["1", "3"]);
}

#[test]
fn test_assessments_are_upserted_by_application_number() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .upsert_assessment(&assessment(
            0,
            Some("1"),
            AssessmentOutcome::Failed(AssessmentError::TimedOut { attempts: 3 }),
        ))
        .unwrap();
    store
        .upsert_assessment(&assessment(
            0,
            Some("1"),
            AssessmentOutcome::Verdict("Conflict Level: High".into()),
        ))
        .unwrap();

    assert_eq!(
        store.get_verdict("1").unwrap().as_deref(),
        Some("Conflict Level: High")
    );
    assert_eq!(store.get_verdict("2").unwrap(), None);
}

#[test]
fn test_assessment_upload_skips_keyless() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let assessments = vec![
        assessment(0, Some("1"), AssessmentOutcome::Verdict("Low".into())),
        assessment(1, None, AssessmentOutcome::Verdict("Moderate".into())),
    ];

    let summary = upload_assessments(&mut store, &assessments);

    assert_eq!(summary.uploaded, 1);
    assert_eq!(summary.failed, 1);
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("markguard.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        upload_records(&mut store, &[record("1", "Registered"), record("2", "Pending")]);
    }

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.count_records().unwrap(), 2);
    assert_eq!(
        store.get_record("2").unwrap().unwrap().get(Field::Status),
        Some("Pending")
    );
}
