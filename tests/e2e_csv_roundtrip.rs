// HealthWave - tests/e2e_csv_roundtrip.rs
//
// End-to-end tests for the CSV import/export pipeline.
//
// These tests exercise real files on disk: fixture CSVs read through the
// session's import surface, and exports written to temp directories and
// read back — no mocks, no in-memory shortcuts.  This covers the full
// path from a file on disk to typed entries in the store and back out
// to a file another session can merge.

use chrono::NaiveDate;
use healthwave::app::session::Session;
use healthwave::core::model::{LogEntry, MetricField, Mood};
use healthwave::util::error::{HealthwaveError, ImportError, RowError};
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Sum of every metric for every date present in the session's store.
fn all_sums(session: &Session) -> Vec<(NaiveDate, MetricField, f64)> {
    let mut dates: Vec<NaiveDate> = session.store().entries().iter().map(|e| e.date).collect();
    dates.sort();
    dates.dedup();

    let mut sums = Vec::new();
    for d in dates {
        for field in MetricField::all() {
            sums.push((d, *field, session.store().sum(d, *field)));
        }
    }
    sums
}

// =============================================================================
// Import E2E
// =============================================================================

/// Importing the sample export file populates the store with typed entries.
#[test]
fn e2e_import_sample_file_populates_store() {
    let mut session = Session::starting_on(date(2024, 3, 1));
    let report = session.import_csv(&fixture("health_log_sample.csv")).unwrap();

    assert_eq!(report.merged, 5);
    assert_eq!(report.skipped(), 0);
    assert_eq!(session.store().len(), 5);

    // Spot-check typed decoding across the file.
    let first = &session.store().entries()[0];
    assert_eq!(first.date, date(2024, 3, 1));
    assert_eq!(first.exercise, "Run");
    assert_eq!(first.sleep_h, Some(7.5));
    assert_eq!(first.mood, Some(Mood::Good));

    let blank_label = &session.store().entries()[3];
    assert_eq!(
        blank_label.exercise, "",
        "import keeps a blank exercise cell blank"
    );
    assert_eq!(blank_label.mood, Some(Mood::VeryGood));

    // Derived views see the imported rows immediately.
    let summary = session.store().daily_summary(date(2024, 3, 1));
    assert_eq!(summary.water_glasses, 3);
    assert_eq!(summary.exercise_min, 30);
    assert_eq!(summary.entry_count, 2);
    assert_eq!(
        session.store().sum(date(2024, 3, 3), MetricField::DurationMin),
        45.0
    );
}

/// A file without one required column is rejected wholesale: no rows merge,
/// however many of them are individually valid.
#[test]
fn e2e_missing_column_rejects_file_wholesale() {
    let mut session = Session::new();
    let err = session
        .import_csv(&fixture("missing_mood_column.csv"))
        .unwrap_err();

    match err {
        HealthwaveError::Import(ImportError::MissingColumns { missing }) => {
            assert_eq!(missing, vec!["mood".to_string()]);
        }
        other => panic!("expected MissingColumns, got: {other}"),
    }
    assert!(
        session.store().is_empty(),
        "a schema-rejected file must leave the store untouched"
    );
}

/// Row-level faults (bad date, wrong field count) skip those rows only;
/// the rest of the file merges and the report names each failure.
#[test]
fn e2e_row_faults_skip_rows_but_keep_the_file() {
    let mut session = Session::new();
    let report = session.import_csv(&fixture("ragged_rows.csv")).unwrap();

    assert_eq!(report.merged, 2);
    assert_eq!(report.rows_read, 4);
    assert_eq!(report.skipped(), 2);

    assert!(
        matches!(&report.row_errors[0], RowError::BadDate { row: 2, value } if value == "03/02/2024"),
        "unexpected first error: {:?}",
        report.row_errors
    );
    assert!(
        matches!(report.row_errors[1], RowError::Malformed { row: 3, .. }),
        "unexpected second error: {:?}",
        report.row_errors
    );

    let labels: Vec<&str> = session
        .store()
        .entries()
        .iter()
        .map(|e| e.exercise.as_str())
        .collect();
    assert_eq!(labels, vec!["Run", "Row"], "good rows merge in file order");
}

/// Extra columns and a reshuffled column order are both fine: the import
/// matches columns by name, not position.
#[test]
fn e2e_extra_and_reordered_columns_accepted() {
    let mut session = Session::new();
    let report = session.import_csv(&fixture("extra_columns.csv")).unwrap();

    assert_eq!(report.merged, 2);
    let first = &session.store().entries()[0];
    assert_eq!(first.date, date(2024, 4, 1));
    assert_eq!(first.exercise, "Run");
    assert_eq!(first.mood, Some(Mood::Good));
    assert_eq!(first.calories, Some(2_000));
}

// =============================================================================
// Round-trip E2E
// =============================================================================

/// The export schema is the import schema: re-importing a session's own
/// export doubles every per-date metric sum exactly.
#[test]
fn e2e_export_reimport_doubles_every_date_sum() {
    let dir = tempfile::tempdir().unwrap();
    let export_path = dir.path().join("roundtrip.csv");

    let mut session = Session::starting_on(date(2024, 3, 1));
    session.import_csv(&fixture("health_log_sample.csv")).unwrap();

    let before = all_sums(&session);
    let exported = session.export_csv(&export_path).unwrap();
    assert_eq!(exported, 5);

    let report = session.import_csv(&export_path).unwrap();
    assert_eq!(report.merged, 5, "every exported row must re-import cleanly");
    assert_eq!(report.skipped(), 0);

    let after = all_sums(&session);
    assert_eq!(before.len(), after.len(), "no dates appear or vanish");
    for ((d, field, before_sum), (_, _, after_sum)) in before.iter().zip(after.iter()) {
        assert_eq!(
            *after_sum,
            before_sum * 2.0,
            "sum of {field} on {d} must double after re-import"
        );
    }
}

/// A fresh session importing an export sees the same typed entries the
/// exporting session held, in the same order.
#[test]
fn e2e_export_is_faithful_to_the_exporting_session() {
    let dir = tempfile::tempdir().unwrap();
    let export_path = dir.path().join("export.csv");

    let mut exporter = Session::starting_on(date(2024, 3, 1));
    exporter.import_csv(&fixture("health_log_sample.csv")).unwrap();
    exporter.export_csv(&export_path).unwrap();

    let mut importer = Session::starting_on(date(2024, 3, 1));
    importer.import_csv(&export_path).unwrap();

    assert_eq!(
        importer.store().entries(),
        exporter.store().entries(),
        "an export read by a fresh session reproduces the entries exactly"
    );
}

/// The export starts with the exact schema header and one line per entry.
#[test]
fn e2e_csv_export_carries_schema_header() {
    let dir = tempfile::tempdir().unwrap();
    let export_path = dir.path().join("export.csv");

    let mut session = Session::starting_on(date(2024, 3, 1));
    session.import_csv(&fixture("health_log_sample.csv")).unwrap();
    session.export_csv(&export_path).unwrap();

    let content = fs::read_to_string(&export_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("date,exercise,duration_min,water_glasses,sleep_h,mood,calories,weight_kg")
    );
    assert_eq!(lines.count(), 5);
}

/// The JSON export parses back to the same entries the CSV pipeline holds.
#[test]
fn e2e_json_export_matches_store_contents() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("export.json");

    let mut session = Session::starting_on(date(2024, 3, 1));
    session.import_csv(&fixture("health_log_sample.csv")).unwrap();
    let count = session.export_json(&json_path).unwrap();
    assert_eq!(count, 5);

    let content = fs::read_to_string(&json_path).unwrap();
    let parsed: Vec<LogEntry> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, session.store().entries());
}
