// HealthWave - core/import.rs
//
// CSV import: typed decode of export-format rows and merge into the store.
// Core layer: accepts Read trait objects, never touches the filesystem.
//
// Acceptance happens at two granularities. The header is checked once: a
// missing required column rejects the whole file before any row is looked
// at, because a file with no `mood` column would silently merge as "nobody
// was ever in a mood" if rows were accepted piecemeal. Individual rows are
// then decoded independently: one unusable row skips that row only, and
// the rest of the file still merges.
//
// Decode runs to completion before the first append, so a file that fails
// wholesale leaves the store untouched.

use crate::core::model::{LogEntry, Mood};
use crate::core::store::LogStore;
use crate::util::constants::{CSV_COLUMNS, DATE_FORMAT, MAX_IMPORT_ROW_ERRORS};
use crate::util::error::{ImportError, RowError};
use chrono::NaiveDate;
use std::io::Read;

/// Outcome of a completed merge.
#[derive(Debug)]
pub struct ImportReport {
    /// Rows decoded and appended to the store.
    pub merged: usize,

    /// Total data rows read from the input (merged plus skipped).
    pub rows_read: usize,

    /// Per-row failures, capped at `MAX_IMPORT_ROW_ERRORS`.  The skipped
    /// count keeps counting past the cap; only this detail list stops.
    pub row_errors: Vec<RowError>,
}

impl ImportReport {
    /// Rows that were read but not merged.
    pub fn skipped(&self) -> usize {
        self.rows_read - self.merged
    }
}

/// Positions of the required columns within the input header.
///
/// Column order in the file does not matter, and columns outside the
/// required set are ignored.
#[derive(Debug)]
struct ColumnMap {
    date: usize,
    exercise: usize,
    duration_min: usize,
    water_glasses: usize,
    sleep_h: usize,
    mood: usize,
    calories: usize,
    weight_kg: usize,
}

impl ColumnMap {
    /// Locates every required column in the header, or reports the full set
    /// of missing names so the user can fix the file in one pass.
    fn from_header(header: &csv::StringRecord) -> Result<ColumnMap, ImportError> {
        let find = |name: &str| header.iter().position(|cell| cell.trim() == name);

        let missing: Vec<String> = CSV_COLUMNS
            .iter()
            .filter(|name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns { missing });
        }

        // Unwraps are unreachable: every name was just located above.
        let index = |name: &str| find(name).unwrap_or_default();
        Ok(ColumnMap {
            date: index("date"),
            exercise: index("exercise"),
            duration_min: index("duration_min"),
            water_glasses: index("water_glasses"),
            sleep_h: index("sleep_h"),
            mood: index("mood"),
            calories: index("calories"),
            weight_kg: index("weight_kg"),
        })
    }
}

/// Merges CSV rows from `input` into `store`.
///
/// Rows are decoded with the lenient coercion rules the export format
/// implies: the two counters fall back to 0 when a cell is blank or not a
/// number, the optional readings fall back to absent, and unknown mood text
/// becomes absent.  Only the date is load-bearing; a row whose date cell
/// does not parse is skipped and recorded in the report.
///
/// Merged rows are appended in input order, after the kept entries already
/// in the store.  On `Err` the store is guaranteed unchanged.
pub fn merge_from_reader<R: Read>(
    store: &mut LogStore,
    input: R,
) -> Result<ImportReport, ImportError> {
    let mut reader = csv::Reader::from_reader(input);

    let header = reader
        .headers()
        .map_err(|e| ImportError::Header { source: e })?
        .clone();
    let columns = ColumnMap::from_header(&header)?;

    // Phase 1: decode every row before touching the store.
    let mut decoded: Vec<LogEntry> = Vec::new();
    let mut row_errors: Vec<RowError> = Vec::new();
    let mut rows_read: usize = 0;

    for (idx, record) in reader.records().enumerate() {
        rows_read += 1;
        let row = (idx as u64) + 1;

        let outcome = match record {
            Ok(rec) => decode_row(&columns, &rec, row),
            Err(e) => Err(RowError::Malformed { row, source: e }),
        };
        match outcome {
            Ok(entry) => decoded.push(entry),
            Err(err) => {
                tracing::debug!(row, error = %err, "Import row skipped");
                if row_errors.len() < MAX_IMPORT_ROW_ERRORS {
                    row_errors.push(err);
                }
            }
        }
    }

    // Phase 2: append in input order.
    let merged = decoded.len();
    for entry in decoded {
        store.append(entry);
    }

    tracing::info!(
        merged,
        skipped = rows_read - merged,
        "CSV import merged"
    );
    Ok(ImportReport {
        merged,
        rows_read,
        row_errors,
    })
}

/// Decodes one CSV record into an entry.
///
/// Cell whitespace is trimmed before coercion.  Non-finite sleep and weight
/// readings (NaN, infinities) are treated as absent so they cannot poison
/// downstream aggregation.
fn decode_row(
    columns: &ColumnMap,
    record: &csv::StringRecord,
    row: u64,
) -> Result<LogEntry, RowError> {
    let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

    let raw_date = cell(columns.date);
    let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| RowError::BadDate {
        row,
        value: raw_date.to_string(),
    })?;

    Ok(LogEntry {
        date,
        // Unlike the manual-entry forms, import does not substitute the
        // placeholder for a blank label; the cell passes through as-is.
        exercise: cell(columns.exercise).to_string(),
        duration_min: cell(columns.duration_min).parse().unwrap_or(0),
        water_glasses: cell(columns.water_glasses).parse().unwrap_or(0),
        sleep_h: parse_reading(cell(columns.sleep_h)),
        mood: Mood::from_label(cell(columns.mood)),
        calories: cell(columns.calories).parse().ok(),
        weight_kg: parse_reading(cell(columns.weight_kg)),
    })
}

/// Parses an optional floating-point reading, mapping blank, unparseable
/// and non-finite cells to absent.
fn parse_reading(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}
