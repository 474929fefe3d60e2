// HealthWave - core/export.rs
//
// CSV and JSON export of the session's log entries.
// Core layer: writes to any Write trait object; the path parameter exists
// only to give errors useful context.
//
// The CSV output is the same schema the import accepts, so an exported
// file can be merged back in a later session.  Absent readings are written
// as empty cells, which the import coerces back to absent.

use crate::core::model::LogEntry;
use crate::util::constants::CSV_COLUMNS;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export entries to CSV format.
///
/// Writes the full column set in schema order, one row per entry in store
/// order.  Returns the number of data rows written.
pub fn export_csv<W: Write>(
    entries: &[LogEntry],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Header
    csv_writer
        .write_record(CSV_COLUMNS)
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for entry in entries {
        let date = entry.date.to_string();
        let duration = entry.duration_min.to_string();
        let water = entry.water_glasses.to_string();
        let sleep = entry.sleep_h.map(|v| v.to_string()).unwrap_or_default();
        let calories = entry.calories.map(|v| v.to_string()).unwrap_or_default();
        let weight = entry.weight_kg.map(|v| v.to_string()).unwrap_or_default();

        csv_writer
            .write_record([
                date.as_str(),
                entry.exercise.as_str(),
                duration.as_str(),
                water.as_str(),
                sleep.as_str(),
                entry.mood.map(|m| m.label()).unwrap_or(""),
                calories.as_str(),
                weight.as_str(),
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export entries to JSON format (array of objects, pretty-printed).
pub fn export_json<W: Write>(
    entries: &[LogEntry],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, entries).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(entries.len())
}
