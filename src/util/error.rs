// HealthWave - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all HealthWave operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum HealthwaveError {
    /// A manual entry was rejected before reaching the store.
    Entry(EntryError),

    /// A CSV import was rejected as a whole.
    Import(ImportError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for HealthwaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry(e) => write!(f, "Entry error: {e}"),
            Self::Import(e) => write!(f, "Import error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for HealthwaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Entry(e) => Some(e),
            Self::Import(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry errors
// ---------------------------------------------------------------------------

/// Errors raised by the manual-entry forms.  Raised before any mutation, so
/// a rejected form never leaves a partial entry behind.
#[derive(Debug)]
pub enum EntryError {
    /// A field value is outside the allowed range.
    ValueOutOfRange {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// A date argument could not be parsed as an ISO calendar date.
    InvalidDate { value: String },

    /// A mood argument does not match any known mood label.
    UnknownMood { value: String },
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "'{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::InvalidDate { value } => {
                write!(f, "'{value}' is not a valid date. Expected: YYYY-MM-DD")
            }
            Self::UnknownMood { value } => {
                write!(
                    f,
                    "'{value}' is not a known mood. Expected one of: \
                     Very Bad, Bad, Neutral, Good, Very Good"
                )
            }
        }
    }
}

impl std::error::Error for EntryError {}

impl From<EntryError> for HealthwaveError {
    fn from(e: EntryError) -> Self {
        Self::Entry(e)
    }
}

// ---------------------------------------------------------------------------
// Import errors
// ---------------------------------------------------------------------------

/// Errors that reject an entire CSV import.  When one of these is raised the
/// store is left exactly as it was; no rows from the file are merged.
#[derive(Debug)]
pub enum ImportError {
    /// The header row lacks one or more required columns.
    MissingColumns { missing: Vec<String> },

    /// The header row itself could not be read.
    Header { source: csv::Error },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumns { missing } => write!(
                f,
                "CSV is missing required column(s): {}. \
                 See the export format for the expected header.",
                missing.join(", ")
            ),
            Self::Header { source } => {
                write!(f, "CSV header could not be read: {source}")
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Header { source } => Some(source),
            _ => None,
        }
    }
}

impl From<ImportError> for HealthwaveError {
    fn from(e: ImportError) -> Self {
        Self::Import(e)
    }
}

// ---------------------------------------------------------------------------
// Row errors
// ---------------------------------------------------------------------------

/// A single unusable row within an otherwise accepted import.  These are
/// collected and reported, never propagated: one bad row skips that row and
/// the rest of the file still merges.
///
/// `row` is the 1-based data-row number (the header is row 0).
#[derive(Debug)]
pub enum RowError {
    /// The row could not be read as a CSV record (e.g. wrong field count).
    Malformed { row: u64, source: csv::Error },

    /// The date cell could not be parsed as an ISO calendar date.
    BadDate { row: u64, value: String },
}

impl RowError {
    /// 1-based data-row number the error occurred on.
    pub fn row(&self) -> u64 {
        match self {
            Self::Malformed { row, .. } | Self::BadDate { row, .. } => *row,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { row, source } => {
                write!(f, "Row {row}: malformed record: {source}")
            }
            Self::BadDate { row, value } => {
                write!(f, "Row {row}: cannot parse date '{value}'")
            }
        }
    }
}

impl std::error::Error for RowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for HealthwaveError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for HealthWave results.
pub type Result<T> = std::result::Result<T, HealthwaveError>;
