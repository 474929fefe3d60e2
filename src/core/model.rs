// HealthWave - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI
// (layer rule: core depends on std, chrono and serde only).
//
// These types are the shared vocabulary across all layers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Log Entry (one wellness record)
// =============================================================================

/// A single wellness record: what happened, on which calendar date.
///
/// Entries are immutable once created and are only ever appended to the
/// store, never edited or removed.  A date may carry any number of entries;
/// "today's water" is therefore a sum over entries, not a single cell.
///
/// Serialises to the same field names the CSV schema uses, so the JSON
/// export and the CSV export describe identical records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Calendar date this record belongs to (no time-of-day component).
    pub date: NaiveDate,

    /// Free-text exercise label.  Manual-entry paths substitute
    /// `EXERCISE_PLACEHOLDER` when left blank; imported rows keep whatever
    /// text the file carried, including an empty cell.
    pub exercise: String,

    /// Exercise duration in minutes.  Zero means "no exercise recorded".
    pub duration_min: u32,

    /// Glasses of water drunk.  Zero means "none recorded".
    pub water_glasses: u32,

    /// Hours slept.  `None` when the entry did not capture sleep.
    pub sleep_h: Option<f64>,

    /// Self-reported mood.  `None` when the entry did not capture mood.
    pub mood: Option<Mood>,

    /// Approximate calories consumed.  `None` when not captured.
    pub calories: Option<u32>,

    /// Body weight in kilograms.  `None` when not captured.
    pub weight_kg: Option<f64>,
}

// =============================================================================
// Mood
// =============================================================================

/// Self-reported mood scale, ordered from worst to best.
///
/// Serialises to the display labels ("Very Bad" .. "Very Good") so exported
/// files stay human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "Very Bad")]
    VeryBad,
    Bad,
    Neutral,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
}

impl Mood {
    /// Returns all variants in scale order (worst first).
    pub fn all() -> &'static [Mood] {
        &[
            Mood::VeryBad,
            Mood::Bad,
            Mood::Neutral,
            Mood::Good,
            Mood::VeryGood,
        ]
    }

    /// Human-readable label for display and serialisation.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::VeryBad => "Very Bad",
            Mood::Bad => "Bad",
            Mood::Neutral => "Neutral",
            Mood::Good => "Good",
            Mood::VeryGood => "Very Good",
        }
    }

    /// Parses a label back to a variant (case-insensitive).
    ///
    /// Returns `None` for anything that is not one of the five labels; the
    /// CSV import relies on this to coerce unknown mood text to "absent"
    /// rather than rejecting the row.
    pub fn from_label(raw: &str) -> Option<Mood> {
        Mood::all()
            .iter()
            .copied()
            .find(|mood| mood.label().eq_ignore_ascii_case(raw.trim()))
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Metric field
// =============================================================================

/// The numeric fields of an entry that can be summed and charted.
///
/// `extract` projects an entry to an optional reading: the two counters are
/// always present, the three optional readings yield `None` when the entry
/// did not capture them.  Aggregations treat `None` as "skip", so an absent
/// reading contributes nothing rather than zero-ing an average or breaking
/// a sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    DurationMin,
    WaterGlasses,
    SleepH,
    Calories,
    WeightKg,
}

impl MetricField {
    /// Returns all variants in CSV column order.
    pub fn all() -> &'static [MetricField] {
        &[
            MetricField::DurationMin,
            MetricField::WaterGlasses,
            MetricField::SleepH,
            MetricField::Calories,
            MetricField::WeightKg,
        ]
    }

    /// Canonical field name, identical to the CSV column header.
    pub fn label(&self) -> &'static str {
        match self {
            MetricField::DurationMin => "duration_min",
            MetricField::WaterGlasses => "water_glasses",
            MetricField::SleepH => "sleep_h",
            MetricField::Calories => "calories",
            MetricField::WeightKg => "weight_kg",
        }
    }

    /// Parses a field name (case-insensitive).  Accepts the canonical
    /// column name and a short everyday alias for each field.
    pub fn from_label(raw: &str) -> Option<MetricField> {
        match raw.trim().to_lowercase().as_str() {
            "duration" | "duration_min" | "exercise" => Some(MetricField::DurationMin),
            "water" | "water_glasses" => Some(MetricField::WaterGlasses),
            "sleep" | "sleep_h" => Some(MetricField::SleepH),
            "calories" => Some(MetricField::Calories),
            "weight" | "weight_kg" => Some(MetricField::WeightKg),
            _ => None,
        }
    }

    /// Projects an entry to this field's reading.
    pub fn extract(&self, entry: &LogEntry) -> Option<f64> {
        match self {
            MetricField::DurationMin => Some(f64::from(entry.duration_min)),
            MetricField::WaterGlasses => Some(f64::from(entry.water_glasses)),
            MetricField::SleepH => entry.sleep_h,
            MetricField::Calories => entry.calories.map(f64::from),
            MetricField::WeightKg => entry.weight_kg,
        }
    }
}

impl std::fmt::Display for MetricField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Trend point
// =============================================================================

/// One point in a date-ordered series for charting a metric over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

// =============================================================================
// Daily summary
// =============================================================================

/// Dashboard metrics for a single date.
///
/// Counters are summed across the date's entries; sleep and mood show the
/// most recently logged non-absent reading for the date, on the basis that
/// a later correction supersedes an earlier entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    /// Date the summary describes.
    pub date: NaiveDate,

    /// Total glasses of water across the date's entries.
    pub water_glasses: u64,

    /// Total exercise minutes across the date's entries.
    pub exercise_min: u64,

    /// Most recently logged sleep reading for the date, if any.
    pub sleep_h: Option<f64>,

    /// Most recently logged mood for the date, if any.
    pub mood: Option<Mood>,

    /// Number of entries recorded on the date.
    pub entry_count: usize,
}
