// HealthWave - app/session.rs
//
// Owned session state and the manual input surface.
//
// Design principles:
// - The session owns the store outright and is passed by reference into
//   every view call; there is no ambient or global state, so two sessions
//   in one process can never bleed into each other.
// - Validation happens here, before the store is touched.  The store
//   trusts its producers, so every form checks the field bounds first and
//   a rejected form never creates an entry.
// - The store lives and dies with the session.  The only durable artefacts
//   are the CSV/JSON files written through the export methods.

use crate::core::import::{self, ImportReport};
use crate::core::model::{LogEntry, Mood};
use crate::core::store::LogStore;
use crate::util::constants::{
    EXERCISE_PLACEHOLDER, MAX_CALORIES, MAX_DURATION_MIN, MAX_SLEEP_HOURS, MAX_WATER_GLASSES,
    MAX_WEIGHT_KG, MIN_WEIGHT_KG, WELLNESS_TIPS,
};
use crate::util::error::{EntryError, HealthwaveError, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Today's calendar date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// =============================================================================
// Entry form
// =============================================================================

/// The full daily-entry form.
///
/// Carries raw user input; `into_entry` applies the field bounds and the
/// blank-exercise placeholder substitution, producing a store-ready entry
/// or the first validation failure.
#[derive(Debug, Clone)]
pub struct EntryForm {
    pub date: NaiveDate,
    pub exercise: String,
    pub duration_min: u32,
    pub water_glasses: u32,
    pub sleep_h: Option<f64>,
    pub mood: Option<Mood>,
    pub calories: Option<u32>,
    pub weight_kg: Option<f64>,
}

impl EntryForm {
    /// An empty form for the given date: blank exercise, zero counters,
    /// no optional readings.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            exercise: String::new(),
            duration_min: 0,
            water_glasses: 0,
            sleep_h: None,
            mood: None,
            calories: None,
            weight_kg: None,
        }
    }

    /// Validates the form and converts it into a store-ready entry.
    ///
    /// Only the blank string is substituted with the placeholder;
    /// whitespace-only labels are kept verbatim.
    fn into_entry(self) -> std::result::Result<LogEntry, EntryError> {
        if self.duration_min > MAX_DURATION_MIN {
            return Err(EntryError::ValueOutOfRange {
                field: "duration_min",
                value: self.duration_min.to_string(),
                expected: format!("0..={MAX_DURATION_MIN}"),
            });
        }
        if self.water_glasses > MAX_WATER_GLASSES {
            return Err(EntryError::ValueOutOfRange {
                field: "water_glasses",
                value: self.water_glasses.to_string(),
                expected: format!("0..={MAX_WATER_GLASSES}"),
            });
        }
        if let Some(sleep) = self.sleep_h {
            // A NaN reading fails the range check rather than slipping through.
            if !(0.0..=MAX_SLEEP_HOURS).contains(&sleep) {
                return Err(EntryError::ValueOutOfRange {
                    field: "sleep_h",
                    value: sleep.to_string(),
                    expected: format!("0..={MAX_SLEEP_HOURS}"),
                });
            }
        }
        if let Some(calories) = self.calories {
            if calories > MAX_CALORIES {
                return Err(EntryError::ValueOutOfRange {
                    field: "calories",
                    value: calories.to_string(),
                    expected: format!("0..={MAX_CALORIES}"),
                });
            }
        }
        if let Some(weight) = self.weight_kg {
            if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight) {
                return Err(EntryError::ValueOutOfRange {
                    field: "weight_kg",
                    value: weight.to_string(),
                    expected: format!("{MIN_WEIGHT_KG}..={MAX_WEIGHT_KG}"),
                });
            }
        }

        let exercise = if self.exercise.is_empty() {
            EXERCISE_PLACEHOLDER.to_string()
        } else {
            self.exercise
        };

        Ok(LogEntry {
            date: self.date,
            exercise,
            duration_min: self.duration_min,
            water_glasses: self.water_glasses,
            sleep_h: self.sleep_h,
            mood: self.mood,
            calories: self.calories,
            weight_kg: self.weight_kg,
        })
    }
}

// =============================================================================
// Session
// =============================================================================

/// One dashboard session: an owned store plus the date the dashboard is
/// looking at.
///
/// Mutation goes through the form methods only, so everything in the store
/// has passed validation (manual paths) or coercion (import).
pub struct Session {
    store: LogStore,

    /// Date the dashboard views are focused on.  Defaults to today; quick
    /// actions always record against the real today regardless.
    pub selected_date: NaiveDate,
}

impl Session {
    /// A fresh session focused on today.
    pub fn new() -> Self {
        Self::starting_on(today())
    }

    /// A fresh session focused on a specific date.
    pub fn starting_on(selected_date: NaiveDate) -> Self {
        Self {
            store: LogStore::new(),
            selected_date,
        }
    }

    /// Read access to the store for the rendering surface.
    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// Moves the dashboard focus to another date.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Records a full daily entry from the tracker form.
    pub fn log_entry(&mut self, form: EntryForm) -> std::result::Result<(), EntryError> {
        let entry = form.into_entry()?;
        tracing::info!(date = %entry.date, exercise = %entry.exercise, "Entry logged");
        self.store.append(entry);
        Ok(())
    }

    /// Records a quick log: exercise, duration and water only, dated today.
    pub fn quick_log(
        &mut self,
        exercise: &str,
        duration_min: u32,
        water_glasses: u32,
    ) -> std::result::Result<(), EntryError> {
        let form = EntryForm {
            exercise: exercise.to_string(),
            duration_min,
            water_glasses,
            ..EntryForm::for_date(today())
        };
        self.log_entry(form)
    }

    /// Records a hydration quick-action: water only, dated today.
    pub fn hydrate(&mut self, glasses: u32) -> std::result::Result<(), EntryError> {
        let form = EntryForm {
            water_glasses: glasses,
            ..EntryForm::for_date(today())
        };
        self.log_entry(form)
    }

    /// Merges a CSV export file into the session store.
    ///
    /// All-or-nothing at file granularity for schema problems, per-row for
    /// content problems; see `core::import` for the exact rules.
    pub fn import_csv(&mut self, path: &Path) -> Result<ImportReport> {
        let file = File::open(path).map_err(|e| HealthwaveError::Io {
            path: path.to_path_buf(),
            operation: "open",
            source: e,
        })?;
        let report = import::merge_from_reader(&mut self.store, BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            merged = report.merged,
            skipped = report.skipped(),
            "CSV file imported"
        );
        Ok(report)
    }

    /// Writes the session store to a CSV file in the export schema.
    /// Returns the number of data rows written.
    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        let file = File::create(path).map_err(|e| HealthwaveError::Io {
            path: path.to_path_buf(),
            operation: "create",
            source: e,
        })?;
        let count = crate::core::export::export_csv(self.store.entries(), BufWriter::new(file), path)?;
        tracing::info!(path = %path.display(), count, "CSV file exported");
        Ok(count)
    }

    /// Writes the session store to a JSON file (array of entry objects).
    /// Returns the number of entries written.
    pub fn export_json(&self, path: &Path) -> Result<usize> {
        let file = File::create(path).map_err(|e| HealthwaveError::Io {
            path: path.to_path_buf(),
            operation: "create",
            source: e,
        })?;
        let count =
            crate::core::export::export_json(self.store.entries(), BufWriter::new(file), path)?;
        tracing::info!(path = %path.display(), count, "JSON file exported");
        Ok(count)
    }

    /// Wellness tip for the dashboard date.
    ///
    /// Deterministic rotation through the tip pool by day of year, so the
    /// tip changes daily but stays stable across reruns on the same day.
    pub fn tip_of_the_day(&self) -> &'static str {
        let index = self.selected_date.ordinal0() as usize % WELLNESS_TIPS.len();
        WELLNESS_TIPS[index]
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::MetricField;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn full_form(d: NaiveDate) -> EntryForm {
        EntryForm {
            exercise: "Run".to_string(),
            duration_min: 30,
            water_glasses: 2,
            sleep_h: Some(7.5),
            mood: Some(Mood::Good),
            calories: Some(2_100),
            weight_kg: Some(70.4),
            ..EntryForm::for_date(d)
        }
    }

    #[test]
    fn test_log_entry_appends_validated_form() {
        let d = date(2024, 1, 1);
        let mut session = Session::starting_on(d);
        session.log_entry(full_form(d)).unwrap();

        assert_eq!(session.store().len(), 1);
        let entry = &session.store().entries()[0];
        assert_eq!(entry.exercise, "Run");
        assert_eq!(entry.mood, Some(Mood::Good));
    }

    #[test]
    fn test_blank_exercise_becomes_placeholder() {
        let d = date(2024, 1, 1);
        let mut session = Session::starting_on(d);
        let mut form = full_form(d);
        form.exercise = String::new();
        session.log_entry(form).unwrap();

        assert_eq!(session.store().entries()[0].exercise, EXERCISE_PLACEHOLDER);
    }

    #[test]
    fn test_whitespace_exercise_is_kept_verbatim() {
        let d = date(2024, 1, 1);
        let mut session = Session::starting_on(d);
        let mut form = full_form(d);
        form.exercise = "  ".to_string();
        session.log_entry(form).unwrap();

        assert_eq!(
            session.store().entries()[0].exercise,
            "  ",
            "only the empty string is substituted"
        );
    }

    #[test]
    fn test_out_of_range_duration_is_rejected_without_mutation() {
        let d = date(2024, 1, 1);
        let mut session = Session::starting_on(d);
        let mut form = full_form(d);
        form.duration_min = MAX_DURATION_MIN + 1;

        let err = session.log_entry(form).unwrap_err();
        assert!(
            matches!(err, EntryError::ValueOutOfRange { field: "duration_min", .. }),
            "unexpected error: {err}"
        );
        assert!(
            session.store().is_empty(),
            "a rejected form must not create an entry"
        );
    }

    #[test]
    fn test_sleep_range_rejects_nan_and_negative() {
        let d = date(2024, 1, 1);
        let mut session = Session::starting_on(d);

        let mut form = full_form(d);
        form.sleep_h = Some(f64::NAN);
        assert!(session.log_entry(form).is_err(), "NaN is not a sleep reading");

        let mut form = full_form(d);
        form.sleep_h = Some(-1.0);
        assert!(session.log_entry(form).is_err());

        let mut form = full_form(d);
        form.sleep_h = Some(24.0);
        assert!(session.log_entry(form).is_ok(), "the bound itself is allowed");
    }

    #[test]
    fn test_weight_bounds_are_inclusive() {
        let d = date(2024, 1, 1);
        let mut session = Session::starting_on(d);

        let mut form = full_form(d);
        form.weight_kg = Some(MIN_WEIGHT_KG);
        assert!(session.log_entry(form).is_ok());

        let mut form = full_form(d);
        form.weight_kg = Some(MAX_WEIGHT_KG + 0.1);
        assert!(session.log_entry(form).is_err());
    }

    #[test]
    fn test_quick_log_is_dated_today() {
        let mut session = Session::new();
        session.quick_log("Walk", 20, 2).unwrap();

        let entry = &session.store().entries()[0];
        assert_eq!(entry.date, today());
        assert_eq!(entry.duration_min, 20);
        assert_eq!(entry.water_glasses, 2);
        assert_eq!(entry.sleep_h, None, "quick logs capture no optional readings");
    }

    #[test]
    fn test_hydrate_records_placeholder_exercise_and_water() {
        let mut session = Session::new();
        session.hydrate(1).unwrap();

        let entry = &session.store().entries()[0];
        assert_eq!(entry.exercise, EXERCISE_PLACEHOLDER);
        assert_eq!(entry.water_glasses, 1);
        assert_eq!(entry.duration_min, 0);
    }

    #[test]
    fn test_export_then_import_doubles_date_sums() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.csv");
        let d = date(2024, 1, 1);

        let mut session = Session::starting_on(d);
        session.log_entry(full_form(d)).unwrap();
        let mut second = full_form(d);
        second.exercise = "Yoga".to_string();
        second.duration_min = 20;
        session.log_entry(second).unwrap();

        let exported = session.export_csv(&path).unwrap();
        assert_eq!(exported, 2);

        let report = session.import_csv(&path).unwrap();
        assert_eq!(report.merged, 2);
        assert_eq!(session.store().len(), 4);
        assert_eq!(
            session.store().sum(d, MetricField::DurationMin),
            100.0,
            "re-importing the session's own export must double every sum"
        );
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new();
        let err = session
            .import_csv(&dir.path().join("nonexistent.csv"))
            .unwrap_err();
        assert!(
            matches!(err, HealthwaveError::Io { operation: "open", .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_json_export_writes_parseable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        let d = date(2024, 1, 1);

        let mut session = Session::starting_on(d);
        session.log_entry(full_form(d)).unwrap();
        session.export_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<LogEntry> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].exercise, "Run");
    }

    #[test]
    fn test_tip_rotates_daily_and_is_stable_within_a_day() {
        let a = Session::starting_on(date(2024, 3, 1));
        let b = Session::starting_on(date(2024, 3, 2));

        assert_eq!(a.tip_of_the_day(), a.tip_of_the_day());
        assert_ne!(
            a.tip_of_the_day(),
            b.tip_of_the_day(),
            "consecutive days rotate to a different tip"
        );
        assert!(WELLNESS_TIPS.contains(&a.tip_of_the_day()));
    }
}
