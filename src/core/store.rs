// HealthWave - core/store.rs
//
// The in-memory log store and its derived views.
// Core layer: pure data structure, no I/O, no clock, no UI.
//
// The store is an append-only sequence owned by the session that created
// it.  Every view the dashboard renders (daily summary, recent entries,
// trends, per-activity totals) is derived on demand from this one
// sequence; nothing is cached, so views can never drift out of step with
// the data.

use crate::core::model::{DailySummary, LogEntry, MetricField, TrendPoint};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Ordered, session-scoped collection of wellness log entries.
///
/// Entries are kept in insertion order.  "Latest" always means "appended
/// most recently", which for same-date entries is what lets a correction
/// logged later in the day supersede the morning's reading.
#[derive(Debug, Default)]
pub struct LogStore {
    entries: Vec<LogEntry>,
}

impl LogStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Appends an entry.  Append never fails and never reorders: the store
    /// trusts its producers to have validated field ranges already.
    pub fn append(&mut self, entry: LogEntry) {
        tracing::debug!(
            date = %entry.date,
            exercise = %entry.exercise,
            "Entry appended"
        );
        self.entries.push(entry);
    }

    /// Entries recorded on `date`, in insertion order.
    pub fn entries_on(&self, date: NaiveDate) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.date == date)
    }

    /// Most recently appended non-absent reading of a field on `date`.
    ///
    /// `field` projects an entry to an optional reading; entries where it
    /// yields `None` are skipped, so an afternoon entry that did not capture
    /// sleep does not erase the morning's sleep reading.
    pub fn latest_value<T>(
        &self,
        date: NaiveDate,
        field: impl Fn(&LogEntry) -> Option<T>,
    ) -> Option<T> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.date == date)
            .find_map(|e| field(e))
    }

    /// Sum of a metric across all entries on `date`.
    ///
    /// Absent readings contribute nothing.  The result depends only on the
    /// set of entries for the date, never on the order they arrived in.
    pub fn sum(&self, date: NaiveDate, field: MetricField) -> f64 {
        self.entries_on(date)
            .filter_map(|e| field.extract(e))
            .sum()
    }

    /// The `n` most recently appended entries, oldest of those first.
    ///
    /// Asking for more entries than exist returns everything.
    pub fn tail(&self, n: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Date-ordered series of a metric across the whole store.
    ///
    /// Entries without a reading for the field are excluded.  Points are
    /// sorted by date; entries sharing a date keep their insertion order
    /// (stable sort), so a chart of same-day readings replays the day.
    pub fn trend(&self, field: MetricField) -> Vec<TrendPoint> {
        let mut points: Vec<TrendPoint> = self
            .entries
            .iter()
            .filter_map(|e| {
                field.extract(e).map(|value| TrendPoint {
                    date: e.date,
                    value,
                })
            })
            .collect();
        points.sort_by_key(|p| p.date);
        points
    }

    /// Total exercise minutes grouped by exact activity label.
    ///
    /// Labels are not normalised: "run" and "Run" are distinct buckets, and
    /// the placeholder label used by hydration quick-actions gets a bucket
    /// of its own.  Activities logged only with zero-duration entries still
    /// appear, with a total of 0.
    pub fn activity_totals(&self) -> HashMap<String, u64> {
        let mut totals: HashMap<String, u64> = HashMap::new();
        for entry in &self.entries {
            *totals.entry(entry.exercise.clone()).or_insert(0) += u64::from(entry.duration_min);
        }
        totals
    }

    /// Dashboard metrics for a single date.
    pub fn daily_summary(&self, date: NaiveDate) -> DailySummary {
        DailySummary {
            date,
            water_glasses: self
                .entries_on(date)
                .map(|e| u64::from(e.water_glasses))
                .sum(),
            exercise_min: self
                .entries_on(date)
                .map(|e| u64::from(e.duration_min))
                .sum(),
            sleep_h: self.latest_value(date, |e| e.sleep_h),
            mood: self.latest_value(date, |e| e.mood),
            entry_count: self.entries_on(date).count(),
        }
    }
}
