// HealthWave - render.rs
//
// Plain-text rendering of the dashboard views for the CLI.
// Binary-side module: reads the session through its query surface only and
// never mutates anything.

use crate::app::breathing::{BreathProgress, BreathingManager};
use crate::app::session::Session;
use crate::core::model::{LogEntry, MetricField};
use crate::core::store::LogStore;
use crate::util::constants::BREATH_PHASE_SECS;
use std::time::Duration;

/// Dashboard summary for the session's selected date: the four headline
/// metrics, the date's entries, and the tip of the day.
pub fn summary(session: &Session) {
    let date = session.selected_date;
    let today = session.store().daily_summary(date);

    println!("Summary for {date}");
    println!("  Water (glasses)  {}", today.water_glasses);
    println!("  Exercise (min)   {}", today.exercise_min);
    println!(
        "  Sleep (h)        {}",
        today
            .sleep_h
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| "—".to_string())
    );
    println!(
        "  Mood             {}",
        today.mood.map(|m| m.label()).unwrap_or("—")
    );

    let entries: Vec<&LogEntry> = session.store().entries_on(date).collect();
    println!();
    if entries.is_empty() {
        println!("No entries for this date yet.");
    } else {
        print_entries(entries.into_iter());
    }

    println!();
    println!("Tip of the day: {}", session.tip_of_the_day());
}

/// The most recently logged entries, newest first.
pub fn recent(store: &LogStore, count: usize) {
    let entries = store.tail(count);
    if entries.is_empty() {
        println!("No entries logged yet.");
        return;
    }
    println!("Last {} of {} entries, newest first:", entries.len(), store.len());
    print_entries(entries.iter().rev());
}

/// Date-ordered series of one metric.
pub fn trend(store: &LogStore, field: MetricField) {
    let series = store.trend(field);
    if series.is_empty() {
        println!("No {field} readings logged yet.");
        return;
    }
    println!("{field} trend ({} points):", series.len());
    for point in &series {
        println!("  {}  {}", point.date, point.value);
    }
}

/// Total exercise minutes per activity, heaviest first.
pub fn activity(store: &LogStore) {
    let totals = store.activity_totals();
    if totals.is_empty() {
        println!("No entries logged yet.");
        return;
    }

    // HashMap iteration order is arbitrary; sort for stable output.
    let mut rows: Vec<(String, u64)> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    println!("Exercise minutes by activity:");
    for (label, minutes) in &rows {
        println!("  {label:<20} {minutes:>5} min");
    }
}

/// Runs a guided breathing session, printing one cue line per second.
///
/// Blocks until the background timer announces completion.
pub fn breathe(seconds: u64) {
    let mut manager = BreathingManager::new();
    manager.start(seconds);

    loop {
        for msg in manager.poll_progress() {
            match msg {
                BreathProgress::Started { total_secs } => {
                    println!(
                        "Box breathing for {total_secs}s: \
                         inhale, hold, exhale, hold ({BREATH_PHASE_SECS}s each)."
                    );
                }
                BreathProgress::Tick {
                    remaining_secs,
                    cue,
                } => {
                    println!(
                        "  {:<6} {}s   ({remaining_secs}s remaining)",
                        cue.phase.label(),
                        cue.phase_seconds_left
                    );
                }
                BreathProgress::Finished => {
                    println!("Session complete! Great job 🎉");
                    return;
                }
                BreathProgress::Stopped => return,
            }
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

/// Fixed-width entry table shared by the summary and recent views.
/// Absent readings render as empty cells.
fn print_entries<'a>(entries: impl Iterator<Item = &'a LogEntry>) {
    println!(
        "  {:<12} {:<16} {:>4} {:>6} {:>6} {:<10} {:>5} {:>7}",
        "date", "exercise", "min", "water", "sleep", "mood", "kcal", "kg"
    );
    for e in entries {
        println!(
            "  {:<12} {:<16} {:>4} {:>6} {:>6} {:<10} {:>5} {:>7}",
            e.date.to_string(),
            e.exercise,
            e.duration_min,
            e.water_glasses,
            e.sleep_h.map(|v| format!("{v:.1}")).unwrap_or_default(),
            e.mood.map(|m| m.label()).unwrap_or(""),
            e.calories.map(|v| v.to_string()).unwrap_or_default(),
            e.weight_kg.map(|v| format!("{v:.1}")).unwrap_or_default(),
        );
    }
}
