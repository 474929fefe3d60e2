// HealthWave - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "HealthWave";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Entry field bounds
// =============================================================================
// Manual-entry forms validate against these before an entry is created; the
// store itself trusts its producers and never re-checks.

/// Maximum exercise duration accepted for a single entry (minutes).
/// Ten hours comfortably covers ultra-distance events while still catching
/// "typed an extra zero" mistakes.
pub const MAX_DURATION_MIN: u32 = 600;

/// Maximum glasses of water accepted for a single entry.
pub const MAX_WATER_GLASSES: u32 = 50;

/// Maximum hours of sleep accepted for a single entry.
/// A calendar day is the natural ceiling.
pub const MAX_SLEEP_HOURS: f64 = 24.0;

/// Maximum calories accepted for a single entry.
pub const MAX_CALORIES: u32 = 10_000;

/// Minimum body weight accepted for a single entry (kilograms).
pub const MIN_WEIGHT_KG: f64 = 20.0;

/// Maximum body weight accepted for a single entry (kilograms).
pub const MAX_WEIGHT_KG: f64 = 300.0;

/// Label stored when a manual entry leaves the exercise field blank.
///
/// Only the manual-entry paths substitute this; imported rows keep whatever
/// text the file carried, including an empty cell.  Hydration quick-actions
/// always carry it, so it also serves as the "no exercise" bucket in the
/// per-activity totals.
pub const EXERCISE_PLACEHOLDER: &str = "—";

// =============================================================================
// Quick-action defaults
// =============================================================================

/// Default duration pre-filled by the quick-log form (minutes).
pub const DEFAULT_QUICK_DURATION_MIN: u32 = 20;

/// Default water count pre-filled by the quick-log form (glasses).
pub const DEFAULT_QUICK_WATER_GLASSES: u32 = 2;

/// Glasses recorded by a single hydration quick-action.
pub const DEFAULT_HYDRATION_GLASSES: u32 = 1;

/// Number of entries shown by the recent-entries view by default.
pub const DEFAULT_RECENT_COUNT: usize = 7;

// =============================================================================
// CSV schema
// =============================================================================

/// Column order written by the CSV export and required (in any order) by the
/// CSV import.  Import ignores columns outside this set.
pub const CSV_COLUMNS: [&str; 8] = [
    "date",
    "exercise",
    "duration_min",
    "water_glasses",
    "sleep_h",
    "mood",
    "calories",
    "weight_kg",
];

/// Date format used in the `date` column and accepted by date arguments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum number of per-row errors retained by a single import before
/// suppression.  The skipped-row count keeps counting; only the detail list
/// stops growing, so a pathological file cannot balloon memory.
pub const MAX_IMPORT_ROW_ERRORS: usize = 1_000;

// =============================================================================
// Breathing timer cadence
// =============================================================================

/// Length of one full box-breathing cycle (seconds).
pub const BREATH_CYCLE_SECS: u64 = 16;

/// Length of each phase within the cycle (seconds).  Four equal phases:
/// inhale, hold, exhale, hold.
pub const BREATH_PHASE_SECS: u64 = 4;

/// Default guided session length (seconds).
pub const DEFAULT_BREATHING_SESSION_SECS: u64 = 60;

/// Longest session the timer will accept (seconds).  One hour is already far
/// beyond any guided-breathing use; the bound mostly guards against typos.
pub const MAX_BREATHING_SESSION_SECS: u64 = 3_600;

/// How often the timer thread emits a cue tick (ms).
pub const BREATH_TICK_INTERVAL_MS: u64 = 1_000;

/// How often the cancel flag is checked within each tick sleep interval (ms).
/// The background thread wakes every this many ms to check for cancellation.
pub const BREATH_CANCEL_CHECK_INTERVAL_MS: u64 = 100;

// =============================================================================
// Wellness tips
// =============================================================================

/// Rotating tip pool shown on the dashboard, one per calendar day.
pub const WELLNESS_TIPS: &[&str] = &[
    "Drink a glass of water first thing in the morning. 💧",
    "Stand up and stretch every hour to improve circulation. 🧘",
    "Aim for 7–9 hours of sleep for better recovery. 🛌",
    "Short high-intensity bursts (1–2 min) can boost metabolism. 🏃‍♂️",
    "Practice box breathing: 4s inhale - 4s hold - 4s exhale - 4s hold. 🫁",
];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
