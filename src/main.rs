// HealthWave - main.rs
//
// CLI entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Session setup (optional CSV seed via --import)
// 4. Command dispatch

mod render;

// Re-export modules from the library crate so that `render.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use healthwave::app;
pub use healthwave::core;
pub use healthwave::util;

use app::session::{today, EntryForm, Session};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use healthwave::core::model::{MetricField, Mood};
use std::path::{Path, PathBuf};
use util::constants;
use util::error::{EntryError, HealthwaveError};

/// HealthWave - personal wellness logging dashboard.
///
/// Logs exercise, water, sleep, mood, calories and weight into a
/// session-scoped store, renders derived views over it, and reads and
/// writes the portable CSV export format.
#[derive(Parser, Debug)]
#[command(name = "healthwave", version, about)]
struct Cli {
    /// CSV export file to merge into the session before the command runs.
    #[arg(short = 'i', long = "import")]
    import: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the dashboard summary for one date (today by default).
    Summary {
        /// Date to summarise, YYYY-MM-DD.
        #[arg(long)]
        date: Option<String>,
    },

    /// List the most recently logged entries.
    Recent {
        /// Number of entries to show.
        #[arg(short = 'n', long, default_value_t = constants::DEFAULT_RECENT_COUNT)]
        count: usize,
    },

    /// Show the date-ordered series of one numeric field.
    Trend {
        /// Field to chart: duration, water, sleep, calories or weight.
        #[arg(long)]
        field: String,
    },

    /// Show total exercise minutes grouped by activity.
    Activity,

    /// Log a full daily entry.
    Log {
        /// Entry date, YYYY-MM-DD (today by default).
        #[arg(long)]
        date: Option<String>,

        /// Exercise label (placeholder when omitted).
        #[arg(long)]
        exercise: Option<String>,

        /// Exercise duration in minutes.
        #[arg(long, default_value_t = 0)]
        duration: u32,

        /// Glasses of water.
        #[arg(long, default_value_t = 0)]
        water: u32,

        /// Hours slept.
        #[arg(long)]
        sleep: Option<f64>,

        /// Mood label: Very Bad, Bad, Neutral, Good or Very Good.
        #[arg(long)]
        mood: Option<String>,

        /// Approximate calories consumed.
        #[arg(long)]
        calories: Option<u32>,

        /// Body weight in kilograms.
        #[arg(long)]
        weight: Option<f64>,

        /// Write the updated store to this CSV file afterwards.
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,
    },

    /// Log a quick entry (exercise, duration, water) dated today.
    Quick {
        /// Exercise label (placeholder when omitted).
        #[arg(long)]
        exercise: Option<String>,

        /// Exercise duration in minutes.
        #[arg(long, default_value_t = constants::DEFAULT_QUICK_DURATION_MIN)]
        duration: u32,

        /// Glasses of water.
        #[arg(long, default_value_t = constants::DEFAULT_QUICK_WATER_GLASSES)]
        water: u32,

        /// Write the updated store to this CSV file afterwards.
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,
    },

    /// Log a hydration quick-action dated today.
    Hydrate {
        /// Glasses to record.
        #[arg(long, default_value_t = constants::DEFAULT_HYDRATION_GLASSES)]
        glasses: u32,

        /// Write the updated store to this CSV file afterwards.
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,
    },

    /// Write the session store to a CSV file.
    Export {
        /// Output path.
        out: PathBuf,
    },

    /// Write the session store to a JSON file.
    Json {
        /// Output path.
        out: PathBuf,
    },

    /// Run the guided box-breathing timer.
    Breathe {
        /// Session length in seconds.
        #[arg(long, default_value_t = constants::DEFAULT_BREATHING_SESSION_SECS)]
        seconds: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialise logging subsystem
    util::logging::init(cli.debug);

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "HealthWave starting"
    );

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), HealthwaveError> {
    let mut session = Session::new();

    // Seed the store from a previous session's export, if requested.
    if let Some(path) = &cli.import {
        let report = session.import_csv(path)?;
        println!("Imported {} row(s) from '{}'.", report.merged, path.display());
        if report.skipped() > 0 {
            eprintln!("Warning: {} row(s) could not be used:", report.skipped());
            for err in &report.row_errors {
                eprintln!("  {err}");
            }
        }
    }

    match cli.command {
        Command::Summary { date } => {
            if let Some(raw) = date {
                session.select_date(parse_date(&raw)?);
            }
            render::summary(&session);
        }

        Command::Recent { count } => render::recent(session.store(), count),

        Command::Trend { field } => {
            let field = match MetricField::from_label(&field) {
                Some(f) => f,
                None => {
                    eprintln!(
                        "Error: unknown field '{field}'. \
                         Expected one of: duration, water, sleep, calories, weight."
                    );
                    std::process::exit(2);
                }
            };
            render::trend(session.store(), field);
        }

        Command::Activity => render::activity(session.store()),

        Command::Log {
            date,
            exercise,
            duration,
            water,
            sleep,
            mood,
            calories,
            weight,
            out,
        } => {
            let entry_date = match date {
                Some(raw) => parse_date(&raw)?,
                None => today(),
            };
            let mood = match mood {
                Some(raw) => {
                    Some(Mood::from_label(&raw).ok_or(EntryError::UnknownMood { value: raw })?)
                }
                None => None,
            };
            let form = EntryForm {
                date: entry_date,
                exercise: exercise.unwrap_or_default(),
                duration_min: duration,
                water_glasses: water,
                sleep_h: sleep,
                mood,
                calories,
                weight_kg: weight,
            };
            session.log_entry(form)?;
            println!("Entry saved for {entry_date}.");
            write_back(&session, out.as_deref())?;
        }

        Command::Quick {
            exercise,
            duration,
            water,
            out,
        } => {
            session.quick_log(exercise.as_deref().unwrap_or(""), duration, water)?;
            println!("Quick log saved for {}.", today());
            write_back(&session, out.as_deref())?;
        }

        Command::Hydrate { glasses, out } => {
            session.hydrate(glasses)?;
            let total = session.store().sum(today(), MetricField::WaterGlasses);
            println!("Hydration logged: {glasses} glass(es). Total today: {total}.");
            write_back(&session, out.as_deref())?;
        }

        Command::Export { out } => {
            let count = session.export_csv(&out)?;
            println!("Wrote {count} row(s) to '{}'.", out.display());
        }

        Command::Json { out } => {
            let count = session.export_json(&out)?;
            println!("Wrote {count} entries to '{}'.", out.display());
        }

        Command::Breathe { seconds } => {
            if seconds == 0 || seconds > constants::MAX_BREATHING_SESSION_SECS {
                return Err(EntryError::ValueOutOfRange {
                    field: "seconds",
                    value: seconds.to_string(),
                    expected: format!("1..={}", constants::MAX_BREATHING_SESSION_SECS),
                }
                .into());
            }
            render::breathe(seconds);
        }
    }

    Ok(())
}

/// Parses a YYYY-MM-DD date argument.
fn parse_date(raw: &str) -> Result<NaiveDate, HealthwaveError> {
    NaiveDate::parse_from_str(raw.trim(), constants::DATE_FORMAT).map_err(|_| {
        EntryError::InvalidDate {
            value: raw.to_string(),
        }
        .into()
    })
}

/// Writes the store to `out` after a successful mutation, when requested.
///
/// The store is session-scoped, so without `--out` (or a later `export`)
/// a logged entry lives only for this invocation.
fn write_back(session: &Session, out: Option<&Path>) -> Result<(), HealthwaveError> {
    if let Some(path) = out {
        let count = session.export_csv(path)?;
        println!("Wrote {count} row(s) to '{}'.", path.display());
    }
    Ok(())
}
