// HealthWave - app/breathing.rs
//
// Guided box-breathing timer: a fixed 16-second cycle of four 4-second
// phases (inhale, hold, exhale, hold), ticked once per second on a
// background thread.
//
// Architecture:
//   - `BreathingManager` lives on the caller's thread; `run_breathing_timer`
//     runs on a background thread emitting one `BreathProgress::Tick` per
//     second over an mpsc channel.
//   - An `Arc<AtomicBool>` cancel flag lets the caller stop the session
//     early; the thread notices within `BREATH_CANCEL_CHECK_INTERVAL_MS`,
//     sends `Stopped` and exits.  Dropping the manager closes the channel,
//     which also ends the thread on its next send.
//   - The cue for each second is pure arithmetic over elapsed time
//     (`BreathCue::at`), so the cadence is testable without a clock.

use crate::util::constants::{
    BREATH_CANCEL_CHECK_INTERVAL_MS, BREATH_CYCLE_SECS, BREATH_PHASE_SECS, BREATH_TICK_INTERVAL_MS,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

// =============================================================================
// Cue arithmetic
// =============================================================================

/// The four phases of one box-breathing cycle, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Inhale,
    HoldAfterInhale,
    Exhale,
    HoldAfterExhale,
}

impl BreathPhase {
    /// On-screen instruction for the phase.  Both holds read the same.
    pub fn label(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Inhale",
            BreathPhase::HoldAfterInhale | BreathPhase::HoldAfterExhale => "Hold",
            BreathPhase::Exhale => "Exhale",
        }
    }
}

impl std::fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Instruction for one second of the session: the active phase and how many
/// seconds of it remain (counting 4, 3, 2, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathCue {
    pub phase: BreathPhase,
    pub phase_seconds_left: u64,
}

impl BreathCue {
    /// Cue for a given number of whole seconds elapsed since the session
    /// began.  The cycle repeats every `BREATH_CYCLE_SECS`, so any session
    /// length works; a 60-second session simply cuts the fourth cycle short.
    pub fn at(elapsed_secs: u64) -> Self {
        let position = elapsed_secs % BREATH_CYCLE_SECS;
        let phase = match position / BREATH_PHASE_SECS {
            0 => BreathPhase::Inhale,
            1 => BreathPhase::HoldAfterInhale,
            2 => BreathPhase::Exhale,
            _ => BreathPhase::HoldAfterExhale,
        };
        Self {
            phase,
            phase_seconds_left: BREATH_PHASE_SECS - (position % BREATH_PHASE_SECS),
        }
    }
}

// =============================================================================
// Progress messages
// =============================================================================

/// Progress messages sent from the timer thread to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathProgress {
    /// Session started; `total_secs` ticks will follow unless stopped.
    Started { total_secs: u64 },

    /// One second of the session: seconds left overall and the cue to show.
    Tick { remaining_secs: u64, cue: BreathCue },

    /// Session ran to completion.
    Finished,

    /// Session was stopped early by the caller.
    Stopped,
}

// =============================================================================
// BreathingManager
// =============================================================================

/// Manages a guided breathing session on a background thread.
///
/// The manager lives on the caller's thread and exposes a start/stop/poll
/// interface; at most one session runs at a time, and starting a new one
/// stops the previous one first.
pub struct BreathingManager {
    /// Channel receiver the caller polls for progress messages.
    pub progress_rx: Option<mpsc::Receiver<BreathProgress>>,
    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl BreathingManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start a session of `total_secs` seconds.  If a session is already
    /// running it is stopped first.
    pub fn start(&mut self, total_secs: u64) {
        self.stop();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        std::thread::spawn(move || {
            run_breathing_timer(total_secs, tx, cancel);
        });

        tracing::info!(total_secs, "Breathing session started");
    }

    /// Request the background timer thread to stop.
    ///
    /// The thread will exit within `BREATH_CANCEL_CHECK_INTERVAL_MS` and
    /// send `BreathProgress::Stopped` before terminating.
    pub fn stop(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
            tracing::debug!("Breathing session stop requested");
        }
        self.cancel_flag = None;
        self.progress_rx = None;
    }

    /// Returns `true` if a timer background thread is currently active.
    pub fn is_active(&self) -> bool {
        self.cancel_flag.is_some()
    }

    /// Poll for pending progress messages without blocking.
    ///
    /// Drains all currently queued messages and returns them.
    pub fn poll_progress(&self) -> Vec<BreathProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }
}

impl Default for BreathingManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background timer thread
// =============================================================================

/// Timer loop.  Emits the tick for each second first, then sleeps, so the
/// opening "Inhale" cue appears immediately rather than one second in.
fn run_breathing_timer(total_secs: u64, tx: mpsc::Sender<BreathProgress>, cancel: Arc<AtomicBool>) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                // Caller dropped the channel — exit silently.
                return;
            }
        };
    }

    send!(BreathProgress::Started { total_secs });

    // Sub-divide each tick sleep into cancel-check slices.
    let slices = (BREATH_TICK_INTERVAL_MS / BREATH_CANCEL_CHECK_INTERVAL_MS).max(1);

    for remaining_secs in (1..=total_secs).rev() {
        send!(BreathProgress::Tick {
            remaining_secs,
            cue: BreathCue::at(total_secs - remaining_secs),
        });

        // Interruptible sleep: check cancel flag between slices.
        for _ in 0..slices {
            std::thread::sleep(Duration::from_millis(BREATH_CANCEL_CHECK_INTERVAL_MS));
            if cancel.load(Ordering::SeqCst) {
                send!(BreathProgress::Stopped);
                return;
            }
        }
    }

    send!(BreathProgress::Finished);
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_cue_walks_the_four_phases_of_one_cycle() {
        // Second 0-3: inhale, counting down from 4.
        assert_eq!(
            BreathCue::at(0),
            BreathCue {
                phase: BreathPhase::Inhale,
                phase_seconds_left: 4
            }
        );
        assert_eq!(BreathCue::at(3).phase, BreathPhase::Inhale);
        assert_eq!(BreathCue::at(3).phase_seconds_left, 1);

        // Second 4-7: first hold.
        assert_eq!(BreathCue::at(4).phase, BreathPhase::HoldAfterInhale);
        assert_eq!(BreathCue::at(4).phase_seconds_left, 4);
        assert_eq!(BreathCue::at(7).phase_seconds_left, 1);

        // Second 8-11: exhale.
        assert_eq!(BreathCue::at(8).phase, BreathPhase::Exhale);
        assert_eq!(BreathCue::at(11).phase_seconds_left, 1);

        // Second 12-15: second hold.
        assert_eq!(BreathCue::at(12).phase, BreathPhase::HoldAfterExhale);
        assert_eq!(BreathCue::at(15).phase_seconds_left, 1);
    }

    #[test]
    fn test_cue_wraps_after_a_full_cycle() {
        assert_eq!(BreathCue::at(16), BreathCue::at(0));
        assert_eq!(BreathCue::at(59), BreathCue::at(59 % 16));
    }

    #[test]
    fn test_hold_phases_share_a_label_but_not_an_identity() {
        assert_eq!(BreathPhase::HoldAfterInhale.label(), "Hold");
        assert_eq!(BreathPhase::HoldAfterExhale.label(), "Hold");
        assert_ne!(BreathPhase::HoldAfterInhale, BreathPhase::HoldAfterExhale);
    }

    /// Drive a real (short) session end to end through the manager.
    #[test]
    fn test_short_session_emits_started_ticks_finished() {
        let mut manager = BreathingManager::new();
        manager.start(2);
        assert!(manager.is_active());

        let mut messages = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(10);
        while !messages.contains(&BreathProgress::Finished) {
            assert!(Instant::now() < deadline, "session did not finish in time");
            messages.extend(manager.poll_progress());
            std::thread::sleep(Duration::from_millis(20));
        }

        assert_eq!(messages[0], BreathProgress::Started { total_secs: 2 });
        assert_eq!(
            messages[1],
            BreathProgress::Tick {
                remaining_secs: 2,
                cue: BreathCue::at(0)
            },
            "the first tick fires immediately with the opening inhale cue"
        );
        assert_eq!(
            messages[2],
            BreathProgress::Tick {
                remaining_secs: 1,
                cue: BreathCue::at(1)
            }
        );
        assert_eq!(*messages.last().unwrap(), BreathProgress::Finished);
    }

    /// Cancellation path, driven directly so `Stopped` stays observable
    /// (the manager drops its receiver on `stop`).
    #[test]
    fn test_cancel_flag_stops_the_timer_promptly() {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let thread_cancel = Arc::clone(&cancel);
        let handle = std::thread::spawn(move || {
            run_breathing_timer(600, tx, thread_cancel);
        });

        // Wait for the session to be under way, then cancel.
        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            BreathProgress::Started { total_secs: 600 }
        );
        cancel.store(true, Ordering::SeqCst);

        let mut saw_stopped = false;
        while let Ok(msg) = rx.recv_timeout(Duration::from_secs(5)) {
            if msg == BreathProgress::Stopped {
                saw_stopped = true;
                break;
            }
        }
        assert!(saw_stopped, "a cancelled session must announce Stopped");
        handle.join().unwrap();
    }

    #[test]
    fn test_stop_deactivates_the_manager() {
        let mut manager = BreathingManager::new();
        manager.start(600);
        assert!(manager.is_active());

        manager.stop();
        assert!(!manager.is_active());
        assert!(manager.poll_progress().is_empty(), "receiver is gone after stop");
    }

    #[test]
    fn test_zero_length_session_finishes_immediately() {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        run_breathing_timer(0, tx, cancel);

        assert_eq!(
            rx.recv().unwrap(),
            BreathProgress::Started { total_secs: 0 }
        );
        assert_eq!(rx.recv().unwrap(), BreathProgress::Finished);
    }
}
