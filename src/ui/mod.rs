//! Terminal view
//!
//! Renders a [`SessionSnapshot`] with indicatif: a four-step beat bar, the
//! current and next chord, and a clock line with the settings summary.
//! Notices (errors, command feedback) are printed above the bars.

mod progress;

use crate::format::{beat_markers, format_elapsed};
use crate::session::{RunState, SessionSnapshot};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

pub use progress::{create_beat_progress, create_chord_line, create_clock_line};

pub const TIP: &str = "Tip: strum when each beat lights up. Start slow at 60 BPM, try 4 beats per chord, then drop to 2 or 1 for a challenge.";

/// Text of the chord line for a snapshot.
pub fn chord_message(snapshot: &SessionSnapshot) -> String {
    match snapshot.run_state {
        RunState::Running => format!(
            "{:<4}  Next: {}",
            snapshot.current_chord, snapshot.next_chord
        ),
        RunState::Stopped => "Type 'start' to begin".to_string(),
    }
}

/// Text of the clock line for a snapshot.
pub fn clock_message(snapshot: &SessionSnapshot) -> String {
    format!(
        "{}   {} BPM, {} beats per chord ({:.1}s), chords: {}",
        format_elapsed(snapshot.elapsed_secs),
        snapshot.tempo_bpm,
        snapshot.beats_per_chord,
        snapshot.chord_duration_secs,
        snapshot.pool.join(" ")
    )
}

pub struct ProgressView {
    multi_progress: MultiProgress,
    beat_pb: ProgressBar,
    chord_pb: ProgressBar,
    clock_pb: ProgressBar,
}

impl ProgressView {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// A view that draws nothing, for tests and headless runs.
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let multi_progress = MultiProgress::with_draw_target(target);
        let chord_pb = create_chord_line(&multi_progress);
        let beat_pb = create_beat_progress(&multi_progress);
        let clock_pb = create_clock_line(&multi_progress);

        ProgressView {
            multi_progress,
            beat_pb,
            chord_pb,
            clock_pb,
        }
    }

    pub fn render(&self, snapshot: &SessionSnapshot) {
        self.beat_pb.set_position(u64::from(snapshot.current_beat));
        self.beat_pb.set_message(beat_markers(snapshot.current_beat));
        self.chord_pb.set_message(chord_message(snapshot));
        self.clock_pb.set_message(clock_message(snapshot));
        if snapshot.run_state == RunState::Running {
            self.clock_pb.tick();
        }
    }

    /// Prints a line above the bars.
    pub fn notice(&self, message: &str) {
        log::debug!("Notice: {}", message);
        if self.multi_progress.println(message).is_err() {
            log::warn!("Could not print notice: {}", message);
        }
    }

    pub fn finish(&self) {
        self.beat_pb.finish_and_clear();
        self.chord_pb.finish_and_clear();
        self.clock_pb.finish_and_clear();
    }
}

impl Default for ProgressView {
    fn default() -> Self {
        Self::new()
    }
}
