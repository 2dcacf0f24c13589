// event_loop.rs

use crate::chords::{ChordPicker, CATALOG};
use crate::error::SessionError;
use crate::format::format_elapsed;
use crate::input::HELP;
use crate::session::{PracticeSession, TickEvent};
use crate::ui::ProgressView;
use chrono::{DateTime, Local};
use crossbeam::channel::{Receiver, RecvTimeoutError};
use log::{debug, error, info, warn};
use std::thread;
use std::time::{Duration, Instant};

/// Longest the loop waits for input when no timer is armed.
const IDLE_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Tempo(u32),
    Beats(u32),
    Toggle(String),
    Status,
    ListChords,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineMessage {
    Command(Command),
    Unrecognized(String),
}

/// What happened over one run of the event loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PracticeSummary {
    pub sessions_started: u32,
    pub chord_changes: u64,
    pub practice_secs: u64,
    pub first_started_at: Option<DateTime<Local>>,
}

impl PracticeSummary {
    pub fn describe(&self) -> String {
        match self.first_started_at {
            Some(started) => format!(
                "Practiced {} across {} session(s) since {}, {} chord changes",
                format_elapsed(self.practice_secs),
                self.sessions_started,
                started.format("%H:%M:%S"),
                self.chord_changes
            ),
            None => "No practice session was started".to_string(),
        }
    }
}

/// Drives a [`PracticeSession`] in real time. Commands and timer ticks are
/// handled on this one thread, in the order they happen.
pub struct EventLoop<P: ChordPicker> {
    session: PracticeSession<P>,
    message_rx: Receiver<EngineMessage>,
    view: ProgressView,
    time_limit: Option<Duration>,
    summary: PracticeSummary,
}

impl<P: ChordPicker> EventLoop<P> {
    pub fn new(
        session: PracticeSession<P>,
        message_rx: Receiver<EngineMessage>,
        view: ProgressView,
    ) -> Self {
        EventLoop {
            session,
            message_rx,
            view,
            time_limit: None,
            summary: PracticeSummary::default(),
        }
    }

    /// Ends the loop once this much wall-clock time has passed.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Runs until `quit`, the time limit, or (without a time limit) until
    /// every message sender has gone away. The session is stopped on exit.
    pub fn run(mut self) -> (PracticeSession<P>, PracticeSummary) {
        info!("Event loop running");
        if self.session.is_running() {
            self.record_start();
        }
        let origin = Instant::now();
        let timeline_origin = self.session.now();
        let mut inputs_open = true;
        self.view.render(&self.session.snapshot());

        loop {
            let now = origin.elapsed();
            self.catch_up(timeline_origin + now);

            let remaining = match self.time_limit {
                Some(limit) if now >= limit => {
                    info!("Practice time limit of {:?} reached", limit);
                    break;
                }
                Some(limit) => Some(limit - now),
                None => None,
            };

            let mut wait = self
                .session
                .time_until_next_tick()
                .unwrap_or(IDLE_POLL)
                .min(IDLE_POLL);
            if let Some(remaining) = remaining {
                wait = wait.min(remaining);
            }

            if !inputs_open {
                thread::sleep(wait);
                continue;
            }

            let message = match self.message_rx.recv_timeout(wait) {
                Ok(message) => message,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    if self.time_limit.is_none() {
                        info!("Command channel closed; leaving event loop");
                        break;
                    }
                    debug!("Command channel closed; running until the time limit");
                    inputs_open = false;
                    continue;
                }
            };

            // Commands apply at the instant they arrive, after every tick
            // due before it.
            self.catch_up(timeline_origin + origin.elapsed());

            match message {
                EngineMessage::Command(Command::Quit) => {
                    info!("Quit requested");
                    break;
                }
                EngineMessage::Command(command) => {
                    self.handle_command(command);
                    self.view.render(&self.session.snapshot());
                }
                EngineMessage::Unrecognized(line) => {
                    self.view
                        .notice(&format!("Unknown command '{}'. {}", line.trim(), HELP));
                }
            }
        }

        self.finish_run();
        self.view.finish();
        (self.session, self.summary)
    }

    /// Fires every tick due up to `instant` and redraws if anything changed.
    fn catch_up(&mut self, instant: Duration) {
        let events = self.session.advance_to(instant);
        if !events.is_empty() {
            self.record_events(&events);
            self.view.render(&self.session.snapshot());
        }
    }

    fn handle_command(&mut self, command: Command) {
        debug!("Handling command: {:?}", command);
        let result = match command {
            Command::Start => {
                self.finish_run();
                self.session.start().map(|()| self.record_start())
            }
            Command::Stop => {
                self.finish_run();
                self.session.stop();
                Ok(())
            }
            Command::Tempo(bpm) => self.session.set_tempo(bpm),
            Command::Beats(beats) => self.session.set_beats_per_chord(beats),
            Command::Toggle(chord) => self.session.toggle_chord(&chord).map(|selected| {
                let verb = if selected { "Added" } else { "Removed" };
                self.view.notice(&format!(
                    "{} {}; pool: {}",
                    verb,
                    chord.trim(),
                    self.session.pool().to_vec().join(" ")
                ));
            }),
            Command::Status => {
                let snapshot = self.session.snapshot();
                self.view.notice(&format!(
                    "{:?}: {} BPM, {} beats per chord ({:.1}s per chord), elapsed {}, chords: {}",
                    snapshot.run_state,
                    snapshot.tempo_bpm,
                    snapshot.beats_per_chord,
                    snapshot.chord_duration_secs,
                    format_elapsed(snapshot.elapsed_secs),
                    snapshot.pool.join(" ")
                ));
                Ok(())
            }
            Command::ListChords => {
                self.view
                    .notice(&format!("Available chords: {}", CATALOG.join(" ")));
                Ok(())
            }
            Command::Help => {
                self.view.notice(HELP);
                Ok(())
            }
            Command::Quit => Ok(()),
        };

        if let Err(e) = result {
            self.report_error(&e);
        }
    }

    fn report_error(&self, e: &SessionError) {
        match e {
            SessionError::InvalidStart | SessionError::DegeneratePoolDuringRun => {
                warn!("{}", e)
            }
            _ => error!("{}", e),
        }
        self.view.notice(&e.to_string());
    }

    fn record_start(&mut self) {
        self.summary.sessions_started += 1;
        if self.summary.first_started_at.is_none() {
            self.summary.first_started_at = Some(Local::now());
        }
    }

    fn record_events(&mut self, events: &[TickEvent]) {
        for event in events {
            match event {
                TickEvent::ChordChanged { .. } => self.summary.chord_changes += 1,
                TickEvent::PoolExhausted => {
                    self.view
                        .notice("No chords selected; holding the current chord");
                }
                TickEvent::ClockTicked { .. } | TickEvent::BeatTicked { .. } => {}
            }
        }
    }

    /// Banks the elapsed seconds of a running session before it is stopped
    /// or restarted.
    fn finish_run(&mut self) {
        if self.session.is_running() {
            self.summary.practice_secs += self.session.elapsed_secs();
            self.session.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_without_sessions() {
        let summary = PracticeSummary::default();
        assert_eq!(summary.describe(), "No practice session was started");
    }

    #[test]
    fn test_summary_mentions_practice_time() {
        let summary = PracticeSummary {
            sessions_started: 2,
            chord_changes: 30,
            practice_secs: 125,
            first_started_at: Some(Local::now()),
        };
        let text = summary.describe();
        assert!(text.starts_with("Practiced 2:05 across 2 session(s) since "));
        assert!(text.ends_with("30 chord changes"));
    }
}
