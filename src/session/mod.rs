//! Practice session engine
//!
//! Owns the configuration and the run state, and drives three repeating
//! timers on a single [`Timeline`]:
//! - the clock, once per second, counting elapsed seconds
//! - the beat, once per `60000 / tempo` ms, cycling 1..=4
//! - the chord rotator, once per beat period × beats per chord
//!
//! Tick handlers never capture configuration. Every tick is routed back into
//! the session and reads the live fields, and a tick from a timer that is no
//! longer the session's current one is ignored.

mod config;
pub mod timeline;

pub use self::config::{beat_period, SessionConfig};
pub use self::timeline::{Timeline, TimerId};

use crate::chords::{self, ChordPicker, ChordPool, RandomPicker};
use crate::config::{BEATS_PER_BAR, CLOCK_PERIOD};
use crate::error::{ConfigIssue, Result, SessionError};
use log::{debug, info, trace, warn};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// The three repeating processes of a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ticker {
    Clock,
    Beat,
    Chord,
}

/// Observable state change produced while advancing the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    ClockTicked { elapsed_secs: u64 },
    BeatTicked { beat: u8 },
    ChordChanged { current: String, next: String },
    /// The pool was empty at chord-tick time and the current chord was kept.
    PoolExhausted,
}

/// Read-only copy of everything a view may render.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub run_state: RunState,
    pub current_chord: String,
    pub next_chord: String,
    pub current_beat: u8,
    pub elapsed_secs: u64,
    pub tempo_bpm: u32,
    pub beats_per_chord: u32,
    pub pool: Vec<String>,
    pub chord_duration_secs: f64,
}

#[derive(Debug, Default)]
struct Timers {
    clock: Option<TimerId>,
    beat: Option<TimerId>,
    chord: Option<TimerId>,
}

impl Timers {
    fn slot(&mut self, ticker: Ticker) -> &mut Option<TimerId> {
        match ticker {
            Ticker::Clock => &mut self.clock,
            Ticker::Beat => &mut self.beat,
            Ticker::Chord => &mut self.chord,
        }
    }
}

pub struct PracticeSession<P: ChordPicker = RandomPicker> {
    config: SessionConfig,
    live_tempo: bool,
    run_state: RunState,
    current_chord: String,
    next_chord: String,
    current_beat: u8,
    elapsed_secs: u64,
    timeline: Timeline<Ticker>,
    timers: Timers,
    picker: P,
    pool_warning_logged: bool,
}

impl<P: ChordPicker> PracticeSession<P> {
    pub fn new(config: SessionConfig, picker: P) -> Self {
        info!(
            "Creating practice session: {} BPM, {} beats per chord, pool {:?}",
            config.tempo_bpm(),
            config.beats_per_chord(),
            config.pool().to_vec()
        );
        PracticeSession {
            config,
            live_tempo: false,
            run_state: RunState::Stopped,
            current_chord: String::new(),
            next_chord: String::new(),
            current_beat: 0,
            elapsed_secs: 0,
            timeline: Timeline::new(),
            timers: Timers::default(),
            picker,
            pool_warning_logged: false,
        }
    }

    /// Allows tempo and beats-per-chord changes while running. They take
    /// effect by re-arming the affected timers.
    pub fn allow_live_tempo(mut self, allow: bool) -> Self {
        self.live_tempo = allow;
        self
    }

    pub fn configure(
        &mut self,
        tempo_bpm: u32,
        beats_per_chord: u32,
        pool: ChordPool,
    ) -> Result<()> {
        self::config::validate_tempo(tempo_bpm)?;
        self::config::validate_beats(beats_per_chord)?;

        let tempo_changed = tempo_bpm != self.config.tempo_bpm();
        let beats_changed = beats_per_chord != self.config.beats_per_chord();
        let pool_changed = pool != *self.config.pool();

        if self.is_running() {
            if (tempo_changed || beats_changed) && !self.live_tempo {
                return Err(SessionError::LockedWhileRunning);
            }
            if pool.is_empty() {
                return Err(SessionError::DegeneratePoolDuringRun);
            }
        }

        self.config = SessionConfig::new(tempo_bpm, beats_per_chord, pool)?;
        info!(
            "Configured session: {} BPM, {} beats per chord, pool {:?}",
            tempo_bpm,
            beats_per_chord,
            self.config.pool().to_vec()
        );

        if tempo_changed {
            self.rearm(Ticker::Beat);
        }
        if tempo_changed || beats_changed || pool_changed {
            self.rearm(Ticker::Chord);
        }
        Ok(())
    }

    pub fn set_tempo(&mut self, tempo_bpm: u32) -> Result<()> {
        let pool = self.config.pool().clone();
        self.configure(tempo_bpm, self.config.beats_per_chord(), pool)
    }

    pub fn set_beats_per_chord(&mut self, beats_per_chord: u32) -> Result<()> {
        let pool = self.config.pool().clone();
        self.configure(self.config.tempo_bpm(), beats_per_chord, pool)
    }

    /// Adds the chord to the pool if absent, removes it if present. Returns
    /// whether the chord is selected afterwards.
    pub fn toggle_chord(&mut self, name: &str) -> Result<bool> {
        let chord = chords::lookup(name)
            .ok_or_else(|| ConfigIssue::UnknownChord(name.trim().to_string()))?;

        let removing_last = self.config.pool().len() == 1 && self.config.pool().contains(chord);
        if self.is_running() && removing_last {
            return Err(SessionError::DegeneratePoolDuringRun);
        }

        let selected = self.config.pool_mut().toggle(chord);
        debug!(
            "Toggled {} {}, pool is now {:?}",
            chord,
            if selected { "on" } else { "off" },
            self.config.pool().to_vec()
        );
        self.rearm(Ticker::Chord);
        Ok(selected)
    }

    pub fn start(&mut self) -> Result<()> {
        if self.config.pool().is_empty() {
            warn!("Refusing to start with an empty chord pool");
            return Err(SessionError::InvalidStart);
        }
        if self.is_running() {
            debug!("Restarting a running session; cancelling its timers first");
            self.stop();
        }

        self.run_state = RunState::Running;
        self.elapsed_secs = 0;
        self.current_beat = 1;
        self.pool_warning_logged = false;
        self.current_chord = self.draw_chord().unwrap_or_default().to_string();
        self.next_chord = self.draw_chord().unwrap_or_default().to_string();

        self.arm(Ticker::Clock);
        self.arm(Ticker::Beat);
        self.arm(Ticker::Chord);

        info!(
            "Session started at {} BPM: current {}, next {}",
            self.config.tempo_bpm(),
            self.current_chord,
            self.next_chord
        );
        Ok(())
    }

    pub fn stop(&mut self) {
        for ticker in [Ticker::Clock, Ticker::Beat, Ticker::Chord] {
            self.disarm(ticker);
        }
        if self.is_running() {
            info!("Session stopped after {} seconds", self.elapsed_secs);
        }
        self.run_state = RunState::Stopped;
        self.current_chord.clear();
        self.next_chord.clear();
        self.current_beat = 0;
    }

    /// Fires every tick due up to `instant` on the session's timeline, in
    /// time order.
    pub fn advance_to(&mut self, instant: Duration) -> Vec<TickEvent> {
        let mut events = Vec::new();
        while let Some((id, ticker)) = self.timeline.pop_due(instant) {
            if *self.timers.slot(ticker) != Some(id) {
                trace!("Ignoring stale {:?} tick from {:?}", ticker, id);
                continue;
            }
            let event = match ticker {
                Ticker::Clock => self.tick_clock(),
                Ticker::Beat => self.tick_beat(),
                Ticker::Chord => self.tick_chord(),
            };
            events.push(event);
        }
        self.timeline.settle(instant);
        events
    }

    pub fn advance_by(&mut self, elapsed: Duration) -> Vec<TickEvent> {
        let target = self.timeline.now() + elapsed;
        self.advance_to(target)
    }

    /// Time remaining until the next armed timer fires.
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.timeline
            .next_due()
            .map(|due| due.saturating_sub(self.timeline.now()))
    }

    fn tick_clock(&mut self) -> TickEvent {
        self.elapsed_secs += 1;
        trace!("Clock tick: {}s", self.elapsed_secs);
        TickEvent::ClockTicked {
            elapsed_secs: self.elapsed_secs,
        }
    }

    fn tick_beat(&mut self) -> TickEvent {
        self.current_beat = if self.current_beat >= BEATS_PER_BAR {
            1
        } else {
            self.current_beat + 1
        };
        trace!("Beat tick: {}", self.current_beat);
        TickEvent::BeatTicked {
            beat: self.current_beat,
        }
    }

    fn tick_chord(&mut self) -> TickEvent {
        match self.draw_chord() {
            Some(drawn) => {
                self.current_chord = std::mem::replace(&mut self.next_chord, drawn.to_string());
                trace!(
                    "Chord tick: current {}, next {}",
                    self.current_chord,
                    self.next_chord
                );
                TickEvent::ChordChanged {
                    current: self.current_chord.clone(),
                    next: self.next_chord.clone(),
                }
            }
            None => {
                if !self.pool_warning_logged {
                    warn!(
                        "Chord pool is empty while running; holding {}",
                        self.current_chord
                    );
                    self.pool_warning_logged = true;
                }
                TickEvent::PoolExhausted
            }
        }
    }

    fn draw_chord(&mut self) -> Option<&'static str> {
        self.config.pool().draw(&mut self.picker)
    }

    fn period(&self, ticker: Ticker) -> Duration {
        match ticker {
            Ticker::Clock => CLOCK_PERIOD,
            Ticker::Beat => self.config.beat_period(),
            Ticker::Chord => self.config.chord_period(),
        }
    }

    fn arm(&mut self, ticker: Ticker) {
        self.disarm(ticker);
        let period = self.period(ticker);
        let id = self.timeline.schedule_repeating(ticker, period);
        *self.timers.slot(ticker) = Some(id);
    }

    fn disarm(&mut self, ticker: Ticker) {
        if let Some(id) = self.timers.slot(ticker).take() {
            self.timeline.cancel(id);
        }
    }

    /// Restarts a running timer with a period from the current config. The
    /// next tick lands one full period from now.
    fn rearm(&mut self, ticker: Ticker) {
        if self.timers.slot(ticker).is_some() {
            debug!("Re-arming {:?} timer at {:?}", ticker, self.period(ticker));
            self.arm(ticker);
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn current_chord(&self) -> &str {
        &self.current_chord
    }

    pub fn next_chord(&self) -> &str {
        &self.next_chord
    }

    pub fn current_beat(&self) -> u8 {
        self.current_beat
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn tempo_bpm(&self) -> u32 {
        self.config.tempo_bpm()
    }

    pub fn beats_per_chord(&self) -> u32 {
        self.config.beats_per_chord()
    }

    pub fn pool(&self) -> &ChordPool {
        self.config.pool()
    }

    /// Current instant on the session's timeline.
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    /// Number of armed timers. At most one per ticker.
    pub fn active_timers(&self) -> usize {
        self.timeline.active_count()
    }

    pub fn timer_period(&self, ticker: Ticker) -> Option<Duration> {
        let id = match ticker {
            Ticker::Clock => self.timers.clock,
            Ticker::Beat => self.timers.beat,
            Ticker::Chord => self.timers.chord,
        }?;
        self.timeline.period_of(id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            run_state: self.run_state,
            current_chord: self.current_chord.clone(),
            next_chord: self.next_chord.clone(),
            current_beat: self.current_beat,
            elapsed_secs: self.elapsed_secs,
            tempo_bpm: self.config.tempo_bpm(),
            beats_per_chord: self.config.beats_per_chord(),
            pool: self.config.pool().to_vec(),
            chord_duration_secs: self.config.chord_duration_secs(),
        }
    }
}
