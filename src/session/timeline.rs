//! Single cooperative timeline of repeating timers in virtual time.
//!
//! Time only moves when the owner pops due timers or settles to a target
//! instant, so every tick is a discrete, serialized event. Timers due at the
//! same instant fire in the order they were armed.

use log::trace;
use std::time::Duration;

/// Timers shorter than this are clamped so a zero period can never spin.
const MIN_PERIOD: Duration = Duration::from_micros(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Repeating<K> {
    id: TimerId,
    kind: K,
    period: Duration,
    next_due: Duration,
}

#[derive(Debug)]
pub struct Timeline<K> {
    now: Duration,
    next_id: u64,
    timers: Vec<Repeating<K>>,
}

impl<K> Default for Timeline<K> {
    fn default() -> Self {
        Timeline {
            now: Duration::ZERO,
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<K: Copy + std::fmt::Debug> Timeline<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arms a timer whose first tick is one full period from now.
    pub fn schedule_repeating(&mut self, kind: K, period: Duration) -> TimerId {
        let period = period.max(MIN_PERIOD);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        trace!("Arming {:?} timer {:?} every {:?}", kind, id, period);
        self.timers.push(Repeating {
            id,
            kind,
            period,
            next_due: self.now + period,
        });
        id
    }

    /// Returns whether a timer was actually removed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        before != self.timers.len()
    }

    pub fn period_of(&self, id: TimerId) -> Option<Duration> {
        self.timers
            .iter()
            .find(|timer| timer.id == id)
            .map(|timer| timer.period)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Instant of the earliest pending tick, if any timer is armed.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.next_due).min()
    }

    /// Pops the earliest tick due at or before `until`, moving `now` to its
    /// instant and rescheduling the timer one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, K)> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|timer| timer.next_due <= until)
            .min_by_key(|timer| (timer.next_due, timer.id))?;

        self.now = self.now.max(timer.next_due);
        timer.next_due += timer.period;
        Some((timer.id, timer.kind))
    }

    /// Moves `now` forward to `until` once nothing more is due. Never moves
    /// backwards.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
