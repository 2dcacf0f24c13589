//! Chord catalog, the practice pool, and the samplers used to draw from it.

use crate::error::{ConfigIssue, SessionError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Every chord the trainer knows how to show.
pub const CATALOG: [&str; 10] = ["C", "Am", "F", "G", "D", "Em", "A", "Dm", "D7", "G7"];

/// Resolves a user-typed chord name against the catalog, ignoring case.
pub fn lookup(name: &str) -> Option<&'static str> {
    let name = name.trim();
    CATALOG
        .iter()
        .copied()
        .find(|chord| *chord == name)
        .or_else(|| {
            CATALOG
                .iter()
                .copied()
                .find(|chord| chord.eq_ignore_ascii_case(name))
        })
}

/// Ordered set of distinct catalog chords eligible for drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChordPool {
    chords: Vec<&'static str>,
}

impl ChordPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pool in the given order. Fails on names outside the catalog
    /// and on duplicates.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, SessionError> {
        let mut pool = ChordPool::new();
        for name in names {
            let chord = lookup(name.as_ref())
                .ok_or_else(|| ConfigIssue::UnknownChord(name.as_ref().to_string()))?;
            if pool.contains(chord) {
                return Err(ConfigIssue::DuplicateChord(chord.to_string()).into());
            }
            pool.chords.push(chord);
        }
        Ok(pool)
    }

    pub fn contains(&self, chord: &str) -> bool {
        self.chords.iter().any(|c| *c == chord)
    }

    /// Adds the chord if absent, removes it if present. Returns whether the
    /// chord is selected afterwards.
    pub fn toggle(&mut self, chord: &'static str) -> bool {
        if let Some(index) = self.chords.iter().position(|c| *c == chord) {
            self.chords.remove(index);
            false
        } else {
            self.chords.push(chord);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.chords.iter().map(|c| c.to_string()).collect()
    }

    /// Draws one chord uniformly at random, with replacement.
    pub fn draw<P: ChordPicker + ?Sized>(&self, picker: &mut P) -> Option<&'static str> {
        if self.chords.is_empty() {
            return None;
        }
        let index = picker.pick_index(self.chords.len());
        self.chords.get(index.min(self.chords.len() - 1)).copied()
    }
}

/// Source of uniform indices for chord draws.
pub trait ChordPicker: Send {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new() -> Self {
        RandomPicker {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomPicker {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChordPicker for RandomPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed sequence of indices, cycling when exhausted. Each index
/// is reduced modulo the pool length at draw time.
#[derive(Debug, Clone)]
pub struct ScriptedPicker {
    script: VecDeque<usize>,
}

impl ScriptedPicker {
    pub fn new<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        let script: VecDeque<usize> = indices.into_iter().collect();
        ScriptedPicker {
            script: if script.is_empty() {
                VecDeque::from([0])
            } else {
                script
            },
        }
    }
}

impl ChordPicker for ScriptedPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        let next = self.script.pop_front().unwrap_or(0);
        self.script.push_back(next);
        next % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("am"), Some("Am"));
        assert_eq!(lookup(" G7 "), Some("G7"));
        assert_eq!(lookup("dm"), Some("Dm"));
        assert_eq!(lookup("Bb"), None);
    }

    #[test]
    fn test_from_names_rejects_unknown_and_duplicates() {
        assert_eq!(
            ChordPool::from_names(&["C", "H"]),
            Err(SessionError::InvalidConfiguration(ConfigIssue::UnknownChord(
                "H".to_string()
            )))
        );
        assert_eq!(
            ChordPool::from_names(&["C", "c"]),
            Err(SessionError::InvalidConfiguration(
                ConfigIssue::DuplicateChord("C".to_string())
            ))
        );
    }

    #[test]
    fn test_toggle_appends_and_removes() {
        let mut pool = ChordPool::from_names(&["C", "Am"]).unwrap();
        assert!(pool.toggle("D7"));
        assert_eq!(pool.to_vec(), vec!["C", "Am", "D7"]);
        assert!(!pool.toggle("C"));
        assert_eq!(pool.to_vec(), vec!["Am", "D7"]);
    }

    #[test]
    fn test_draw_from_empty_pool_is_none() {
        let pool = ChordPool::new();
        let mut picker = ScriptedPicker::new([3]);
        assert_eq!(pool.draw(&mut picker), None);
    }

    #[test]
    fn test_scripted_picker_cycles_and_wraps() {
        let pool = ChordPool::from_names(&["C", "Am", "F"]).unwrap();
        let mut picker = ScriptedPicker::new([0, 2, 4]);
        let drawn: Vec<_> = (0..4).filter_map(|_| pool.draw(&mut picker)).collect();
        assert_eq!(drawn, vec!["C", "F", "Am", "C"]);
    }

    #[test]
    fn test_seeded_picker_is_reproducible() {
        let mut a = RandomPicker::seeded(7);
        let mut b = RandomPicker::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.pick_index(10), b.pick_index(10));
        }
    }
}
