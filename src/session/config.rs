use crate::chords::ChordPool;
use crate::config::{
    DEFAULT_BEATS_PER_CHORD, DEFAULT_CHORDS, DEFAULT_TEMPO_BPM, MAX_BEATS_PER_CHORD,
    MAX_TEMPO_BPM, MIN_BEATS_PER_CHORD, MIN_TEMPO_BPM,
};
use crate::error::{ConfigIssue, SessionError};
use std::time::Duration;

const NANOS_PER_MINUTE: u64 = 60_000_000_000;

/// Validated tempo, beats per chord and chord pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    tempo_bpm: u32,
    beats_per_chord: u32,
    pool: ChordPool,
}

impl SessionConfig {
    pub fn new(tempo_bpm: u32, beats_per_chord: u32, pool: ChordPool) -> Result<Self, SessionError> {
        validate_tempo(tempo_bpm)?;
        validate_beats(beats_per_chord)?;
        Ok(SessionConfig {
            tempo_bpm,
            beats_per_chord,
            pool,
        })
    }

    pub fn tempo_bpm(&self) -> u32 {
        self.tempo_bpm
    }

    pub fn beats_per_chord(&self) -> u32 {
        self.beats_per_chord
    }

    pub fn pool(&self) -> &ChordPool {
        &self.pool
    }

    pub(crate) fn pool_mut(&mut self) -> &mut ChordPool {
        &mut self.pool
    }

    /// 60000 / tempo milliseconds, kept to nanosecond precision.
    pub fn beat_period(&self) -> Duration {
        beat_period(self.tempo_bpm)
    }

    pub fn chord_period(&self) -> Duration {
        self.beat_period() * self.beats_per_chord
    }

    /// How long each chord stays on screen, in seconds.
    pub fn chord_duration_secs(&self) -> f64 {
        self.chord_period().as_secs_f64()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let mut pool = ChordPool::new();
        for chord in DEFAULT_CHORDS {
            pool.toggle(chord);
        }
        SessionConfig {
            tempo_bpm: DEFAULT_TEMPO_BPM,
            beats_per_chord: DEFAULT_BEATS_PER_CHORD,
            pool,
        }
    }
}

pub fn beat_period(tempo_bpm: u32) -> Duration {
    Duration::from_nanos(NANOS_PER_MINUTE / u64::from(tempo_bpm.max(1)))
}

pub(crate) fn validate_tempo(tempo_bpm: u32) -> Result<(), ConfigIssue> {
    if (MIN_TEMPO_BPM..=MAX_TEMPO_BPM).contains(&tempo_bpm) {
        Ok(())
    } else {
        Err(ConfigIssue::TempoOutOfRange(tempo_bpm))
    }
}

pub(crate) fn validate_beats(beats_per_chord: u32) -> Result<(), ConfigIssue> {
    if (MIN_BEATS_PER_CHORD..=MAX_BEATS_PER_CHORD).contains(&beats_per_chord) {
        Ok(())
    } else {
        Err(ConfigIssue::BeatsOutOfRange(beats_per_chord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_for_every_valid_setting() {
        for tempo in MIN_TEMPO_BPM..=MAX_TEMPO_BPM {
            for beats in MIN_BEATS_PER_CHORD..=MAX_BEATS_PER_CHORD {
                let config = SessionConfig::new(tempo, beats, ChordPool::new()).unwrap();
                let expected_beat_ms = 60_000.0 / f64::from(tempo);
                let beat_ms = config.beat_period().as_secs_f64() * 1000.0;
                assert!((beat_ms - expected_beat_ms).abs() < 1e-6);
                assert_eq!(config.chord_period(), config.beat_period() * beats);
            }
        }
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert_eq!(
            SessionConfig::new(39, 4, ChordPool::new()),
            Err(SessionError::InvalidConfiguration(
                ConfigIssue::TempoOutOfRange(39)
            ))
        );
        assert_eq!(
            SessionConfig::new(201, 4, ChordPool::new()),
            Err(SessionError::InvalidConfiguration(
                ConfigIssue::TempoOutOfRange(201)
            ))
        );
        assert_eq!(
            SessionConfig::new(60, 0, ChordPool::new()),
            Err(SessionError::InvalidConfiguration(
                ConfigIssue::BeatsOutOfRange(0)
            ))
        );
        assert_eq!(
            SessionConfig::new(60, 17, ChordPool::new()),
            Err(SessionError::InvalidConfiguration(
                ConfigIssue::BeatsOutOfRange(17)
            ))
        );
    }

    #[test]
    fn test_default_is_sixty_bpm_four_beats() {
        let config = SessionConfig::default();
        assert_eq!(config.tempo_bpm(), 60);
        assert_eq!(config.beats_per_chord(), 4);
        assert_eq!(config.pool().to_vec(), vec!["C", "Am", "F", "G"]);
        assert_eq!(config.chord_period(), Duration::from_secs(4));
        assert_eq!(config.chord_duration_secs(), 4.0);
    }
}
