// config.rs

use crate::chords::ChordPool;
use crate::cli::Args;
use crate::session::SessionConfig;
use crate::error::SessionError;
use config::{Environment, File};
use log::LevelFilter;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const MIN_TEMPO_BPM: u32 = 40;
pub const MAX_TEMPO_BPM: u32 = 200;
pub const DEFAULT_TEMPO_BPM: u32 = 60;

pub const MIN_BEATS_PER_CHORD: u32 = 1;
pub const MAX_BEATS_PER_CHORD: u32 = 16;
pub const DEFAULT_BEATS_PER_CHORD: u32 = 4;

pub const DEFAULT_CHORDS: [&str; 4] = ["C", "Am", "F", "G"];

pub const BEATS_PER_BAR: u8 = 4;
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

const ENV_PREFIX: &str = "UKEPRACTICE";
const LOCAL_CONFIG_NAME: &str = "ukepractice";

/// Startup settings, layered from defaults, an optional config file, the
/// environment and finally the command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tempo_bpm: u32,
    pub beats_per_chord: u32,
    pub chords: Vec<String>,
    pub seed: Option<u64>,
    pub live_tempo: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tempo_bpm: DEFAULT_TEMPO_BPM,
            beats_per_chord: DEFAULT_BEATS_PER_CHORD,
            chords: DEFAULT_CHORDS.iter().map(|c| c.to_string()).collect(),
            seed: None,
            live_tempo: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Reads the file at `path` when given (it must exist), otherwise an
    /// optional `ukepractice.*` file in the working directory, then the
    /// `UKEPRACTICE_*` environment. `UKEPRACTICE_CHORDS` is comma-separated.
    ///
    /// Runs before the logger exists, so nothing is logged here.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    fn load_with_env_prefix(
        path: Option<&Path>,
        env_prefix: &str,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(LOCAL_CONFIG_NAME).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(env_prefix)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("chords"),
            )
            .build()?
            .try_deserialize()
    }

    /// Command line flags win over every other layer.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(tempo) = args.tempo {
            self.tempo_bpm = tempo;
        }
        if let Some(beats) = args.beats {
            self.beats_per_chord = beats;
        }
        if let Some(chords) = &args.chords {
            self.chords = chords.clone();
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if args.live_tempo {
            self.live_tempo = true;
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn session_config(&self) -> Result<SessionConfig, SessionError> {
        let pool = ChordPool::from_names(&self.chords)?;
        SessionConfig::new(self.tempo_bpm, self.beats_per_chord, pool)
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults_match_reference_session() {
        let settings = Settings::default();
        assert_eq!(settings.tempo_bpm, 60);
        assert_eq!(settings.beats_per_chord, 4);
        assert_eq!(settings.chords, vec!["C", "Am", "F", "G"]);
        assert!(!settings.live_tempo);
    }

    #[test]
    fn test_load_reads_partial_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "tempo_bpm = 90\nchords = [\"D\", \"G7\"]").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.tempo_bpm, 90);
        assert_eq!(settings.beats_per_chord, DEFAULT_BEATS_PER_CHORD);
        assert_eq!(settings.chords, vec!["D", "G7"]);
    }

    #[test]
    fn test_environment_sets_chord_list_and_scalars() {
        let prefix = "UKEPRACTICE_ENV_LAYER_TEST";
        std::env::set_var(format!("{}_CHORDS", prefix), "D,G7");
        std::env::set_var(format!("{}_TEMPO_BPM", prefix), "100");

        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "beats_per_chord = 2").unwrap();

        let settings = Settings::load_with_env_prefix(Some(file.path()), prefix);
        std::env::remove_var(format!("{}_CHORDS", prefix));
        std::env::remove_var(format!("{}_TEMPO_BPM", prefix));

        let settings = settings.unwrap();
        assert_eq!(settings.chords, vec!["D", "G7"]);
        assert_eq!(settings.tempo_bpm, 100);
        assert_eq!(settings.beats_per_chord, 2);
        assert!(settings.session_config().is_ok());
    }

    #[test]
    fn test_load_fails_for_missing_explicit_file() {
        let missing = Path::new("/nonexistent/ukepractice-settings.toml");
        assert!(Settings::load(Some(missing)).is_err());
    }

    #[test]
    fn test_command_line_overrides_settings() {
        let args = Args::parse_from([
            "ukepractice",
            "--tempo",
            "120",
            "--chords",
            "Em,A",
            "--live-tempo",
        ]);
        let mut settings = Settings::default();
        settings.apply_args(&args);

        assert_eq!(settings.tempo_bpm, 120);
        assert_eq!(settings.beats_per_chord, 4);
        assert_eq!(settings.chords, vec!["Em", "A"]);
        assert!(settings.live_tempo);
    }

    #[test]
    fn test_session_config_rejects_out_of_range_tempo() {
        let settings = Settings {
            tempo_bpm: 300,
            ..Settings::default()
        };
        assert!(settings.session_config().is_err());
    }

    #[test]
    fn test_level_filter_falls_back_to_info() {
        let settings = Settings {
            log_level: "chatty".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.level_filter(), LevelFilter::Info);

        let settings = Settings {
            log_level: "trace".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.level_filter(), LevelFilter::Trace);
    }
}
