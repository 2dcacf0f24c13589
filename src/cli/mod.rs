use crate::chords::{self, CATALOG};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// List the chords that can be practiced
    #[arg(long)]
    pub list_chords: bool,

    /// Read settings from this file (TOML, YAML or JSON)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Tempo in beats per minute (40-200)
    #[arg(short = 'b', long, value_name = "BPM")]
    pub tempo: Option<u32>,

    /// Beats each chord stays on screen (1-16)
    #[arg(long, value_name = "N")]
    pub beats: Option<u32>,

    /// Comma-separated chords to practice, e.g. C,Am,F,G
    #[arg(long, value_delimiter = ',', value_name = "CHORDS")]
    pub chords: Option<Vec<String>>,

    /// Seed for reproducible chord sequences
    #[arg(long)]
    pub seed: Option<u64>,

    /// Allow tempo and beats changes while practicing
    #[arg(long)]
    pub live_tempo: bool,

    /// Prompt for tempo, beats and chords before starting
    #[arg(short, long)]
    pub interactive: bool,

    /// Start practicing immediately
    #[arg(long)]
    pub autostart: bool,

    /// Stop after this many seconds
    #[arg(long, value_name = "SECS")]
    pub duration: Option<u64>,

    /// Log level written to the log file (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

pub fn list_catalog() -> Vec<String> {
    CATALOG.iter().map(|c| c.to_string()).collect()
}

pub fn validate_chords(names: &[String]) -> Result<(), String> {
    let unknown: Vec<&String> = names
        .iter()
        .filter(|name| chords::lookup(name).is_none())
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }

    let mut error_msg = String::from("Error: unknown chords:");
    for name in unknown {
        error_msg.push_str(&format!(" '{}'", name));
    }
    error_msg.push_str("\nAvailable chords:\n");
    for chord in CATALOG {
        error_msg.push_str(&format!("  - {}\n", chord));
    }
    Err(error_msg)
}
