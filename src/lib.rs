pub mod chords;
pub mod cli;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod format;
pub mod input;
pub mod logging;
pub mod session;
pub mod setup;
pub mod ui;

pub use chords::{ChordPicker, ChordPool, RandomPicker, ScriptedPicker, CATALOG};
pub use cli::{list_catalog, validate_chords, Args};
pub use error::{AppError, ConfigIssue, SessionError};
pub use event_loop::{Command, EngineMessage, EventLoop, PracticeSummary};
pub use session::{PracticeSession, RunState, SessionConfig, SessionSnapshot, TickEvent, Ticker};

/// Builds a session from validated settings, seeding the picker when a seed
/// is configured.
pub fn create_session(
    config: SessionConfig,
    seed: Option<u64>,
    live_tempo: bool,
) -> PracticeSession<RandomPicker> {
    let picker = match seed {
        Some(seed) => {
            log::info!("Using seeded chord picker: {}", seed);
            RandomPicker::seeded(seed)
        }
        None => RandomPicker::new(),
    };
    PracticeSession::new(config, picker).allow_live_tempo(live_tempo)
}
