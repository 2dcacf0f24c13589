use thiserror::Error;

/// Reasons a configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("tempo {0} BPM is outside {min}..={max}", min = crate::config::MIN_TEMPO_BPM, max = crate::config::MAX_TEMPO_BPM)]
    TempoOutOfRange(u32),
    #[error("{0} beats per chord is outside {min}..={max}", min = crate::config::MIN_BEATS_PER_CHORD, max = crate::config::MAX_BEATS_PER_CHORD)]
    BeatsOutOfRange(u32),
    #[error("'{0}' is not in the chord catalog")]
    UnknownChord(String),
    #[error("'{0}' appears more than once in the chord pool")]
    DuplicateChord(String),
}

/// Errors raised by practice session operations. A failed operation leaves
/// the session exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please select at least one chord!")]
    InvalidStart,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
    #[error("tempo and beats per chord can only change while stopped")]
    LockedWhileRunning,
    #[error("the chord pool cannot be emptied while a session is running")]
    DegeneratePoolDuringRun,
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Top-level failures surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("settings error: {0}")]
    Settings(#[from] config::ConfigError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("setup prompt failed: {0}")]
    Setup(#[from] dialoguer::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Cli(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_issue_converts_into_session_error() {
        let err: SessionError = ConfigIssue::TempoOutOfRange(250).into();
        assert_eq!(
            err,
            SessionError::InvalidConfiguration(ConfigIssue::TempoOutOfRange(250))
        );
        assert_eq!(
            err.to_string(),
            "invalid configuration: tempo 250 BPM is outside 40..=200"
        );
    }

    #[test]
    fn test_invalid_start_message_is_user_facing() {
        assert_eq!(
            SessionError::InvalidStart.to_string(),
            "Please select at least one chord!"
        );
    }
}
