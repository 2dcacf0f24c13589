use crate::chords::{ChordPool, CATALOG};
use crate::config::{MAX_BEATS_PER_CHORD, MAX_TEMPO_BPM, MIN_BEATS_PER_CHORD, MIN_TEMPO_BPM};
use crate::error::AppError;
use crate::format::format_chord_duration;
use crate::session::SessionConfig;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect};
use log::info;

fn range_check(value: u32, min: u32, max: u32) -> Result<(), String> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(format!("Enter a number from {} to {}", min, max))
    }
}

/// Which catalog entries start out checked in the chord prompt.
pub fn catalog_defaults(pool: &ChordPool) -> Vec<bool> {
    CATALOG.iter().map(|chord| pool.contains(chord)).collect()
}

/// Prompts for tempo, beats per chord and the chord pool, starting from the
/// given configuration.
pub fn interactive(current: &SessionConfig) -> Result<SessionConfig, AppError> {
    let theme = ColorfulTheme::default();

    let tempo: u32 = Input::with_theme(&theme)
        .with_prompt(format!("Tempo in BPM ({}-{})", MIN_TEMPO_BPM, MAX_TEMPO_BPM))
        .default(current.tempo_bpm())
        .validate_with(|v: &u32| range_check(*v, MIN_TEMPO_BPM, MAX_TEMPO_BPM))
        .interact_text()?;

    let beats: u32 = Input::with_theme(&theme)
        .with_prompt(format!(
            "Beats per chord ({}-{})",
            MIN_BEATS_PER_CHORD, MAX_BEATS_PER_CHORD
        ))
        .default(current.beats_per_chord())
        .validate_with(|v: &u32| range_check(*v, MIN_BEATS_PER_CHORD, MAX_BEATS_PER_CHORD))
        .interact_text()?;

    println!(
        "Each chord will show for {} seconds",
        format_chord_duration(tempo, beats)
    );

    let selected = MultiSelect::with_theme(&theme)
        .with_prompt("Select chords to practice (space to toggle, enter to confirm)")
        .items(&CATALOG)
        .defaults(&catalog_defaults(current.pool()))
        .interact()?;

    let names: Vec<&str> = selected.iter().map(|&i| CATALOG[i]).collect();
    let pool = ChordPool::from_names(names.as_slice())?;
    let config = SessionConfig::new(tempo, beats, pool)?;
    info!(
        "Interactive setup chose {} BPM, {} beats per chord, pool {:?}",
        tempo,
        beats,
        config.pool().to_vec()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_defaults_follow_pool() {
        let pool = ChordPool::from_names(&["Am", "G7"]).unwrap();
        let defaults = catalog_defaults(&pool);
        assert_eq!(defaults.len(), CATALOG.len());
        assert_eq!(defaults.iter().filter(|d| **d).count(), 2);
        assert!(defaults[1]);
        assert!(defaults[9]);
    }

    #[test]
    fn test_range_check_bounds() {
        assert!(range_check(40, 40, 200).is_ok());
        assert!(range_check(200, 40, 200).is_ok());
        assert!(range_check(39, 40, 200).is_err());
        assert!(range_check(201, 40, 200).is_err());
    }
}
