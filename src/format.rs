//! Display formatting shared by the terminal view and the summary output.

use crate::config::BEATS_PER_BAR;
use crate::session::beat_period;

/// Formats seconds as `M:SS`. Minutes are unbounded.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// How long each chord is shown, as seconds with one decimal place.
pub fn format_chord_duration(tempo_bpm: u32, beats_per_chord: u32) -> String {
    let secs = (beat_period(tempo_bpm) * beats_per_chord).as_secs_f64();
    format!("{:.1}", secs)
}

/// Four downbeat markers with the active one bracketed. Beat 0 leaves all
/// markers idle.
pub fn beat_markers(current_beat: u8) -> String {
    (1..=BEATS_PER_BAR)
        .map(|beat| {
            if beat == current_beat {
                format!("[↓{}]", beat)
            } else {
                format!(" ↓{} ", beat)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_pads_seconds() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(7), "0:07");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(600), "10:00");
        assert_eq!(format_elapsed(6001), "100:01");
    }

    #[test]
    fn test_format_chord_duration_one_decimal() {
        assert_eq!(format_chord_duration(60, 4), "4.0");
        assert_eq!(format_chord_duration(120, 1), "0.5");
        assert_eq!(format_chord_duration(70, 3), "2.6");
        assert_eq!(format_chord_duration(200, 16), "4.8");
        assert_eq!(format_chord_duration(40, 16), "24.0");
    }

    #[test]
    fn test_beat_markers_highlight_active_beat() {
        assert_eq!(beat_markers(2), " ↓1  [↓2]  ↓3   ↓4 ");
        assert!(!beat_markers(0).contains('['));
    }
}
