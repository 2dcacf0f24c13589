use crate::config::BEATS_PER_BAR;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

pub fn create_beat_progress(multi_progress: &MultiProgress) -> ProgressBar {
    let pb = multi_progress.add(ProgressBar::new(u64::from(BEATS_PER_BAR)));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:.bold} [{bar:16.yellow}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("██ "),
    );
    pb.set_prefix("Beat ");
    pb
}

pub fn create_chord_line(multi_progress: &MultiProgress) -> ProgressBar {
    let pb = multi_progress.add(ProgressBar::new_spinner());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{prefix:.bold} {msg:.bold.yellow}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_prefix("Chord");
    pb
}

pub fn create_clock_line(multi_progress: &MultiProgress) -> ProgressBar {
    let pb = multi_progress.add(ProgressBar::new_spinner());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.dim} {spinner} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_prefix("Time ");
    pb
}
