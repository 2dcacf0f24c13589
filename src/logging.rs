use simplelog::*;
use std::fs::{self, OpenOptions};
use std::io::{Error, ErrorKind};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static INIT: Once = Once::new();
static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Directory the log file lives in: `$HOME/.local/share/ukepractice/logs`.
pub fn log_dir() -> Result<PathBuf, Error> {
    let home = std::env::var("HOME")
        .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not set"))?;

    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("ukepractice")
        .join("logs"))
}

/// Appends log records to `app.log`. The terminal belongs to the practice
/// view, so nothing is logged to stdout or stderr. Only the first call
/// installs a logger.
pub fn init_logger(level: LevelFilter) -> Result<(), Error> {
    let log_dir = log_dir()?;
    fs::create_dir_all(&log_dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("app.log"))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_time_format_rfc3339()
        .build();

    INIT.call_once(|| {
        if CombinedLogger::init(vec![WriteLogger::new(level, config, log_file)]).is_ok() {
            LOGGER_INITIALIZED.store(true, Ordering::SeqCst);
        }
    });

    if LOGGER_INITIALIZED.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::Other, "Logger initialization failed"))
    }
}
