//! File-backed `env_logger` setup.
//!
//! The terminal is in raw/alternate-screen mode while the player runs, so
//! log records go to a file instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

use crate::config::{LogSettings, default_state_dir};

/// Environment variable that overrides `log.level`.
const LOG_ENV: &str = "CANTO_LOG";

/// Where records go: `log.file`, else `<state dir>/canto.log`.
pub fn log_path(settings: &LogSettings) -> Option<PathBuf> {
    settings
        .file
        .clone()
        .or_else(|| default_state_dir().map(|d| d.join("canto.log")))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger. Returns the file in use, or `None` when
/// logging had to be disabled.
pub fn init(settings: &LogSettings) -> Option<PathBuf> {
    let Some(path) = log_path(settings) else {
        eprintln!("canto: no HOME or XDG_STATE_HOME; logging disabled");
        return None;
    };

    let file = match open_log_file(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("canto: cannot open {}: {e}; logging disabled", path.display());
            return None;
        }
    };

    let result = Builder::from_env(Env::default().filter_or(LOG_ENV, &settings.level))
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init();

    match result {
        Ok(()) => Some(path),
        Err(e) => {
            eprintln!("canto: logger already initialized: {e}");
            None
        }
    }
}
