//! Tracing initialization.
//!
//! The terminal belongs to the UI, so log output goes to a file
//! (`~/.local/share/fortune-tv/fortune-tv.log` on Linux). Logging is
//! optional: if the file cannot be opened, nothing is installed.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber writing to `path`, filtered by `level`.
///
/// Returns false if logging could not be set up. Only the first successful
/// call in a process takes effect.
pub fn init_tracing(path: &Path, level: &str) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok()
}
