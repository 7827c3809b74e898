//! Color-suppression environment guard
//!
//! ffmpeg colors its log output unless `AV_LOG_FORCE_NOCOLOR` is set, and
//! escape codes would break the line patterns. The variable is process-wide
//! state, so it is forced once before any child spawns and restored (or
//! removed, if it was absent) only after the whole batch has finished.
//! Restoring per-task would race against still-running siblings.

use std::env;
use std::ffi::OsString;

/// Environment variable that disables color escapes in ffmpeg logs
pub const NO_COLOR_VAR: &str = "AV_LOG_FORCE_NOCOLOR";

/// RAII guard: engage forces the variable on, drop restores the prior state
#[derive(Debug)]
pub struct NoColorGuard {
    previous: Option<OsString>,
}

impl NoColorGuard {
    pub fn engage() -> Self {
        let previous = env::var_os(NO_COLOR_VAR);
        env::set_var(NO_COLOR_VAR, "1");
        Self { previous }
    }
}

impl Drop for NoColorGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => env::set_var(NO_COLOR_VAR, value),
            None => env::remove_var(NO_COLOR_VAR),
        }
    }
}
