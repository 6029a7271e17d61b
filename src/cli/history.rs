//! # History File Management
//!
//! Resolves where the shell's readline history lives. Defaults to
//! `~/.dbmite_history`; the `DBMITE_HISTORY` environment variable overrides
//! the location, and setting it to an empty string disables persistence.

use std::env;
use std::path::PathBuf;

const DEFAULT_HISTORY_FILE: &str = ".dbmite_history";
const HISTORY_ENV_VAR: &str = "DBMITE_HISTORY";

pub fn history_path() -> Option<PathBuf> {
    if let Ok(custom_path) = env::var(HISTORY_ENV_VAR) {
        if custom_path.is_empty() {
            return None;
        }
        return Some(PathBuf::from(custom_path));
    }

    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(DEFAULT_HISTORY_FILE))
}
