use std::path::PathBuf;
use std::time::Duration;

use crate::persistence::default_store_path;

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Quiet period after the last resize notification before it counts as settled
    pub debounce: Duration,
    /// Save after every settled resize, not only on shutdown
    pub autosave: bool,
    pub store_path: PathBuf,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce = Duration::from_millis(ms);
        self
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.store_path = path;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            autosave: false,
            store_path: default_store_path(),
        }
    }
}
