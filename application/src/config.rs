//! Application-level configuration.
//!
//! Controls how a chat turn behaves: reply width, where speech is written,
//! and an optional limit on how long the model may take.

use lingua_domain::{AUDIO_DIR, DEFAULT_WRAP_WIDTH};
use std::path::PathBuf;
use std::time::Duration;

/// Turn behavior configuration.
#[derive(Debug, Clone)]
pub struct TurnConfig {
    /// Display width of reply lines, in characters.
    pub wrap_width: usize,
    /// Directory for synthesized speech.
    pub audio_dir: PathBuf,
    /// Maximum time to wait for the model. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            audio_dir: PathBuf::from(AUDIO_DIR),
            timeout: None,
        }
    }
}

impl TurnConfig {
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    pub fn with_audio_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.audio_dir = dir.into();
        self
    }

    /// Set the model timeout from optional seconds.
    pub fn with_timeout_seconds(mut self, seconds: Option<u64>) -> Self {
        self.timeout = seconds.map(Duration::from_secs);
        self
    }
}
