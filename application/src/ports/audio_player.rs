//! Audio playback port

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("No audio player available: {0}")]
    Unavailable(String),

    #[error("Failed to start playback of {path}: {reason}")]
    StartFailed { path: String, reason: String },
}

/// Plays an audio file
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Start playback.
    ///
    /// Returns once the player has accepted the file; it does not wait for
    /// playback to finish.
    async fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}

/// Player that never plays anything (speech files are still written)
pub struct NoAudioPlayer;

#[async_trait]
impl AudioPlayer for NoAudioPlayer {
    async fn play(&self, _path: &Path) -> Result<(), PlaybackError> {
        Ok(())
    }
}
