//! Speech synthesis port

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors raised by a speech synthesizer
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Missing credentials: {0} is not set")]
    MissingCredentials(String),

    #[error("Failed to convert text to speech. Error message: {message} (HTTP {status})")]
    Rejected { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Could not write audio to {path}: {reason}")]
    Io { path: String, reason: String },
}

/// Converts text to an audio file
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Write the spoken `text` to `output`, creating parent directories.
    async fn synthesize(&self, text: &str, output: &Path) -> Result<(), SpeechError>;
}
