//! Playback through an external command-line player

use async_trait::async_trait;
use lingua_application::ports::audio_player::{AudioPlayer, PlaybackError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Spawns a player binary (default `mpg123 -q`) with the file as last argument.
///
/// `play` returns as soon as the process has started; its exit status is
/// logged from a background task.
#[derive(Debug, Clone)]
pub struct CommandAudioPlayer {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandAudioPlayer {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Look the command up on `PATH`.
    pub fn detect(command: &str, args: Vec<String>) -> Result<Self, PlaybackError> {
        let program = which::which(command)
            .map_err(|e| PlaybackError::Unavailable(format!("{}: {}", command, e)))?;
        debug!("Using audio player {}", program.display());
        Ok(Self::new(program, args))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl AudioPlayer for CommandAudioPlayer {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        let start_failed = |reason: String| PlaybackError::StartFailed {
            path: path.display().to_string(),
            reason,
        };

        if !path.is_file() {
            return Err(start_failed("file not found".to_string()));
        }

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| start_failed(e.to_string()))?;

        let file = path.display().to_string();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => debug!("Playback finished: {}", file),
                Ok(status) => warn!("Player exited with {} for {}", status, file),
                Err(e) => warn!("Could not wait for player: {}", e),
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_unknown_command() {
        let err = CommandAudioPlayer::detect("definitely-not-a-player-3f9a", vec![]).unwrap_err();
        assert!(matches!(err, PlaybackError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_missing_file_fails_to_start() {
        let player = CommandAudioPlayer::new("mpg123", vec!["-q".to_string()]);
        let err = player
            .play(Path::new("/nonexistent/reply.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::StartFailed { .. }));
    }

    #[tokio::test]
    async fn test_missing_binary_fails_to_start() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("reply.mp3");
        std::fs::write(&file, b"ID3").unwrap();

        let player = CommandAudioPlayer::new(dir.path().join("no-such-player"), vec![]);
        let err = player.play(&file).await.unwrap_err();
        assert!(matches!(err, PlaybackError::StartFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_play_returns_once_started() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("reply.mp3");
        std::fs::write(&file, b"ID3").unwrap();

        let player = CommandAudioPlayer::detect("true", vec![]).unwrap();
        player.play(&file).await.unwrap();
    }
}
