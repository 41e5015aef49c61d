//! Playback configuration from TOML (`[playback]` section)

use serde::{Deserialize, Serialize};

/// Raw playback configuration from TOML
///
/// The audio file path is appended after `args`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePlaybackConfig {
    pub enabled: bool,
    /// Player binary, looked up on `PATH`
    pub command: String,
    pub args: Vec<String>,
}

impl Default for FilePlaybackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "mpg123".to_string(),
            args: vec!["-q".to_string()],
        }
    }
}
