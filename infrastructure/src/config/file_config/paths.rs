//! Path configuration from TOML (`[paths]` section)

use serde::{Deserialize, Serialize};

/// Raw path configuration from TOML
///
/// Relative paths are resolved against the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePathsConfig {
    /// Directory holding `A1.txt` .. `C2.txt`
    pub levels_dir: String,
    /// Directory holding `pro.txt` and `pro_vision.txt`
    pub roles_dir: String,
    /// Directory synthesized replies are written to
    pub audio_dir: String,
}

impl Default for FilePathsConfig {
    fn default() -> Self {
        Self {
            levels_dir: "levels".to_string(),
            roles_dir: "rol-model".to_string(),
            audio_dir: lingua_domain::AUDIO_DIR.to_string(),
        }
    }
}
