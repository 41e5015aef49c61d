//! Turn configuration from TOML (`[chat]` section)

use lingua_domain::DEFAULT_WRAP_WIDTH;
use serde::{Deserialize, Serialize};

/// Raw chat configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Maximum characters per displayed reply line
    pub wrap_width: usize,
    /// Show the word analysis table after each reply
    pub analysis: bool,
    /// Abort a model request after this many seconds
    pub timeout_seconds: Option<u64>,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            analysis: true,
            timeout_seconds: None,
        }
    }
}
