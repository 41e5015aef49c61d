//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys fall back to built-in defaults.

mod chat;
mod gemini;
mod paths;
mod playback;
mod repl;
mod speech;

pub use chat::FileChatConfig;
pub use gemini::FileGeminiConfig;
pub use paths::FilePathsConfig;
pub use playback::FilePlaybackConfig;
pub use repl::FileReplConfig;
pub use speech::FileSpeechConfig;

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a configuration problem is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A problem detected while validating a loaded configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted key of the offending field, e.g. `gemini.text_model`
    pub field: &'static str,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field,
            message: message.into(),
        }
    }

    fn error(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Template and audio directories
    pub paths: FilePathsConfig,
    /// Generative model settings
    pub gemini: FileGeminiConfig,
    /// Text-to-speech settings
    pub speech: FileSpeechConfig,
    /// Local audio playback
    pub playback: FilePlaybackConfig,
    /// Turn behaviour
    pub chat: FileChatConfig,
    /// Interactive prompt settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.gemini.text_model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "gemini.text_model",
                "model name cannot be empty",
            ));
        }
        if self.gemini.vision_model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "gemini.vision_model",
                "model name cannot be empty",
            ));
        }
        if self.chat.wrap_width == 0 {
            issues.push(ConfigIssue::warning(
                "chat.wrap_width",
                "0 disables wrapping of tutor replies",
            ));
        }
        if self.chat.timeout_seconds == Some(0) {
            issues.push(ConfigIssue::error(
                "chat.timeout_seconds",
                "timeout cannot be 0, remove the key to disable it",
            ));
        }
        if self.playback.enabled && self.playback.command.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                "playback.command",
                "playback is enabled but no command is set",
            ));
        }
        if self.speech.enabled && !(0.0..=1.0).contains(&self.speech.stability) {
            issues.push(ConfigIssue::warning(
                "speech.stability",
                format!("{} is outside 0.0..=1.0", self.speech.stability),
            ));
        }
        if self.speech.enabled && !(0.0..=1.0).contains(&self.speech.similarity_boost) {
            issues.push(ConfigIssue::warning(
                "speech.similarity_boost",
                format!("{} is outside 0.0..=1.0", self.speech.similarity_boost),
            ));
        }

        issues
    }

    /// True when any validation issue is an error
    pub fn has_errors(&self) -> bool {
        self.validate()
            .iter()
            .any(|issue| issue.severity == Severity::Error)
    }
}
