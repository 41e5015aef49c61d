//! Configuration file loading for lingua-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LINGUA_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./lingua.toml` or `./.lingua.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/lingua-chat/config.toml`
//! 5. Default values

mod credentials;
mod file_config;
mod loader;

pub use credentials::Credentials;
pub use file_config::{
    ConfigIssue, FileChatConfig, FileConfig, FileGeminiConfig, FilePathsConfig,
    FilePlaybackConfig, FileReplConfig, FileSpeechConfig, Severity,
};
pub use loader::ConfigLoader;
