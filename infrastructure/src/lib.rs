//! Infrastructure layer for lingua-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod analysis;
pub mod config;
pub mod gemini;
pub mod logging;
pub mod playback;
pub mod speech;
pub mod templates;

// Re-export commonly used types
pub use analysis::StemmingAnalyzer;
pub use config::{
    ConfigIssue, ConfigLoader, Credentials, FileChatConfig, FileConfig, FileGeminiConfig,
    FilePathsConfig, FilePlaybackConfig, FileReplConfig, FileSpeechConfig, Severity,
};
pub use gemini::{GeminiGateway, GeminiSettings};
pub use logging::JsonlConversationLogger;
pub use playback::CommandAudioPlayer;
pub use speech::{ElevenLabsSettings, ElevenLabsSynthesizer, VoiceSettings};
pub use templates::FileTemplateStore;
