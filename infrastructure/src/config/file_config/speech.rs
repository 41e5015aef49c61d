//! Text-to-speech configuration from TOML (`[speech]` section)

use super::gemini::non_blank;
use serde::{Deserialize, Serialize};

/// Raw ElevenLabs configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSpeechConfig {
    /// Synthesize and play every tutor reply
    pub enabled: bool,
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub voice_id_env: String,
    pub voice_id: Option<String>,
    pub base_url: String,
    pub model_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for FileSpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "XI_API_KEY".to_string(),
            api_key: None,
            voice_id_env: "VOICE_ID".to_string(),
            voice_id: None,
            base_url: "https://api.elevenlabs.io".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            stability: 0.5,
            similarity_boost: 0.8,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

impl FileSpeechConfig {
    pub fn resolve_api_key(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        non_blank(self.api_key.clone()).or_else(|| non_blank(lookup(&self.api_key_env)))
    }

    pub fn resolve_voice_id(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        non_blank(self.voice_id.clone()).or_else(|| non_blank(lookup(&self.voice_id_env)))
    }
}
