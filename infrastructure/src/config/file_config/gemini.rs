//! Generative model configuration from TOML (`[gemini]` section)

use serde::{Deserialize, Serialize};

/// Raw Gemini configuration from TOML
///
/// The API key is normally taken from the environment variable named by
/// `api_key_env`; an inline `api_key` wins when both are present.
///
/// ```toml
/// [gemini]
/// api_key_env = "GOOGLE_API_KEY"
/// text_model = "gemini-pro"
/// vision_model = "gemini-pro-vision"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
    /// Model used for text turns
    pub text_model: String,
    /// Model used for image turns
    pub vision_model: String,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            text_model: "gemini-pro".to_string(),
            vision_model: "gemini-pro-vision".to_string(),
        }
    }
}

impl FileGeminiConfig {
    /// Resolve the API key, consulting `lookup` for the environment variable.
    pub fn resolve_api_key(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        non_blank(self.api_key.clone()).or_else(|| non_blank(lookup(&self.api_key_env)))
    }
}

pub(super) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
