//! HTTP client for the Generative Language API

use super::protocol::{
    ApiErrorBody, Content, GenerateContentRequest, GenerateContentResponse, ReplyText,
};
use crate::config::FileGeminiConfig;
use lingua_application::ports::llm_gateway::GatewayError;
use reqwest::Client;
use tracing::{debug, warn};

/// Connection settings for the Gemini REST API
#[derive(Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Variable the key is expected in, reported when it is missing
    pub api_key_env: String,
    pub text_model: String,
    pub vision_model: String,
}

impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("text_model", &self.text_model)
            .field("vision_model", &self.vision_model)
            .finish()
    }
}

impl GeminiSettings {
    pub fn from_config(config: &FileGeminiConfig, api_key: Option<String>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            text_model: config.text_model.clone(),
            vision_model: config.vision_model.clone(),
        }
    }
}

pub struct GeminiClient {
    http: Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Self {
        Self {
            http: Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Send one `generateContent` request and return the reply text.
    pub async fn generate(&self, model: &str, contents: &[Content]) -> Result<String, GatewayError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::MissingCredentials(self.settings.api_key_env.clone()))?;

        debug!("Gemini request: model={}, contents={}", model, contents.len());

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest { contents })
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| format!("{} ({})", b.error.message, b.error.status))
                .unwrap_or(body);
            warn!("Gemini API error {}: {}", status, message);
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                message
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Other(format!("Invalid response body: {}", e)))?;

        match parsed.reply_text() {
            ReplyText::Text(text) => {
                debug!("Gemini reply: {} chars", text.chars().count());
                Ok(text)
            }
            ReplyText::Blocked(reason) => Err(GatewayError::Blocked(reason)),
            ReplyText::Empty => Err(GatewayError::EmptyResponse),
        }
    }
}
