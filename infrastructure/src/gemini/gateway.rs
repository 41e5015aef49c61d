//! Gemini LLM Gateway implementation

use super::client::{GeminiClient, GeminiSettings};
use super::protocol::{Content, Part};
use async_trait::async_trait;
use lingua_application::ports::llm_gateway::{ChatSession, GatewayError, LlmGateway};
use lingua_domain::{ImageAttachment, PromptContext};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// LLM Gateway implementation for the Gemini REST API
pub struct GeminiGateway {
    client: Arc<GeminiClient>,
}

impl GeminiGateway {
    pub fn new(settings: GeminiSettings) -> Self {
        info!(
            "GeminiGateway initialized (text: {}, vision: {})",
            settings.text_model, settings.vision_model
        );
        Self {
            client: Arc::new(GeminiClient::new(settings)),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.client.settings().api_key.is_some()
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn start_chat(&self) -> Result<Box<dyn ChatSession>, GatewayError> {
        Ok(Box::new(GeminiChatSession::new(Arc::clone(&self.client))))
    }

    async fn describe_images(
        &self,
        prompt: &PromptContext,
        images: &[ImageAttachment],
    ) -> Result<String, GatewayError> {
        let mut parts = vec![Part::text(prompt.as_str())];
        parts.extend(images.iter().map(Part::image));
        let model = self.client.settings().vision_model.clone();
        self.client.generate(&model, &[Content::user(parts)]).await
    }
}

/// Multi-turn text chat that keeps its own history
pub struct GeminiChatSession {
    client: Arc<GeminiClient>,
    history: Mutex<Vec<Content>>,
}

impl GeminiChatSession {
    fn new(client: Arc<GeminiClient>) -> Self {
        Self {
            client,
            history: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatSession for GeminiChatSession {
    async fn send(&self, prompt: &PromptContext) -> Result<String, GatewayError> {
        let mut history = self.history.lock().await;
        let user = Content::user(vec![Part::text(prompt.as_str())]);

        let mut contents = history.clone();
        contents.push(user.clone());

        let model = &self.client.settings().text_model;
        let reply = self.client.generate(model, &contents).await?;

        // Failed exchanges are not recorded
        history.push(user);
        history.push(Content::model(reply.clone()));
        Ok(reply)
    }
}
