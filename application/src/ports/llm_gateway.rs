//! LLM Gateway port
//!
//! Defines the interface for talking to the generative model.

use async_trait::async_trait;
use lingua_domain::{ImageAttachment, PromptContext};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing credentials: {0} is not set")]
    MissingCredentials(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Reply blocked: {0}")]
    Blocked(String),

    #[error("No text in model reply")]
    EmptyResponse,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway to the tutor model
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Start a text conversation that remembers earlier turns
    async fn start_chat(&self) -> Result<Box<dyn ChatSession>, GatewayError>;

    /// One-shot request carrying the prompt and the shared images
    async fn describe_images(
        &self,
        prompt: &PromptContext,
        images: &[ImageAttachment],
    ) -> Result<String, GatewayError>;
}

/// A text conversation with history
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Send a prompt and get the reply text
    async fn send(&self, prompt: &PromptContext) -> Result<String, GatewayError>;
}
