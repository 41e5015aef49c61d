//! Gemini adapter
//!
//! Implements the [`LlmGateway`](lingua_application::LlmGateway) port over the
//! Generative Language REST API. Text turns share one multi-turn chat whose
//! history lives in [`GeminiChatSession`]; image turns are one-shot requests
//! against the vision model.

mod client;
mod gateway;
mod protocol;

pub use client::GeminiSettings;
pub use gateway::{GeminiChatSession, GeminiGateway};
