//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod audio_player;
pub mod chat_events;
pub mod clock;
pub mod conversation_logger;
pub mod llm_gateway;
pub mod speech;
pub mod template_store;
pub mod text_analyzer;
pub mod turn_progress;
