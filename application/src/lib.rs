//! Application layer for lingua-chat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::TurnConfig;
pub use ports::{
    audio_player::{AudioPlayer, NoAudioPlayer, PlaybackError},
    chat_events::{ChannelEventSink, ChatEvent, ChatEventBus, ChatEventSink},
    clock::{Clock, SystemClock},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{ChatSession, GatewayError, LlmGateway},
    speech::{SpeechError, SpeechSynthesizer},
    template_store::{TemplateError, TemplateKind, TemplateStore},
    text_analyzer::TextAnalyzer,
    turn_progress::{NoTurnProgress, TurnProgressNotifier, TurnStage},
};
pub use use_cases::build_context::{ContextError, build_context};
pub use use_cases::run_turn::{ChatSessionController, ErrorKind, TurnError, TurnOutcome};
