//! Domain layer for lingua-chat
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Templates
//!
//! Every prompt is built from two static fragments: a **level template**
//! (A1–C2, chosen at join) and a **role template** (`pro` for text chat,
//! `pro_vision` for image chat).
//!
//! ## Turn
//!
//! One cycle of learner input → tutor reply → speech → display. The pure
//! parts of a turn (prompt composition, reply wrapping, punctuation
//! stripping, audio file naming) live here.

pub mod analysis;
pub mod audio;
pub mod chat;
pub mod core;
pub mod format;
pub mod prompt;
pub mod session;
pub mod template;

// Re-export commonly used types
pub use analysis::{AnalysisReport, WordAnalysis};
pub use audio::{AUDIO_DIR, audio_path_in, next_audio_path};
pub use chat::{
    input::{ImageAttachment, TurnInput, upload_manifest},
    message::{ChatMessage, MessageKind, TUTOR_SENDER},
};
pub use core::error::DomainError;
pub use format::{DEFAULT_WRAP_WIDTH, preview, strip_for_analysis, wrap_for_display};
pub use prompt::PromptContext;
pub use session::profile::{SessionProfile, SessionState};
pub use template::{LevelCode, RoleCode};
