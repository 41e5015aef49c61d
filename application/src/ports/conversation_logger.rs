//! Port for the conversation transcript.
//!
//! Defines the [`ConversationLogger`] trait for recording what was said in a
//! session (prompts, replies, audio files, failures).
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while the transcript is a
//! machine-readable record of the conversation itself.

use lingua_domain::RoleCode;
use serde::Serialize;
use std::path::Path;

/// One transcript record. Serializes with a `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// The composed prompt sent to the model
    Prompt {
        role: RoleCode,
        user: String,
        text: String,
    },
    /// The tutor's reply, with the speech file if one was written
    Reply {
        text: String,
        chars: usize,
        audio: Option<String>,
    },
    /// A turn that ended in an error
    TurnFailed { kind: String, message: String },
}

impl ConversationEvent {
    pub fn prompt(role: RoleCode, user_name: &str, prompt: &str) -> Self {
        Self::Prompt {
            role,
            user: user_name.to_string(),
            text: prompt.to_string(),
        }
    }

    pub fn reply(text: &str, audio_path: Option<&Path>) -> Self {
        Self::Reply {
            text: text.to_string(),
            chars: text.chars().count(),
            audio: audio_path.map(|p| p.display().to_string()),
        }
    }

    pub fn failure(kind: &str, message: &str) -> Self {
        Self::TurnFailed {
            kind: kind.to_string(),
            message: message.to_string(),
        }
    }

    /// Value of the `type` tag
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Prompt { .. } => "prompt",
            Self::Reply { .. } => "reply",
            Self::TurnFailed { .. } => "turn_failed",
        }
    }
}

/// Port for writing conversation events to a transcript.
///
/// `log` is synchronous and non-fallible; write failures are ignored.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when the transcript is off.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
