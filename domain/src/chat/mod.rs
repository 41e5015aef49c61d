//! Chat domain.
//!
//! - [`message::ChatMessage`]: a line of the conversation (chat or notice)
//! - [`input::TurnInput`]: what the learner submitted for a turn

pub mod input;
pub mod message;
