//! Prompt domain
//!
//! The prompt sent to the model for every turn.

mod context;

pub use context::PromptContext;
