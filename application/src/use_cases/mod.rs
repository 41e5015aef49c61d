//! Use cases (application services)
//!
//! - [`build_context`]: compose the prompt from level and role templates
//! - [`run_turn`]: the chat session controller driving one turn at a time

pub mod build_context;
pub mod run_turn;
