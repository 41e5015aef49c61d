//! Presentation layer for lingua-chat
//!
//! This crate contains CLI definitions, console output,
//! progress reporters, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use output::console::{ConsoleChatView, ConsoleFormatter};
pub use progress::reporter::ProgressReporter;
