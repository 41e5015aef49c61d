//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for lingua-chat
#[derive(Parser, Debug)]
#[command(name = "lingua-chat")]
#[command(author, version, about = "English tutor chat - talk with an AI tutor at your level")]
#[command(long_about = r#"
Lingua Chat is an interactive English tutor. Join with your name and a CEFR
level (A1 to C2); every message is wrapped in the level and role prompt
templates before it is sent to the model. Replies can be read aloud and
broken down word by word.

Prompt templates are read from:
  levels/A1.txt .. levels/C2.txt
  rol-model/pro.txt, rol-model/pro_vision.txt

Credentials are taken from the environment (or a .env file):
  GOOGLE_API_KEY   Gemini API key
  XI_API_KEY       ElevenLabs API key
  VOICE_ID         ElevenLabs voice

Configuration files are loaded from (in priority order):
1. LINGUA_* environment variables (e.g. LINGUA_CHAT__WRAP_WIDTH=80)
2. --config <path>     Explicit config file
3. ./lingua.toml       Project-level config
4. ~/.config/lingua-chat/config.toml   Global config

Example:
  lingua-chat --name Ana --level B1
  lingua-chat --no-speech --log-conversation
"#)]
pub struct Cli {
    /// Your name (asked interactively when omitted)
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// English level: A1, A2, B1, B2, C1 or C2 (asked interactively when omitted)
    #[arg(short, long, value_name = "LEVEL")]
    pub level: Option<String>,

    /// Do not synthesize or play replies
    #[arg(long)]
    pub no_speech: bool,

    /// Do not show the word analysis table
    #[arg(long)]
    pub no_analysis: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write the conversation transcript as JSONL
    #[arg(long)]
    pub log_conversation: bool,

    /// Directory for log files (default: ./logs)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
