//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use crate::config::ReplConfig;
use lingua_application::{ChatSessionController, NoTurnProgress, TurnProgressNotifier};
use lingua_domain::{ImageAttachment, LevelCode, SessionState, TurnInput};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Help,
    /// `/level` alone shows the current level
    Level(Option<String>),
    Image(Vec<String>),
    Reset,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`; other lines are chat messages.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let mut words = split_args(rest).into_iter();
        let name = words.next().unwrap_or_default();
        let args: Vec<String> = words.collect();

        Some(match name.as_str() {
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "help" | "h" | "?" => ReplCommand::Help,
            "level" => ReplCommand::Level(args.into_iter().next()),
            "image" | "img" => ReplCommand::Image(args),
            "reset" => ReplCommand::Reset,
            _ => ReplCommand::Unknown(line.to_string()),
        })
    }
}

/// Split on whitespace, keeping `"quoted words"`, `'quoted words'` and
/// `escaped\ spaces` together.
fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        args.push(current);
    }
    args
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: Arc<ChatSessionController>,
    state: SessionState,
    config: ReplConfig,
    progress: Option<Arc<ProgressReporter>>,
    name: Option<String>,
    level: Option<String>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: Arc<ChatSessionController>, config: ReplConfig) -> Self {
        Self {
            controller,
            state: SessionState::new(),
            config,
            progress: None,
            name: None,
            level: None,
        }
    }

    /// Spinner driven by the running turn
    pub fn with_progress(mut self, progress: Arc<ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Pre-fill the join form; invalid values are asked again.
    pub fn with_join(mut self, name: Option<String>, level: Option<String>) -> Self {
        self.name = name;
        self.level = level;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        println!("{}", ConsoleFormatter::welcome());

        match self.join(&mut rl) {
            Ok(()) => {}
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("Bye!");
                return Ok(());
            }
            Err(err) => return Err(err),
        }

        loop {
            let prompt = self
                .state
                .profile()
                .map(|p| p.prompt_prefix())
                .unwrap_or_else(|| ">>> ".to_string());

            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command).await {
                            break;
                        }
                        continue;
                    }

                    self.submit(TurnInput::Text(line.to_string())).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Ask for name and level until both are valid.
    fn join(&mut self, rl: &mut DefaultEditor) -> RlResult<()> {
        loop {
            let name = match self.name.take() {
                Some(name) => name,
                None => rl.readline("Your name: ")?,
            };
            let level = match self.level.take() {
                Some(level) => level,
                None => rl.readline("English level (A1, A2, B1, B2, C1, C2): ")?,
            };

            match self.controller.join(&mut self.state, &name, Some(&level)) {
                Ok(_) => return Ok(()),
                Err(e) => eprintln!("{}", ConsoleFormatter::form_error(&e.to_string())),
            }
        }
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => println!("{}", ConsoleFormatter::help()),
            ReplCommand::Level(None) => {
                if let Some(profile) = self.state.profile() {
                    println!("Current level: {}", profile.level);
                }
            }
            ReplCommand::Level(Some(code)) => match code.parse::<LevelCode>() {
                Ok(level) => {
                    if self.state.set_level(level) {
                        self.controller
                            .events()
                            .notice(format!("Level changed to {}.", level));
                    }
                }
                Err(e) => eprintln!("{}", ConsoleFormatter::form_error(&e.to_string())),
            },
            ReplCommand::Image(paths) if paths.is_empty() => {
                eprintln!(
                    "{}",
                    ConsoleFormatter::form_error("Usage: /image <path> [<path>...]")
                );
            }
            ReplCommand::Image(paths) => match load_images(&paths).await {
                Ok(images) => self.submit(TurnInput::Images(images)).await,
                Err(message) => eprintln!("{}", ConsoleFormatter::form_error(&message)),
            },
            ReplCommand::Reset => {
                self.controller.reset_conversation().await;
                self.controller
                    .events()
                    .notice("Started a new conversation.");
            }
            ReplCommand::Unknown(line) => {
                println!("Unknown command: {}", line);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn submit(&self, input: TurnInput) {
        let progress: &dyn TurnProgressNotifier = match (&self.progress, self.config.show_progress)
        {
            (Some(progress), true) => progress.as_ref(),
            _ => &NoTurnProgress,
        };

        // Failures are already shown as notices by the controller
        if let Err(e) = self.controller.submit(&self.state, input, progress).await {
            debug!("Turn ended with {}: {}", e.kind().as_str(), e);
        }
    }
}

/// Read image files for upload.
async fn load_images(paths: &[String]) -> Result<Vec<ImageAttachment>, String> {
    let mut images = Vec::with_capacity(paths.len());
    for raw in paths {
        let path = Path::new(raw);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| raw.clone());
        // Check the extension before reading the file
        ImageAttachment::new(name.clone(), Vec::new()).map_err(|e| e.to_string())?;
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| format!("Could not read {}: {}", raw, e))?;
        images.push(ImageAttachment::new(name, data).map_err(|e| e.to_string())?);
    }
    Ok(images)
}
