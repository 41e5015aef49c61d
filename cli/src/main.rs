//! CLI entrypoint for Lingua Chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use lingua_application::{
    AudioPlayer, ChatEventBus, ChatSessionController, NoAudioPlayer, TurnConfig,
};
use lingua_infrastructure::{
    CommandAudioPlayer, ConfigLoader, Credentials, ElevenLabsSettings, ElevenLabsSynthesizer,
    FileConfig, FileTemplateStore, GeminiGateway, GeminiSettings, JsonlConversationLogger,
    Severity, StemmingAnalyzer,
};
use lingua_presentation::{ChatRepl, Cli, ConsoleChatView, ProgressReporter, ReplConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_DIR: &str = "logs";

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials usually live in a .env file next to the templates
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Could not read .env: {}", e),
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    for issue in config.validate() {
        match issue.severity {
            Severity::Warning => warn!("Config: {}", issue),
            Severity::Error => error!("Config: {}", issue),
        }
    }
    if config.has_errors() {
        bail!("Invalid configuration, see the errors above");
    }

    info!("Starting Lingua Chat");

    let speech_enabled = config.speech.enabled && !cli.no_speech;
    let analysis_enabled = config.chat.analysis && !cli.no_analysis;
    let show_progress = config.repl.show_progress && !cli.quiet;

    // === Dependency Injection ===
    let events = Arc::new(ChatEventBus::new());
    let progress = Arc::new(ProgressReporter::new());

    let mut view = ConsoleChatView::new().with_analysis(analysis_enabled);
    if show_progress {
        view = view.with_progress(Arc::clone(&progress));
    }
    events.subscribe(Arc::new(view));

    let credentials = Credentials::from_env(&config);
    for name in credentials.missing(&config, speech_enabled) {
        warn!("{} is not set", name);
        events.notice(format!(
            "Missing credentials: {} is not set. Add it to your environment or .env file.",
            name
        ));
    }

    let templates = FileTemplateStore::new(&config.paths.levels_dir, &config.paths.roles_dir);
    for path in templates.missing_files() {
        warn!("Missing template file: {}", path.display());
    }

    let gateway = GeminiGateway::new(GeminiSettings::from_config(
        &config.gemini,
        credentials.google_api_key.clone(),
    ));

    let turn_config = TurnConfig::default()
        .with_wrap_width(config.chat.wrap_width)
        .with_audio_dir(&config.paths.audio_dir)
        .with_timeout_seconds(config.chat.timeout_seconds);

    let mut controller =
        ChatSessionController::new(Arc::new(templates), Arc::new(gateway), Arc::clone(&events))
            .with_config(turn_config);

    if speech_enabled {
        let synthesizer = ElevenLabsSynthesizer::new(ElevenLabsSettings::from_config(
            &config.speech,
            credentials.xi_api_key.clone(),
            credentials.voice_id.clone(),
        ));
        controller = controller.with_speech(Arc::new(synthesizer), audio_player(&config));
    }

    if analysis_enabled {
        let analyzer = StemmingAnalyzer::new().context("Failed to build the word analyzer")?;
        controller = controller.with_analyzer(Arc::new(analyzer));
    }

    if cli.log_conversation {
        let dir = cli
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        match JsonlConversationLogger::for_session(&dir) {
            Some(logger) => {
                info!("Conversation log: {}", logger.path().display());
                controller = controller.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Conversation logging disabled"),
        }
    }

    let repl_config = ReplConfig {
        show_progress,
        history_file: config.repl.history_file.as_ref().map(PathBuf::from),
    };

    let mut repl = ChatRepl::new(Arc::new(controller), repl_config)
        .with_progress(progress)
        .with_join(cli.name, cli.level);

    repl.run().await?;

    Ok(())
}

/// Configured player, or a silent one when it is disabled or not installed.
fn audio_player(config: &FileConfig) -> Arc<dyn AudioPlayer> {
    if !config.playback.enabled {
        return Arc::new(NoAudioPlayer);
    }
    match CommandAudioPlayer::detect(&config.playback.command, config.playback.args.clone()) {
        Ok(player) => Arc::new(player),
        Err(e) => {
            warn!("{}; replies will be saved but not played", e);
            Arc::new(NoAudioPlayer)
        }
    }
}

/// Initialize logging based on verbosity level, plus a daily log file when
/// `log_dir` is given.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "lingua-chat.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}
