//! Run Turn use case.
//!
//! [`ChatSessionController`] sequences one full turn:
//!
//! 1. Check that the session has joined (name + level)
//! 2. Take the single turn token; overlapping submissions are rejected
//! 3. Publish the learner's message
//! 4. Build the prompt from the level and role templates
//! 5. Ask the model (chat session for text, one-shot vision call for images)
//! 6. Wrap the reply for display
//! 7. Analyse the reply (optional)
//! 8. Synthesize speech and start playback (optional)
//! 9. Publish the tutor's reply
//!
//! Every failure is published as a system notice before it is returned, so
//! the learner sees it in the chat and not only in the logs.

use crate::config::TurnConfig;
use crate::ports::audio_player::{AudioPlayer, NoAudioPlayer};
use crate::ports::chat_events::{ChatEvent, ChatEventBus};
use crate::ports::clock::{Clock, SystemClock};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{ChatSession, GatewayError, LlmGateway};
use crate::ports::speech::{SpeechError, SpeechSynthesizer};
use crate::ports::template_store::TemplateStore;
use crate::ports::text_analyzer::TextAnalyzer;
use crate::ports::turn_progress::{TurnProgressNotifier, TurnStage};
use crate::use_cases::build_context::{ContextError, build_context};
use lingua_domain::{
    AnalysisReport, ChatMessage, DomainError, PromptContext, SessionProfile, SessionState,
    TurnInput, audio_path_in, preview, strip_for_analysis, wrap_for_display,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info, warn};

/// Errors that end a turn
#[derive(Error, Debug)]
pub enum TurnError {
    #[error("Join the chat first: enter your name and English level")]
    NotJoined,

    #[error("Still waiting for the previous reply, try again in a moment")]
    Busy,

    #[error("Nothing to send")]
    EmptyMessage,

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Model request failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Speech synthesis failed: {0}")]
    Speech(#[from] SpeechError),

    #[error("The tutor did not answer within {0:?}")]
    Timeout(Duration),
}

/// Stable classification of a [`TurnError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingTemplate,
    UnknownModel,
    Speech,
    MissingCredentials,
    Gateway,
    NotJoined,
    Busy,
    EmptyMessage,
    Timeout,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingTemplate => "missing_template",
            ErrorKind::UnknownModel => "unknown_model",
            ErrorKind::Speech => "speech",
            ErrorKind::MissingCredentials => "missing_credentials",
            ErrorKind::Gateway => "gateway",
            ErrorKind::NotJoined => "not_joined",
            ErrorKind::Busy => "busy",
            ErrorKind::EmptyMessage => "empty_message",
            ErrorKind::Timeout => "timeout",
        }
    }
}

impl TurnError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TurnError::NotJoined => ErrorKind::NotJoined,
            TurnError::Busy => ErrorKind::Busy,
            TurnError::EmptyMessage => ErrorKind::EmptyMessage,
            TurnError::Context(ContextError::Template(_)) => ErrorKind::MissingTemplate,
            TurnError::Context(ContextError::UnknownModel(_)) => ErrorKind::UnknownModel,
            TurnError::Gateway(GatewayError::MissingCredentials(_))
            | TurnError::Speech(SpeechError::MissingCredentials(_)) => {
                ErrorKind::MissingCredentials
            }
            TurnError::Gateway(_) => ErrorKind::Gateway,
            TurnError::Speech(_) => ErrorKind::Speech,
            TurnError::Timeout(_) => ErrorKind::Timeout,
        }
    }

    /// Rejected before any work started (no message was published)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TurnError::NotJoined | TurnError::Busy | TurnError::EmptyMessage
        )
    }
}

/// Result of a completed turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Reply as displayed (wrapped)
    pub reply: String,
    /// Speech file, when speech is enabled
    pub audio_path: Option<PathBuf>,
    /// Word breakdown, when analysis is enabled
    pub analysis: Option<AnalysisReport>,
}

/// Drives chat turns for one session
///
/// Holds the single turn token: at most one turn runs at a time and a
/// submission made while another is in flight fails with
/// [`TurnError::Busy`]. The token is released when the turn returns, on
/// success and on every error path.
pub struct ChatSessionController {
    templates: Arc<dyn TemplateStore>,
    gateway: Arc<dyn LlmGateway>,
    events: Arc<ChatEventBus>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
    player: Arc<dyn AudioPlayer>,
    analyzer: Option<Arc<dyn TextAnalyzer>>,
    clock: Arc<dyn Clock>,
    conversation_logger: Arc<dyn ConversationLogger>,
    config: TurnConfig,
    turn_token: Semaphore,
    chat: Mutex<Option<Box<dyn ChatSession>>>,
}

impl ChatSessionController {
    pub fn new(
        templates: Arc<dyn TemplateStore>,
        gateway: Arc<dyn LlmGateway>,
        events: Arc<ChatEventBus>,
    ) -> Self {
        Self {
            templates,
            gateway,
            events,
            speech: None,
            player: Arc::new(NoAudioPlayer),
            analyzer: None,
            clock: Arc::new(SystemClock),
            conversation_logger: Arc::new(NoConversationLogger),
            config: TurnConfig::default(),
            turn_token: Semaphore::new(1),
            chat: Mutex::new(None),
        }
    }

    /// Enable speech: synthesize every reply and hand it to `player`.
    pub fn with_speech(
        mut self,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        player: Arc<dyn AudioPlayer>,
    ) -> Self {
        self.speech = Some(synthesizer);
        self.player = player;
        self
    }

    /// Enable the word breakdown of every reply.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_config(mut self, config: TurnConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TurnConfig {
        &self.config
    }

    pub fn speech_enabled(&self) -> bool {
        self.speech.is_some()
    }

    pub fn events(&self) -> &Arc<ChatEventBus> {
        &self.events
    }

    /// Whether a turn is currently running
    pub fn is_busy(&self) -> bool {
        self.turn_token.available_permits() == 0
    }

    /// Validate the join form and announce the learner.
    pub fn join(
        &self,
        state: &mut SessionState,
        user_name: &str,
        level: Option<&str>,
    ) -> Result<SessionProfile, DomainError> {
        let profile = state.join(user_name, level)?.clone();
        info!("{} joined at level {}", profile.user_name, profile.level);
        self.events.notice(format!(
            "{} has joined the chat ({} level).",
            profile.user_name, profile.level
        ));
        Ok(profile)
    }

    /// Forget the text conversation history; the next text turn starts a new chat.
    pub async fn reset_conversation(&self) {
        *self.chat.lock().await = None;
        debug!("Conversation history cleared");
    }

    /// Run one turn for `input`.
    pub async fn submit(
        &self,
        state: &SessionState,
        input: TurnInput,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<TurnOutcome, TurnError> {
        let Some(profile) = state.profile() else {
            return Err(self.fail(TurnError::NotJoined));
        };

        let Ok(_permit) = self.turn_token.try_acquire() else {
            return Err(self.fail(TurnError::Busy));
        };

        if input.is_empty() {
            return Err(self.fail(TurnError::EmptyMessage));
        }

        let result = self.run(profile, &input, progress).await;
        progress.on_turn_end(result.is_ok());
        result.map_err(|e| self.fail(e))
    }

    async fn run(
        &self,
        profile: &SessionProfile,
        input: &TurnInput,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<TurnOutcome, TurnError> {
        let user_text = input.display_text();
        info!(
            "Turn from {} ({}): {}",
            profile.user_name,
            input.role(),
            preview(&user_text, 80)
        );
        self.events
            .publish_message(ChatMessage::chat(&profile.user_name, &user_text));

        let role = input.role();
        let context = build_context(
            self.templates.as_ref(),
            profile.level,
            &profile.user_name,
            &user_text,
            role.as_str(),
        )?;
        self.conversation_logger.log(ConversationEvent::prompt(
            role,
            &profile.user_name,
            context.as_str(),
        ));

        progress.on_stage(TurnStage::Thinking);
        let raw_reply = self.ask_model(input, &context).await?;
        debug!("Model replied with {} chars", raw_reply.chars().count());
        let reply = wrap_for_display(&raw_reply, self.config.wrap_width);

        let analysis = match &self.analyzer {
            Some(analyzer) => {
                progress.on_stage(TurnStage::Analyzing);
                let rows = analyzer.analyze(&strip_for_analysis(&raw_reply));
                let report = AnalysisReport::new(reply.clone(), rows);
                self.events.publish(&ChatEvent::Analysis(report.clone()));
                Some(report)
            }
            None => None,
        };

        let audio_path = match &self.speech {
            Some(synthesizer) => {
                let path = audio_path_in(&self.config.audio_dir, &self.clock.now());
                progress.on_stage(TurnStage::Synthesizing);
                synthesizer.synthesize(&raw_reply, &path).await?;
                info!("Audio saved to {}", path.display());
                self.events.publish(&ChatEvent::AudioSaved(path.clone()));

                progress.on_stage(TurnStage::Playing);
                if let Err(e) = self.player.play(&path).await {
                    warn!("Playback failed: {}", e);
                    self.events.notice(format!("Could not play the reply: {}", e));
                }
                Some(path)
            }
            None => None,
        };

        self.events.publish_message(ChatMessage::tutor(&reply));
        self.conversation_logger
            .log(ConversationEvent::reply(&reply, audio_path.as_deref()));

        Ok(TurnOutcome {
            reply,
            audio_path,
            analysis,
        })
    }

    async fn ask_model(
        &self,
        input: &TurnInput,
        context: &PromptContext,
    ) -> Result<String, TurnError> {
        let request = self.request_reply(input, context);
        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| TurnError::Timeout(limit))?
                .map_err(TurnError::from),
            None => request.await.map_err(TurnError::from),
        }
    }

    async fn request_reply(
        &self,
        input: &TurnInput,
        context: &PromptContext,
    ) -> Result<String, GatewayError> {
        match input {
            TurnInput::Text(_) => {
                let mut chat = self.chat.lock().await;
                if chat.is_none() {
                    *chat = Some(self.gateway.start_chat().await?);
                }
                match chat.as_deref() {
                    Some(session) => session.send(context).await,
                    None => Err(GatewayError::Other("chat session unavailable".into())),
                }
            }
            TurnInput::Images(images) => self.gateway.describe_images(context, images).await,
        }
    }

    /// Report a failed turn to the learner, the logs and the transcript.
    fn fail(&self, error: TurnError) -> TurnError {
        let kind = error.kind();
        warn!("Turn failed ({}): {}", kind.as_str(), error);
        self.events.notice(error.to_string());
        self.conversation_logger
            .log(ConversationEvent::failure(kind.as_str(), &error.to_string()));
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::audio_player::PlaybackError;
    use crate::ports::chat_events::ChatEventSink;
    use crate::ports::template_store::{TemplateError, TemplateKind};
    use crate::ports::turn_progress::NoTurnProgress;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use lingua_domain::{ImageAttachment, LevelCode, MessageKind, RoleCode, WordAnalysis};
    use std::path::Path;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    // ==================== Fakes ====================

    struct FixedTemplates {
        missing_roles: bool,
    }

    impl TemplateStore for FixedTemplates {
        fn level_template(&self, level: LevelCode) -> Result<String, TemplateError> {
            Ok(format!("[{}]", level))
        }

        fn role_template(&self, role: RoleCode) -> Result<String, TemplateError> {
            if self.missing_roles {
                return Err(TemplateError::Missing {
                    kind: TemplateKind::Role,
                    path: format!("rol-model/{}", role.file_name()),
                });
            }
            Ok(format!("<{}> ", role))
        }
    }

    /// Gateway that echoes prompts and records what it saw
    #[derive(Default)]
    struct EchoGateway {
        prompts: Arc<StdMutex<Vec<String>>>,
        chats_started: AtomicUsize,
        images_seen: AtomicUsize,
        fail_with_credentials: bool,
        gate: Option<Arc<Gate>>,
    }

    /// Lets a test hold a request open
    struct Gate {
        entered: Notify,
        release: Notify,
    }

    struct EchoSession {
        prompts: Arc<StdMutex<Vec<String>>>,
        gate: Option<Arc<Gate>>,
    }

    #[async_trait]
    impl ChatSession for EchoSession {
        async fn send(&self, prompt: &PromptContext) -> Result<String, GatewayError> {
            if let Some(gate) = &self.gate {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.as_str().to_string());
            Ok(format!("Reply number {}.", prompts.len()))
        }
    }

    #[async_trait]
    impl LlmGateway for EchoGateway {
        async fn start_chat(&self) -> Result<Box<dyn ChatSession>, GatewayError> {
            if self.fail_with_credentials {
                return Err(GatewayError::MissingCredentials("GOOGLE_API_KEY".into()));
            }
            self.chats_started.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(EchoSession {
                prompts: self.prompts.clone(),
                gate: self.gate.clone(),
            }))
        }

        async fn describe_images(
            &self,
            prompt: &PromptContext,
            images: &[ImageAttachment],
        ) -> Result<String, GatewayError> {
            self.images_seen.fetch_add(images.len(), Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.as_str().to_string());
            Ok("A cat on a sofa!".to_string())
        }
    }

    struct FakeSpeech {
        fail: bool,
        written: StdMutex<Vec<(String, PathBuf)>>,
    }

    impl FakeSpeech {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                written: StdMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for FakeSpeech {
        async fn synthesize(&self, text: &str, output: &Path) -> Result<(), SpeechError> {
            if self.fail {
                return Err(SpeechError::Rejected {
                    status: 401,
                    message: "invalid api key".into(),
                });
            }
            self.written
                .lock()
                .unwrap()
                .push((text.to_string(), output.to_path_buf()));
            Ok(())
        }
    }

    struct FailingPlayer;

    #[async_trait]
    impl AudioPlayer for FailingPlayer {
        async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
            Err(PlaybackError::StartFailed {
                path: path.display().to_string(),
                reason: "no device".into(),
            })
        }
    }

    struct WordSplitter;

    impl TextAnalyzer for WordSplitter {
        fn analyze(&self, text: &str) -> Vec<WordAnalysis> {
            text.split_whitespace()
                .map(|w| WordAnalysis {
                    word: w.to_lowercase(),
                    base_form: w.to_lowercase(),
                    tag: "X".into(),
                })
                .collect()
        }
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap()
        }
    }

    #[derive(Default)]
    struct EventLog(StdMutex<Vec<ChatEvent>>);

    impl ChatEventSink for EventLog {
        fn on_event(&self, event: &ChatEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    impl EventLog {
        fn messages(&self) -> Vec<ChatMessage> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e {
                    ChatEvent::Message(m) => Some(m.clone()),
                    _ => None,
                })
                .collect()
        }

        fn notices(&self) -> Vec<String> {
            self.messages()
                .into_iter()
                .filter(|m| m.kind() == MessageKind::SystemNotice)
                .map(|m| m.body().to_string())
                .collect()
        }
    }

    fn controller(gateway: EchoGateway) -> (ChatSessionController, Arc<EventLog>) {
        let bus = Arc::new(ChatEventBus::new());
        let log = Arc::new(EventLog::default());
        bus.subscribe(log.clone());
        let controller = ChatSessionController::new(
            Arc::new(FixedTemplates {
                missing_roles: false,
            }),
            Arc::new(gateway),
            bus,
        )
        .with_clock(Arc::new(FixedClock));
        (controller, log)
    }

    fn joined() -> SessionState {
        let mut state = SessionState::new();
        state.join("Ana", Some("B1")).unwrap();
        state
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_text_turn_publishes_user_then_tutor() {
        let (controller, log) = controller(EchoGateway::default());

        let outcome = controller
            .submit(&joined(), TurnInput::Text(" Hello! ".into()), &NoTurnProgress)
            .await
            .unwrap();

        assert_eq!(outcome.reply, "Reply number 1.");
        assert!(outcome.audio_path.is_none());
        assert!(outcome.analysis.is_none());

        let messages = log.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender(), "Ana");
        assert_eq!(messages[0].body(), "Hello!");
        assert_eq!(messages[1].sender(), "Gemini:");
        assert_eq!(messages[1].body(), "Reply number 1.");
    }

    #[tokio::test]
    async fn test_prompt_is_built_from_templates() {
        let gateway = EchoGateway::default();
        let prompts = gateway.prompts.clone();
        let (controller, _) = controller(gateway);

        controller
            .submit(&joined(), TurnInput::Text("I goes home".into()), &NoTurnProgress)
            .await
            .unwrap();

        assert_eq!(
            prompts.lock().unwrap()[0],
            "[B1] <pro> the user named Ana, says: 'I goes home'"
        );
    }

    #[tokio::test]
    async fn test_chat_session_is_reused_across_turns() {
        let (controller, _) = controller(EchoGateway::default());
        let state = joined();

        controller
            .submit(&state, TurnInput::Text("one".into()), &NoTurnProgress)
            .await
            .unwrap();
        let second = controller
            .submit(&state, TurnInput::Text("two".into()), &NoTurnProgress)
            .await
            .unwrap();

        assert_eq!(second.reply, "Reply number 2.");
    }

    #[tokio::test]
    async fn test_reset_conversation_starts_new_chat() {
        let gateway = Arc::new(EchoGateway::default());
        let bus = Arc::new(ChatEventBus::new());
        let controller = ChatSessionController::new(
            Arc::new(FixedTemplates {
                missing_roles: false,
            }),
            gateway.clone(),
            bus,
        );
        let state = joined();

        controller
            .submit(&state, TurnInput::Text("one".into()), &NoTurnProgress)
            .await
            .unwrap();
        controller.reset_conversation().await;
        controller
            .submit(&state, TurnInput::Text("two".into()), &NoTurnProgress)
            .await
            .unwrap();

        assert_eq!(gateway.chats_started.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_image_turn_uses_vision_and_manifest() {
        let gateway = EchoGateway::default();
        let prompts = gateway.prompts.clone();
        let (controller, log) = controller(gateway);

        let images = vec![
            ImageAttachment::new("cat.png", vec![1, 2]).unwrap(),
            ImageAttachment::new("sofa.jpg", vec![3]).unwrap(),
        ];
        let outcome = controller
            .submit(&joined(), TurnInput::Images(images), &NoTurnProgress)
            .await
            .unwrap();

        assert_eq!(outcome.reply, "A cat on a sofa!");
        assert_eq!(log.messages()[0].body(), "Upload: cat.png | sofa.jpg");
        assert!(
            prompts.lock().unwrap()[0]
                .ends_with("the user named Ana shares the image: Upload: cat.png | sofa.jpg")
        );
    }

    #[tokio::test]
    async fn test_not_joined_is_rejected_visibly() {
        let (controller, log) = controller(EchoGateway::default());

        let err = controller
            .submit(
                &SessionState::new(),
                TurnInput::Text("hi".into()),
                &NoTurnProgress,
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotJoined);
        assert!(err.is_rejection());
        assert_eq!(log.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let (controller, log) = controller(EchoGateway::default());

        let err = controller
            .submit(&joined(), TurnInput::Text("   ".into()), &NoTurnProgress)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::EmptyMessage);
        assert_eq!(log.messages().len(), 1);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_missing_template_aborts_before_model() {
        let gateway = Arc::new(EchoGateway::default());
        let bus = Arc::new(ChatEventBus::new());
        let log = Arc::new(EventLog::default());
        bus.subscribe(log.clone());
        let controller = ChatSessionController::new(
            Arc::new(FixedTemplates {
                missing_roles: true,
            }),
            gateway.clone(),
            bus,
        );

        let err = controller
            .submit(&joined(), TurnInput::Text("hi".into()), &NoTurnProgress)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingTemplate);
        assert_eq!(gateway.chats_started.load(Ordering::SeqCst), 0);
        assert!(log.notices()[0].contains("rol-model/pro.txt"));
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_missing_credentials_kind() {
        let (controller, log) = controller(EchoGateway {
            fail_with_credentials: true,
            ..Default::default()
        });

        let err = controller
            .submit(&joined(), TurnInput::Text("hi".into()), &NoTurnProgress)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingCredentials);
        assert!(log.notices()[0].contains("GOOGLE_API_KEY"));
    }

    #[tokio::test]
    async fn test_speech_writes_timestamped_file() {
        let speech = Arc::new(FakeSpeech::new(false));
        let (controller, log) = controller(EchoGateway::default());
        let controller = controller
            .with_speech(speech.clone(), Arc::new(NoAudioPlayer))
            .with_config(TurnConfig::default().with_audio_dir("out"));

        let outcome = controller
            .submit(&joined(), TurnInput::Text("hi".into()), &NoTurnProgress)
            .await
            .unwrap();

        let expected = PathBuf::from("out").join("2024_01_02_03_04_05.mp3");
        assert_eq!(outcome.audio_path.as_deref(), Some(expected.as_path()));
        assert_eq!(
            speech.written.lock().unwrap()[0],
            ("Reply number 1.".to_string(), expected.clone())
        );
        assert!(
            log.0
                .lock()
                .unwrap()
                .contains(&ChatEvent::AudioSaved(expected))
        );
    }

    #[tokio::test]
    async fn test_speech_failure_aborts_turn() {
        let (controller, log) = controller(EchoGateway::default());
        let controller =
            controller.with_speech(Arc::new(FakeSpeech::new(true)), Arc::new(NoAudioPlayer));

        let err = controller
            .submit(&joined(), TurnInput::Text("hi".into()), &NoTurnProgress)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Speech);
        assert!(
            log.messages()
                .iter()
                .all(|m| m.sender() != lingua_domain::TUTOR_SENDER)
        );
        assert!(log.notices()[0].contains("invalid api key"));
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_playback_failure_is_only_a_notice() {
        let (controller, log) = controller(EchoGateway::default());
        let controller =
            controller.with_speech(Arc::new(FakeSpeech::new(false)), Arc::new(FailingPlayer));

        let outcome = controller
            .submit(&joined(), TurnInput::Text("hi".into()), &NoTurnProgress)
            .await
            .unwrap();

        assert!(outcome.audio_path.is_some());
        assert!(log.notices()[0].starts_with("Could not play the reply"));
        assert_eq!(
            log.messages().last().unwrap().sender(),
            lingua_domain::TUTOR_SENDER
        );
    }

    #[tokio::test]
    async fn test_analysis_strips_punctuation() {
        let (controller, log) = controller(EchoGateway::default());
        let controller = controller.with_analyzer(Arc::new(WordSplitter));

        let outcome = controller
            .submit(&joined(), TurnInput::Text("hi".into()), &NoTurnProgress)
            .await
            .unwrap();

        let report = outcome.analysis.unwrap();
        let words: Vec<&str> = report.rows.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["1", "number", "reply"]);
        assert_eq!(report.original_text, "Reply number 1.");
        assert!(
            log.0
                .lock()
                .unwrap()
                .iter()
                .any(|e| matches!(e, ChatEvent::Analysis(_)))
        );
    }

    #[tokio::test]
    async fn test_reply_is_wrapped() {
        let (controller, _) = controller(EchoGateway::default());
        let controller = controller.with_config(TurnConfig::default().with_wrap_width(5));

        let outcome = controller
            .submit(&joined(), TurnInput::Text("hi".into()), &NoTurnProgress)
            .await
            .unwrap();

        assert_eq!(outcome.reply, "Reply\n numb\ner 1.");
    }

    #[tokio::test]
    async fn test_overlapping_submission_is_busy() {
        let gate = Arc::new(Gate {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let (controller, _) = controller(EchoGateway {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let controller = Arc::new(controller);
        let state = joined();

        let first = {
            let controller = controller.clone();
            let state = state.clone();
            tokio::spawn(async move {
                controller
                    .submit(&state, TurnInput::Text("first".into()), &NoTurnProgress)
                    .await
            })
        };

        gate.entered.notified().await;
        assert!(controller.is_busy());

        let err = controller
            .submit(&state, TurnInput::Text("second".into()), &NoTurnProgress)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Busy);

        gate.release.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert!(!controller.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let gate = Arc::new(Gate {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let (controller, _) = controller(EchoGateway {
            gate: Some(gate),
            ..Default::default()
        });
        let controller =
            controller.with_config(TurnConfig::default().with_timeout_seconds(Some(5)));

        let err = controller
            .submit(&joined(), TurnInput::Text("hi".into()), &NoTurnProgress)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_join_announces_learner() {
        let (controller, log) = controller(EchoGateway::default());
        let mut state = SessionState::new();

        assert!(controller.join(&mut state, "", Some("A1")).is_err());
        let profile = controller.join(&mut state, "Ana", Some("c2")).unwrap();

        assert_eq!(profile.level, LevelCode::C2);
        assert_eq!(log.notices(), vec!["Ana has joined the chat (C2 level)."]);
    }
}
