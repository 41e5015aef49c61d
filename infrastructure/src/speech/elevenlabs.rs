//! ElevenLabs streaming text-to-speech

use crate::config::FileSpeechConfig;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use lingua_application::ports::speech::{SpeechError, SpeechSynthesizer};
use reqwest::Client;
use serde::Serialize;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Voice tuning sent with every request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.8,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

#[derive(Clone)]
pub struct ElevenLabsSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub voice_id: Option<String>,
    pub voice_id_env: String,
    pub model_id: String,
    pub voice: VoiceSettings,
}

impl ElevenLabsSettings {
    pub fn from_config(
        config: &FileSpeechConfig,
        api_key: Option<String>,
        voice_id: Option<String>,
    ) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            voice_id,
            voice_id_env: config.voice_id_env.clone(),
            model_id: config.model_id.clone(),
            voice: VoiceSettings {
                stability: config.stability,
                similarity_boost: config.similarity_boost,
                style: config.style,
                use_speaker_boost: config.use_speaker_boost,
            },
        }
    }
}

#[derive(Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// Streams synthesized speech straight to an MP3 file
pub struct ElevenLabsSynthesizer {
    http: Client,
    settings: ElevenLabsSettings,
}

impl ElevenLabsSynthesizer {
    pub fn new(settings: ElevenLabsSettings) -> Self {
        Self {
            http: Client::new(),
            settings,
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.settings.api_key.is_some() && self.settings.voice_id.is_some()
    }

    fn credentials(&self) -> Result<(&str, &str), SpeechError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| SpeechError::MissingCredentials(self.settings.api_key_env.clone()))?;
        let voice_id = self
            .settings
            .voice_id
            .as_deref()
            .ok_or_else(|| SpeechError::MissingCredentials(self.settings.voice_id_env.clone()))?;
        Ok((api_key, voice_id))
    }
}

fn io_error(output: &Path, e: impl std::fmt::Display) -> SpeechError {
    SpeechError::Io {
        path: output.display().to_string(),
        reason: e.to_string(),
    }
}

/// Write `body` to `output`. A partial file is removed when the stream or a
/// write fails.
async fn save_stream<S, B, E>(body: S, output: &Path) -> Result<(), SpeechError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let result = write_stream(body, output).await;
    if result.is_err()
        && let Err(e) = tokio::fs::remove_file(output).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!("Could not remove partial audio {}: {}", output.display(), e);
    }
    result
}

async fn write_stream<S, B, E>(body: S, output: &Path) -> Result<(), SpeechError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut file = tokio::fs::File::create(output)
        .await
        .map_err(|e| io_error(output, e))?;
    let mut body = std::pin::pin!(body);
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| SpeechError::ConnectionError(e.to_string()))?;
        file.write_all(chunk.as_ref())
            .await
            .map_err(|e| io_error(output, e))?;
    }
    file.flush().await.map_err(|e| io_error(output, e))
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, text: &str, output: &Path) -> Result<(), SpeechError> {
        let (api_key, voice_id) = self.credentials()?;
        let url = format!(
            "{}/v1/text-to-speech/{}/stream",
            self.settings.base_url.trim_end_matches('/'),
            voice_id
        );

        debug!("Requesting speech for {} chars", text.chars().count());

        let response = self
            .http
            .post(url)
            .header("Accept", "application/json")
            .header("xi-api-key", api_key)
            .json(&TextToSpeechRequest {
                text,
                model_id: &self.settings.model_id,
                voice_settings: &self.settings.voice,
            })
            .send()
            .await
            .map_err(|e| SpeechError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Text-to-speech rejected with {}", status);
            return Err(SpeechError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        save_stream(response.bytes_stream(), output).await?;

        info!("Audio stream saved successfully: {}", output.display());
        Ok(())
    }
}
