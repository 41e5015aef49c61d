//! Secrets resolved from the configuration and the environment

use super::file_config::FileConfig;

/// API keys and voice id needed by the remote services
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub google_api_key: Option<String>,
    pub xi_api_key: Option<String>,
    pub voice_id: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("google_api_key", &mask(&self.google_api_key))
            .field("xi_api_key", &mask(&self.xi_api_key))
            .field("voice_id", &mask(&self.voice_id))
            .finish()
    }
}

impl Credentials {
    /// Resolve from the process environment.
    pub fn from_env(config: &FileConfig) -> Self {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    /// Resolve using `lookup` to read environment variables.
    pub fn resolve(config: &FileConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            google_api_key: config.gemini.resolve_api_key(&lookup),
            xi_api_key: config.speech.resolve_api_key(&lookup),
            voice_id: config.speech.resolve_voice_id(&lookup),
        }
    }

    /// Names of the environment variables that are required but unset.
    ///
    /// `speech_enabled` is the effective setting after command-line
    /// overrides; speech credentials are only required when it is true.
    pub fn missing(&self, config: &FileConfig, speech_enabled: bool) -> Vec<String> {
        let mut missing = Vec::new();
        if self.google_api_key.is_none() {
            missing.push(config.gemini.api_key_env.clone());
        }
        if speech_enabled {
            if self.xi_api_key.is_none() {
                missing.push(config.speech.api_key_env.clone());
            }
            if self.voice_id.is_none() {
                missing.push(config.speech.voice_id_env.clone());
            }
        }
        missing
    }
}
