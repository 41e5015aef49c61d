//! Session profile and per-session state

use crate::core::error::DomainError;
use crate::template::LevelCode;
use serde::{Deserialize, Serialize};

/// Who is chatting and at which level (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProfile {
    pub user_name: String,
    pub level: LevelCode,
}

impl SessionProfile {
    /// Validate the join form.
    ///
    /// The name is checked before the level, so a form with both fields
    /// empty reports the blank name.
    pub fn join(user_name: &str, level: Option<&str>) -> Result<Self, DomainError> {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return Err(DomainError::BlankName);
        }
        let level = match level.map(str::trim) {
            None | Some("") => return Err(DomainError::MissingLevel),
            Some(code) => code.parse::<LevelCode>()?,
        };
        Ok(Self {
            user_name: user_name.to_string(),
            level,
        })
    }

    /// Input prefix shown before the learner's message, e.g. `Ana - B1:  `
    pub fn prompt_prefix(&self) -> String {
        format!("{} - {}:  ", self.user_name, self.level)
    }
}

/// Mutable state of one chat session
///
/// Passed explicitly to the turn controller instead of living in globals.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    profile: Option<SessionProfile>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete the join step; replaces any earlier profile.
    pub fn join(
        &mut self,
        user_name: &str,
        level: Option<&str>,
    ) -> Result<&SessionProfile, DomainError> {
        let profile = SessionProfile::join(user_name, level)?;
        Ok(&*self.profile.insert(profile))
    }

    pub fn profile(&self) -> Option<&SessionProfile> {
        self.profile.as_ref()
    }

    pub fn is_joined(&self) -> bool {
        self.profile.is_some()
    }

    /// Switch level mid-session. No-op before joining.
    pub fn set_level(&mut self, level: LevelCode) -> bool {
        match self.profile.as_mut() {
            Some(profile) => {
                profile.level = level;
                true
            }
            None => false,
        }
    }
}
