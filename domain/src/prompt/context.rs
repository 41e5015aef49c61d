//! Prompt context composition

use crate::template::RoleCode;
use serde::{Deserialize, Serialize};

/// A fully composed prompt for one request (Value Object)
///
/// Always made of exactly one level fragment and one role fragment, in that
/// order, followed by the attribution of the learner's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptContext(String);

impl PromptContext {
    /// Compose the prompt from already loaded template texts.
    pub fn compose(
        role: RoleCode,
        level_text: &str,
        role_text: &str,
        user_name: &str,
        user_message: &str,
    ) -> Self {
        let text = match role {
            RoleCode::Pro => format!(
                "{} {}the user named {}, says: '{}'",
                level_text, role_text, user_name, user_message
            ),
            RoleCode::ProVision => format!(
                "{} {}the user named {} shares the image: {}",
                level_text, role_text, user_name, user_message
            ),
        };
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PromptContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PromptContext {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Wrap an already composed prompt
impl From<String> for PromptContext {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for PromptContext {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}
