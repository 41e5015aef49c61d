//! Chat message entity

use serde::{Deserialize, Serialize};

/// Sender name used for tutor replies
pub const TUTOR_SENDER: &str = "Gemini:";

/// Kind of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Regular message from the learner or the tutor
    Chat,
    /// Informational line (joins, failures, warnings)
    SystemNotice,
}

/// A message shown in the conversation (Entity)
///
/// Immutable once constructed; consumed by the display and then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    sender: String,
    body: String,
    kind: MessageKind,
}

impl ChatMessage {
    pub fn chat(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            kind: MessageKind::Chat,
        }
    }

    /// Tutor reply
    pub fn tutor(body: impl Into<String>) -> Self {
        Self::chat(TUTOR_SENDER, body)
    }

    pub fn notice(body: impl Into<String>) -> Self {
        Self {
            sender: String::new(),
            body: body.into(),
            kind: MessageKind::SystemNotice,
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn is_notice(&self) -> bool {
        self.kind == MessageKind::SystemNotice
    }

    /// First letter of the sender, uppercased (avatar label)
    pub fn initials(&self) -> String {
        self.sender
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    /// Palette slot for the sender's avatar, the same across runs and builds
    pub fn avatar_index(&self, palette_len: usize) -> usize {
        if palette_len == 0 {
            return 0;
        }
        (fnv1a(self.sender.as_bytes()) % palette_len as u64) as usize
    }
}

// 64-bit FNV-1a
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}
