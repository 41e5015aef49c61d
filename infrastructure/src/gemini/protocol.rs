//! Wire types for the `generateContent` REST endpoint

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lingua_domain::ImageAttachment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: &'a [Content],
}

/// One turn of conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: "user".to_string(),
            parts,
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn image(image: &ImageAttachment) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.to_string(),
                data: STANDARD.encode(&image.data),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 encoded bytes
    pub data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// What a response yielded once its text parts are joined
#[derive(Debug, PartialEq)]
pub enum ReplyText {
    Text(String),
    Blocked(String),
    Empty,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    pub fn reply_text(&self) -> ReplyText {
        let candidate = self.candidates.first();
        let text: String = candidate
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if !text.is_empty() {
            return ReplyText::Text(text);
        }
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return ReplyText::Blocked(reason);
        }
        match candidate.and_then(|c| c.finish_reason.as_deref()) {
            Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                ReplyText::Blocked(reason.to_string())
            }
            _ => ReplyText::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_image_part_serializes_inline_data() {
        let image = ImageAttachment::new("cat.png", vec![1, 2, 3]).unwrap();
        let value = serde_json::to_value(Part::image(&image)).unwrap();
        assert_eq!(
            value,
            json!({ "inline_data": { "mime_type": "image/png", "data": "AQID" } })
        );
    }

    #[test]
    fn test_text_part_omits_inline_data() {
        let value = serde_json::to_value(Part::text("hi")).unwrap();
        assert_eq!(value, json!({ "text": "hi" }));
    }

    #[test]
    fn test_reply_text_joins_parts() {
        let response = parse(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Hello " }, { "text": "Ana!" }] },
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(response.reply_text(), ReplyText::Text("Hello Ana!".to_string()));
    }

    #[test]
    fn test_reply_text_reports_block_reason() {
        let response = parse(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        assert_eq!(response.reply_text(), ReplyText::Blocked("SAFETY".to_string()));
    }

    #[test]
    fn test_reply_text_safety_finish_is_blocked() {
        let response = parse(json!({ "candidates": [{ "finishReason": "SAFETY" }] }));
        assert_eq!(response.reply_text(), ReplyText::Blocked("SAFETY".to_string()));
    }

    #[test]
    fn test_reply_text_empty() {
        let response = parse(json!({ "candidates": [] }));
        assert_eq!(response.reply_text(), ReplyText::Empty);
    }
}
