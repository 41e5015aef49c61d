//! Learner input for one turn

use crate::core::error::DomainError;
use crate::template::RoleCode;

/// Image extensions accepted for upload
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// An image shared by the learner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub name: String,
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

impl ImageAttachment {
    /// Create an attachment, inferring the MIME type from the file name.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Result<Self, DomainError> {
        let name = name.into();
        let mime_type = mime_type_for(&name)?;
        Ok(Self {
            name,
            mime_type,
            data,
        })
    }
}

fn mime_type_for(name: &str) -> Result<&'static str, DomainError> {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "webp" => Ok("image/webp"),
        _ => Err(DomainError::UnsupportedImage(name.to_string())),
    }
}

/// What the learner submitted for a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnInput {
    Text(String),
    Images(Vec<ImageAttachment>),
}

impl TurnInput {
    /// Role template used for this input
    pub fn role(&self) -> RoleCode {
        match self {
            TurnInput::Text(_) => RoleCode::Pro,
            TurnInput::Images(_) => RoleCode::ProVision,
        }
    }

    /// Text that represents the input in the chat and in the prompt
    pub fn display_text(&self) -> String {
        match self {
            TurnInput::Text(text) => text.trim().to_string(),
            TurnInput::Images(images) => upload_manifest(images),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TurnInput::Text(text) => text.trim().is_empty(),
            TurnInput::Images(images) => images.is_empty(),
        }
    }
}

/// `Upload: a.png | b.jpg`
pub fn upload_manifest(images: &[ImageAttachment]) -> String {
    let names: Vec<&str> = images.iter().map(|i| i.name.as_str()).collect();
    format!("Upload: {}", names.join(" | "))
}
