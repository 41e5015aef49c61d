//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown English level: {0} (expected one of A1, A2, B1, B2, C1, C2)")]
    UnknownLevel(String),

    #[error("Model not found: {0}, try 'pro' or 'pro_vision'")]
    UnknownRole(String),

    #[error("Name cannot be blank!")]
    BlankName,

    #[error("Select an English level!")]
    MissingLevel,

    #[error("Unsupported image type: {0} (expected jpg, jpeg, png or webp)")]
    UnsupportedImage(String),
}

impl DomainError {
    /// Check if this error was produced by the join form validation
    pub fn is_join_error(&self) -> bool {
        matches!(self, DomainError::BlankName | DomainError::MissingLevel)
    }
}
