//! Template store port
//!
//! Defines how prompt fragments are looked up by level and role.

use lingua_domain::{LevelCode, RoleCode};
use thiserror::Error;

/// Which family of template a lookup targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Level,
    Role,
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateKind::Level => write!(f, "level"),
            TemplateKind::Role => write!(f, "role model"),
        }
    }
}

/// Errors that can occur while loading a template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Missing {kind} template: {path}")]
    Missing { kind: TemplateKind, path: String },

    #[error("Error reading {kind} template {path}: {reason}")]
    Unreadable {
        kind: TemplateKind,
        path: String,
        reason: String,
    },
}

impl TemplateError {
    pub fn kind(&self) -> TemplateKind {
        match self {
            TemplateError::Missing { kind, .. } | TemplateError::Unreadable { kind, .. } => *kind,
        }
    }
}

/// Port for reading level and role templates
///
/// Templates are read on every request and never cached, so edits on disk
/// apply to the next turn.
pub trait TemplateStore: Send + Sync {
    /// Full text of the level template
    fn level_template(&self, level: LevelCode) -> Result<String, TemplateError>;

    /// Full text of the role template
    fn role_template(&self, role: RoleCode) -> Result<String, TemplateError>;
}
