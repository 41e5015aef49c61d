//! Build Context use case.
//!
//! Looks up the level and role templates and composes the prompt for one
//! request. Template and model problems are returned as [`ContextError`]
//! instead of being folded into the prompt text.

use crate::ports::template_store::{TemplateError, TemplateStore};
use lingua_domain::{LevelCode, PromptContext, RoleCode};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that prevent a prompt from being built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Model not found: {0}, try 'pro' or 'pro_vision'")]
    UnknownModel(String),
}

/// Compose the prompt for `model` (`"pro"` or `"pro_vision"`).
///
/// The role is resolved before any template is read, so an unknown model
/// never touches the store.
pub fn build_context(
    store: &dyn TemplateStore,
    level: LevelCode,
    user_name: &str,
    user_message: &str,
    model: &str,
) -> Result<PromptContext, ContextError> {
    let role: RoleCode = model.parse().map_err(|_| {
        warn!("Model not found: {}, try 'pro' or 'pro_vision'", model);
        ContextError::UnknownModel(model.to_string())
    })?;

    let level_text = store.level_template(level).inspect_err(|e| warn!("{}", e))?;
    let role_text = store.role_template(role).inspect_err(|e| warn!("{}", e))?;

    let context = PromptContext::compose(role, &level_text, &role_text, user_name, user_message);
    debug!(
        "Built {} context for {} at {} ({} chars)",
        role,
        user_name,
        level,
        context.as_str().len()
    );
    Ok(context)
}
