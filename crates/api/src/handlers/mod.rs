//! HTTP handlers, one module per route group.

pub mod assets;
pub mod faults;
pub mod lots;
pub mod reference;

use assetdesk_core::error::CoreError;

use crate::error::AppError;

/// Require a non-empty, trimmed text field, rejecting with a validation
/// error naming the field otherwise.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{field} must not be empty"
        ))));
    }
    Ok(trimmed.to_string())
}
