//! Input validation helpers
//!
//! Text length limits for the admin and campaign forms. SQLite TEXT has
//! no built-in length enforcement.

use shared::error::{AppError, ErrorCode};

/// Account and campaign names
pub const MAX_NAME_LEN: usize = 200;

/// Coupon codes (after trimming)
pub const MAX_COUPON_CODE_LEN: usize = 64;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    validate_text_with(value, field, max_len, ErrorCode::ValidationFailed)
}

/// Same as [`validate_required_text`], reporting failures under `code`.
pub fn validate_text_with(
    value: &str,
    field: &str,
    max_len: usize,
    code: ErrorCode,
) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(
            AppError::with_message(code, format!("{field} must not be empty"))
                .with_detail("field", field),
        );
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::with_message(
            code,
            format!(
                "{field} is too long ({} chars, max {max_len})",
                trimmed.chars().count()
            ),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.trim().chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.trim().chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}
