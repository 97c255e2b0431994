//! Syntactic checks on user-provided input before it reaches the core.

use thiserror::Error;

pub const MAX_METAL_NAME_LENGTH: usize = 32;
pub const MAX_CLIENT_NAME_LENGTH: usize = 100;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid input: {0}")]
pub struct ValidationError(pub String);

/// Check that a metal path segment is plausibly a metal name: non-empty,
/// at most [`MAX_METAL_NAME_LENGTH`] bytes, ASCII letters only.
///
/// This does not check membership in the supported set; unknown but
/// well-formed names are passed on and answered with "not found".
pub fn validate_metal_name(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError("metal name must not be empty".to_string()));
    }
    if trimmed.len() > MAX_METAL_NAME_LENGTH {
        return Err(ValidationError(format!(
            "metal name exceeds maximum length of {} bytes",
            MAX_METAL_NAME_LENGTH
        )));
    }
    if !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(ValidationError(format!(
            "metal name must contain only letters: {:?}",
            trimmed
        )));
    }
    Ok(trimmed)
}

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit. The result must not be empty.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, ValidationError> {
    if input.len() > max_len {
        return Err(ValidationError(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let cleaned: String = input.chars().filter(|c| !c.is_ascii_control()).collect();
    let cleaned = cleaned.trim().to_string();
    if cleaned.is_empty() {
        return Err(ValidationError("input must not be empty".to_string()));
    }
    Ok(cleaned)
}
