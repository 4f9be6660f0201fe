//! Validation helpers for post and comment bodies.

use crate::domain::error::DomainError;

pub const MAX_TEXT_BYTES: usize = 16 * 1024;
pub const EXCERPT_CHARS: usize = 140;

/// Validate a post or comment body: non-empty after trimming, bounded size.
pub fn validate_text(text: &str) -> Result<(), DomainError> {
    if text.trim().is_empty() {
        return Err(DomainError::validation("text must not be empty"));
    }
    if text.len() > MAX_TEXT_BYTES {
        return Err(DomainError::validation(format!(
            "text exceeds {MAX_TEXT_BYTES} bytes"
        )));
    }
    Ok(())
}

/// Validate an optional image reference: when present it must be non-empty.
pub fn validate_image(image: Option<&str>) -> Result<(), DomainError> {
    match image {
        Some(value) if value.trim().is_empty() => {
            Err(DomainError::validation("image reference must not be empty"))
        }
        _ => Ok(()),
    }
}

/// First `EXCERPT_CHARS` characters of a body, for list displays.
pub fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}…", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
