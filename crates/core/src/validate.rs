//! Input validation shared by every handler.
//!
//! All numeric identifiers crossing the transport boundary go through
//! [`parse_positive_id`] so a non-numeric path or query id is a uniform
//! validation error instead of a 404 or a 500 somewhere deeper.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Length limits
// ---------------------------------------------------------------------------

/// Maximum group / activity / user display name length.
pub const MAX_NAME_LEN: usize = 255;
/// Maximum activity note length.
pub const MAX_NOTE_LEN: usize = 1000;

// ---------------------------------------------------------------------------
// Identifier validation
// ---------------------------------------------------------------------------

/// Parse a raw path or query identifier into a positive [`DbId`].
///
/// `field` names the parameter in the error message.
pub fn parse_positive_id(raw: &str, field: &str) -> Result<DbId, CoreError> {
    let id: DbId = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("{field} must be a positive integer")))?;
    validate_positive_id(id, field)?;
    Ok(id)
}

/// Validate an already-deserialized identifier from a request body.
pub fn validate_positive_id(id: DbId, field: &str) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::Validation(format!(
            "{field} must be a positive integer"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate a display name: non-blank and within [`MAX_NAME_LEN`].
pub fn validate_name(name: &str, field: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an optional note within [`MAX_NOTE_LEN`].
pub fn validate_note(note: Option<&str>) -> Result<(), CoreError> {
    if let Some(note) = note {
        if note.len() > MAX_NOTE_LEN {
            return Err(CoreError::Validation(format!(
                "note exceeds maximum length of {MAX_NOTE_LEN} characters"
            )));
        }
    }
    Ok(())
}

/// Validate a monetary amount: finite and non-negative.
pub fn validate_amount(amount: f64, field: &str) -> Result<(), CoreError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}
