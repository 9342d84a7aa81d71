//! Explicit field validation for boundary DTOs.
//!
//! DTO shapes declare a `validate()` function built from these checks and
//! return the full list of failures; handlers reject with a 400 before any
//! other logic runs.

use serde::Serialize;

use folio_db::EntityId;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: error.into(),
        }
    }
}

/// Require a non-empty string (ignoring surrounding whitespace).
pub fn require(field: &str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be empty"));
    }
}

/// Require a positive record id (generated ids start at 1).
pub fn require_id(field: &str, id: EntityId, errors: &mut Vec<FieldError>) {
    if id < 1 {
        errors.push(FieldError::new(field, "must be a positive id"));
    }
}

/// Require a character count within `min..=max`.
pub fn require_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
    errors: &mut Vec<FieldError>,
) {
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(FieldError::new(
            field,
            format!("must be between {min} and {max} characters"),
        ));
    }
}

/// Require a plausible email address: one `@` with non-empty local and
/// domain parts, and no whitespace.
pub fn require_email(field: &str, value: &str, errors: &mut Vec<FieldError>) {
    let mut parts = value.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    let well_formed = !local.is_empty()
        && !domain.is_empty()
        && parts.next().is_none()
        && !value.chars().any(char::is_whitespace);

    if !well_formed {
        errors.push(FieldError::new(field, "must be a valid email address"));
    }
}
