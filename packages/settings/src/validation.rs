// ABOUTME: Sanitation and validation for settings values
// ABOUTME: Baseline text cleaning plus per-field validator functions

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::FieldDefinition;

/// A user-facing problem with one submitted value
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validator run on an already sanitized value.
///
/// Validators only report; they never rewrite the value.
pub type Validator = fn(&FieldDefinition, &str) -> Result<(), ValidationError>;

/// Result of validating one raw value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validated {
    /// Sanitized value, returned whether or not validation passed
    pub value: String,
    pub errors: Vec<ValidationError>,
}

impl Validated {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Clean a raw value for storage in a plain text field.
///
/// Drops control characters (tabs and line breaks included) and trims
/// surrounding whitespace. Interior spacing and angle-bracket text are kept
/// as entered.
pub fn sanitize_text_field(raw: &str) -> String {
    let printable: String = raw.chars().filter(|c| !c.is_control()).collect();
    printable.trim().to_string()
}

/// Reject an empty value, citing the field's display title
pub fn validate_required_field(field: &FieldDefinition, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(
            &field.key,
            format!("Error: You must enter {}.", field.title),
        ));
    }

    Ok(())
}
