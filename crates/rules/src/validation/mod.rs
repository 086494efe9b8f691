//! Structured validation of intake forms and clinical snapshots.
//!
//! Checks what the evaluator assumes but does not verify, such as field
//! presence and readings a patient can actually have. Returns a
//! [`ValidationResult`] with errors (block evaluation) and warnings (advisory,
//! surfaced with the verdict).

mod field_checks;
mod range_checks;

pub(crate) mod fuzzy;

use serde::{Deserialize, Serialize};
use std::fmt;

use stroke_core::{ClinicalSnapshot, StrokeError};

use crate::intake::VitalDefaults;
use crate::schema::IntakeForm;

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field name the error refers to, e.g. `"heart_rate"`.
    pub path: String,
    pub message: String,
    /// Optional "Did you mean …?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn error_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Convert into the evaluator's error convention.
    ///
    /// Any error yields [`StrokeError::InvalidInput`] listing every error;
    /// otherwise the warnings are handed back to the caller.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, StrokeError> {
        if self.valid {
            return Ok(self.warnings);
        }
        let details: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        Err(StrokeError::invalid(details.join("; ")))
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a submitted intake form.
///
/// When `defaults` is given, a missing vital sign it can fill in is a warning
/// rather than an error.
pub fn validate_intake(form: &IntakeForm, defaults: Option<&VitalDefaults>) -> ValidationResult {
    let mut result = ValidationResult::new();
    field_checks::validate_unknown_fields(form, &mut result);
    field_checks::validate_required(form, defaults, &mut result);
    field_checks::validate_answers(form, &mut result);
    range_checks::validate_integers(form, &mut result);
    range_checks::validate_readings(&range_checks::Readings::from(form), &mut result);
    result
}

/// Validate an already typed snapshot for physiologically impossible values.
pub fn validate_snapshot(snapshot: &ClinicalSnapshot) -> ValidationResult {
    let mut result = ValidationResult::new();
    range_checks::validate_readings(&range_checks::Readings::from(snapshot), &mut result);
    result
}

#[cfg(test)]
mod tests;
