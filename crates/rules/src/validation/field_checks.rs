//! Field presence, unknown keys, and yes/no answers.

use super::fuzzy::closest_field;
use super::ValidationResult;
use crate::intake::VitalDefaults;
use crate::schema::{IntakeForm, DEFAULTABLE_VITALS};

pub(super) fn validate_unknown_fields(form: &IntakeForm, result: &mut ValidationResult) {
    for key in form.unknown.keys() {
        match closest_field(key) {
            Some(s) => result.error_with_suggestion(
                key.as_str(),
                format!("Unknown field '{key}'"),
                format!("Did you mean '{s}'?"),
            ),
            None => result.error(key.as_str(), format!("Unknown field '{key}'")),
        }
    }
}

pub(super) fn validate_required(
    form: &IntakeForm,
    defaults: Option<&VitalDefaults>,
    result: &mut ValidationResult,
) {
    for field in form.missing_fields() {
        let default = defaults
            .filter(|_| DEFAULTABLE_VITALS.contains(&field))
            .and_then(|d| d.describe(field));
        match default {
            Some(value) => result.warn(
                field,
                format!("Missing '{field}'; substituting default {value}"),
            ),
            None => result.error(field, format!("Missing required field '{field}'")),
        }
    }
}

pub(super) fn validate_answers(form: &IntakeForm, result: &mut ValidationResult) {
    for (field, answer) in form.answers() {
        let Some(answer) = answer else { continue };
        if answer.resolve().is_none() {
            result.error(field, format!("Expected 'yes' or 'no', got '{answer}'"));
        }
    }
}
