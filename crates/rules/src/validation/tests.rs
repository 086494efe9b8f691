//! Tests for intake and snapshot validation.

use std::collections::BTreeMap;

use super::*;
use crate::schema::YesNoAnswer;

fn snapshot() -> ClinicalSnapshot {
    ClinicalSnapshot {
        age: 72,
        hours_since_onset: 1.5,
        imaging_confirmed: true,
        consent: true,
        nihss_score: 12,
        inr: 1.1,
        heart_rate: 76,
        respiratory_rate: 14,
        temperature: 98.2,
        oxygen_saturation: 98,
        systolic_bp: 160,
        diastolic_bp: 95,
        glucose: 145.0,
        platelet_count: 210,
        anticoagulant_risk: false,
        recent_trauma: false,
        recent_stroke_or_injury: false,
        intracranial_issue: false,
        recent_mi: false,
        recent_surgery: false,
    }
}

fn paths(errors: &[ValidationError]) -> Vec<&str> {
    errors.iter().map(|e| e.path.as_str()).collect()
}

#[test]
fn clean_snapshot_passes() {
    let result = validate_snapshot(&snapshot());
    assert!(result.valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn clean_form_passes() {
    let form = IntakeForm::from(&snapshot());
    let result = validate_intake(&form, None);
    assert!(result.valid, "{:?}", result.errors);
    assert!(result.warnings.is_empty());
}

#[test]
fn unknown_field_gets_suggestion() {
    let mut form = IntakeForm::from(&snapshot());
    form.heart_rate = None;
    form.unknown = BTreeMap::from([("heart_rte".to_string(), serde_json::json!(88))]);

    let result = validate_intake(&form, None);
    assert!(!result.valid);
    let unknown = result.errors.iter().find(|e| e.path == "heart_rte").unwrap();
    assert_eq!(unknown.suggestion.as_deref(), Some("Did you mean 'heart_rate'?"));
    assert!(paths(&result.errors).contains(&"heart_rate"));
}

#[test]
fn unknown_field_without_close_match() {
    let mut form = IntakeForm::from(&snapshot());
    form.unknown = BTreeMap::from([("favourite_colour".to_string(), serde_json::json!("blue"))]);

    let result = validate_intake(&form, None);
    assert!(!result.valid);
    assert!(result.errors[0].suggestion.is_none());
}

#[test]
fn missing_vitals_warn_when_defaults_available() {
    let mut form = IntakeForm::from(&snapshot());
    form.oxygen_saturation = None;
    form.respiratory_rate = None;

    let strict = validate_intake(&form, None);
    assert_eq!(paths(&strict.errors), vec!["respiratory_rate", "oxygen_saturation"]);

    let defaults = VitalDefaults::default();
    let lenient = validate_intake(&form, Some(&defaults));
    assert!(lenient.valid);
    assert_eq!(lenient.warnings.len(), 2);
    assert!(lenient.warnings[1].message.contains("98%"));
}

#[test]
fn missing_non_vital_is_always_an_error() {
    let mut form = IntakeForm::from(&snapshot());
    form.inr = None;
    let defaults = VitalDefaults::default();
    let result = validate_intake(&form, Some(&defaults));
    assert!(!result.valid);
    assert_eq!(paths(&result.errors), vec!["inr"]);
}

#[test]
fn invalid_yes_no_answer() {
    let mut form = IntakeForm::from(&snapshot());
    form.recent_trauma = Some(YesNoAnswer::Token("unsure".into()));
    let result = validate_intake(&form, None);
    assert_eq!(paths(&result.errors), vec!["recent_trauma"]);
    assert!(result.errors[0].message.contains("unsure"));
}

#[test]
fn negative_and_oversized_integers() {
    let mut form = IntakeForm::from(&snapshot());
    form.platelet_count = Some(-1);
    form.systolic_bp = Some(i64::from(u32::MAX) + 1);
    let result = validate_intake(&form, None);
    let p = paths(&result.errors);
    assert!(p.contains(&"platelet_count"));
    assert!(p.contains(&"systolic_bp"));
}

#[test]
fn impossible_readings_block() {
    let mut s = snapshot();
    s.oxygen_saturation = 104;
    s.glucose = -5.0;
    s.inr = f64::NAN;
    let result = validate_snapshot(&s);
    assert!(!result.valid);
    let p = paths(&result.errors);
    assert!(p.contains(&"oxygen_saturation"));
    assert!(p.contains(&"glucose"));
    assert!(p.contains(&"inr"));
}

#[test]
fn implausible_readings_only_warn() {
    let mut s = snapshot();
    s.temperature = 37.0;
    s.age = 130;
    s.nihss_score = 50;
    s.diastolic_bp = 170;
    let result = validate_snapshot(&s);
    assert!(result.valid);
    let warned: Vec<&str> = result.warnings.iter().map(|w| w.path.as_str()).collect();
    assert_eq!(warned, vec!["age", "nihss_score", "temperature", "diastolic_bp"]);
    assert!(result.warnings[2].message.contains("Celsius"));
}

#[test]
fn into_result_lists_every_error() {
    let mut form = IntakeForm::from(&snapshot());
    form.age = None;
    form.glucose = None;
    let err = validate_intake(&form, None).into_result().unwrap_err();
    assert!(err.is_invalid_input());
    let message = err.to_string();
    assert!(message.contains("age: Missing required field 'age'"));
    assert!(message.contains("glucose: Missing required field 'glucose'"));
}

#[test]
fn into_result_returns_warnings_when_valid() {
    let mut s = snapshot();
    s.heart_rate = 320;
    let warnings = validate_snapshot(&s).into_result().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].path, "heart_rate");
}
