//! Intake resolution: turns a submitted form into a [`ClinicalSnapshot`].
//!
//! This is the only place missing vital signs may be filled in with defaults.
//! Every substitution is logged and reported back so a defaulted reading is
//! never mistaken for a measured one.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::warn;

use stroke_core::config::IntakeConfig;
use stroke_core::{ClinicalSnapshot, StrokeError};

use crate::schema::{IntakeForm, YesNoAnswer};
use crate::validation::{validate_intake, ValidationWarning};

/// Values assumed for vital signs the form leaves blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalDefaults {
    pub heart_rate: u32,
    pub respiratory_rate: u32,
    pub temperature: f64,
    pub oxygen_saturation: u32,
}

impl Default for VitalDefaults {
    fn default() -> Self {
        Self {
            heart_rate: 80,
            respiratory_rate: 16,
            temperature: 98.6,
            oxygen_saturation: 98,
        }
    }
}

impl From<&IntakeConfig> for VitalDefaults {
    fn from(config: &IntakeConfig) -> Self {
        Self {
            heart_rate: config.default_heart_rate,
            respiratory_rate: config.default_respiratory_rate,
            temperature: config.default_temperature,
            oxygen_saturation: config.default_oxygen_saturation,
        }
    }
}

impl VitalDefaults {
    /// Human-readable default for a field, `None` if the field has no default.
    pub(crate) fn describe(&self, field: &str) -> Option<String> {
        match field {
            "heart_rate" => Some(format!("{} bpm", self.heart_rate)),
            "respiratory_rate" => Some(format!("{}/min", self.respiratory_rate)),
            "temperature" => Some(format!("{}°F", self.temperature)),
            "oxygen_saturation" => Some(format!("{}%", self.oxygen_saturation)),
            _ => None,
        }
    }
}

/// A snapshot built from a form, plus what it took to build it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIntake {
    pub snapshot: ClinicalSnapshot,
    /// Fields filled from [`VitalDefaults`] rather than the form.
    pub substituted: Vec<&'static str>,
    pub warnings: Vec<ValidationWarning>,
}

/// Validate a form and build the snapshot the evaluator consumes.
///
/// Without `defaults`, any blank field is [`StrokeError::InvalidInput`].
pub fn resolve_intake(
    form: &IntakeForm,
    defaults: Option<&VitalDefaults>,
) -> Result<ResolvedIntake, StrokeError> {
    let warnings = validate_intake(form, defaults).into_result()?;
    let mut substituted = Vec::new();

    let heart_rate = match form.heart_rate {
        Some(v) => unsigned("heart_rate", Some(v))?,
        None => defaulted("heart_rate", defaults.map(|d| d.heart_rate), &mut substituted)?,
    };
    let respiratory_rate = match form.respiratory_rate {
        Some(v) => unsigned("respiratory_rate", Some(v))?,
        None => defaulted(
            "respiratory_rate",
            defaults.map(|d| d.respiratory_rate),
            &mut substituted,
        )?,
    };
    let temperature = match form.temperature {
        Some(v) => v,
        None => defaulted("temperature", defaults.map(|d| d.temperature), &mut substituted)?,
    };
    let oxygen_saturation = match form.oxygen_saturation {
        Some(v) => unsigned("oxygen_saturation", Some(v))?,
        None => defaulted(
            "oxygen_saturation",
            defaults.map(|d| d.oxygen_saturation),
            &mut substituted,
        )?,
    };

    let snapshot = ClinicalSnapshot {
        age: unsigned("age", form.age)?,
        hours_since_onset: required("hours_since_onset", form.hours_since_onset)?,
        imaging_confirmed: answer("imaging_confirmed", form.imaging_confirmed.as_ref())?,
        consent: answer("consent", form.consent.as_ref())?,
        nihss_score: unsigned("nihss_score", form.nihss_score)?,
        inr: required("inr", form.inr)?,
        heart_rate,
        respiratory_rate,
        temperature,
        oxygen_saturation,
        systolic_bp: unsigned("systolic_bp", form.systolic_bp)?,
        diastolic_bp: unsigned("diastolic_bp", form.diastolic_bp)?,
        glucose: required("glucose", form.glucose)?,
        platelet_count: unsigned("platelet_count", form.platelet_count)?,
        anticoagulant_risk: answer("anticoagulant_risk", form.anticoagulant_risk.as_ref())?,
        recent_trauma: answer("recent_trauma", form.recent_trauma.as_ref())?,
        recent_stroke_or_injury: answer(
            "recent_stroke_or_injury",
            form.recent_stroke_or_injury.as_ref(),
        )?,
        intracranial_issue: answer("intracranial_issue", form.intracranial_issue.as_ref())?,
        recent_mi: answer("recent_mi", form.recent_mi.as_ref())?,
        recent_surgery: answer("recent_surgery", form.recent_surgery.as_ref())?,
    };

    Ok(ResolvedIntake {
        snapshot,
        substituted,
        warnings,
    })
}

// ── Field helpers ───────────────────────────────────────────────────

fn required<T>(field: &str, value: Option<T>) -> Result<T, StrokeError> {
    value.ok_or_else(|| StrokeError::invalid(format!("{field}: Missing required field '{field}'")))
}

fn unsigned(field: &str, value: Option<i64>) -> Result<u32, StrokeError> {
    let value = required(field, value)?;
    u32::try_from(value)
        .map_err(|_| StrokeError::invalid(format!("{field}: '{field}' is out of range, got {value}")))
}

fn answer(field: &str, value: Option<&YesNoAnswer>) -> Result<bool, StrokeError> {
    let value = required(field, value)?;
    value.resolve().ok_or_else(|| {
        StrokeError::invalid(format!("{field}: Expected 'yes' or 'no', got '{value}'"))
    })
}

fn defaulted<T: Display>(
    field: &'static str,
    default: Option<T>,
    substituted: &mut Vec<&'static str>,
) -> Result<T, StrokeError> {
    let value = required(field, default)?;
    warn!(field, value = %value, "vital sign missing from intake, substituting default");
    substituted.push(field);
    Ok(value)
}
