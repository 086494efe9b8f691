//! Numeric range checks: impossible values block, implausible ones warn.

use stroke_core::ClinicalSnapshot;

use super::ValidationResult;
use crate::schema::IntakeForm;

/// NIHSS maximum total score.
const NIHSS_MAX: f64 = 42.0;

/// The numeric readings both an intake form and a snapshot carry.
pub(super) struct Readings {
    age: Option<f64>,
    hours_since_onset: Option<f64>,
    nihss_score: Option<f64>,
    inr: Option<f64>,
    heart_rate: Option<f64>,
    temperature: Option<f64>,
    oxygen_saturation: Option<f64>,
    systolic_bp: Option<f64>,
    diastolic_bp: Option<f64>,
    glucose: Option<f64>,
}

impl From<&IntakeForm> for Readings {
    fn from(f: &IntakeForm) -> Self {
        let int = |v: Option<i64>| v.map(|n| n as f64);
        Self {
            age: int(f.age),
            hours_since_onset: f.hours_since_onset,
            nihss_score: int(f.nihss_score),
            inr: f.inr,
            heart_rate: int(f.heart_rate),
            temperature: f.temperature,
            oxygen_saturation: int(f.oxygen_saturation),
            systolic_bp: int(f.systolic_bp),
            diastolic_bp: int(f.diastolic_bp),
            glucose: f.glucose,
        }
    }
}

impl From<&ClinicalSnapshot> for Readings {
    fn from(s: &ClinicalSnapshot) -> Self {
        Self {
            age: Some(f64::from(s.age)),
            hours_since_onset: Some(s.hours_since_onset),
            nihss_score: Some(f64::from(s.nihss_score)),
            inr: Some(s.inr),
            heart_rate: Some(f64::from(s.heart_rate)),
            temperature: Some(s.temperature),
            oxygen_saturation: Some(f64::from(s.oxygen_saturation)),
            systolic_bp: Some(f64::from(s.systolic_bp)),
            diastolic_bp: Some(f64::from(s.diastolic_bp)),
            glucose: Some(s.glucose),
        }
    }
}

/// Integer form entries must fit the snapshot's unsigned fields.
pub(super) fn validate_integers(form: &IntakeForm, result: &mut ValidationResult) {
    for (field, value) in form.integers() {
        let Some(value) = value else { continue };
        if value < 0 {
            result.error(field, format!("'{field}' must not be negative, got {value}"));
        } else if value > i64::from(u32::MAX) {
            result.error(field, format!("'{field}' is out of range, got {value}"));
        }
    }
}

pub(super) fn validate_readings(r: &Readings, result: &mut ValidationResult) {
    // ── Blocking ────────────────────────────────────────────────
    for (field, value) in [
        ("hours_since_onset", r.hours_since_onset),
        ("inr", r.inr),
        ("temperature", r.temperature),
        ("glucose", r.glucose),
    ] {
        let Some(value) = value else { continue };
        if !value.is_finite() {
            result.error(field, format!("'{field}' must be a finite number, got {value}"));
        } else if value < 0.0 && field != "temperature" {
            result.error(field, format!("'{field}' must not be negative, got {value}"));
        }
    }

    if let Some(spo2) = r.oxygen_saturation {
        if spo2 > 100.0 {
            result.error(
                "oxygen_saturation",
                format!("Oxygen saturation is a percentage, got {spo2}"),
            );
        }
    }

    // ── Advisory ────────────────────────────────────────────────
    if let Some(age) = r.age {
        if age > 120.0 {
            result.warn("age", format!("Age {age} is implausible"));
        }
    }

    if let Some(hours) = r.hours_since_onset {
        if hours.is_finite() && hours > 72.0 {
            result.warn(
                "hours_since_onset",
                format!("{hours} hours since onset; check the onset time"),
            );
        }
    }

    if let Some(nihss) = r.nihss_score {
        if nihss > NIHSS_MAX {
            result.warn("nihss_score", format!("NIHSS {nihss} exceeds the scale maximum of 42"));
        }
    }

    if let Some(rate) = r.heart_rate {
        if rate > 300.0 {
            result.warn("heart_rate", format!("Heart rate {rate} bpm is implausible"));
        }
    }

    if let Some(temp) = r.temperature {
        if temp.is_finite() && temp < 50.0 {
            result.warn(
                "temperature",
                format!("Temperature {temp} looks like Celsius; readings are expected in °F"),
            );
        }
    }

    if let (Some(systolic), Some(diastolic)) = (r.systolic_bp, r.diastolic_bp) {
        if diastolic >= systolic {
            result.warn(
                "diastolic_bp",
                format!("Diastolic {diastolic} is not below systolic {systolic}; check for swapped values"),
            );
        }
    }
}
