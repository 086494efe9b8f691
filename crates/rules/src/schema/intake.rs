//! Loosely typed intake form as submitted with a scan upload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use stroke_core::{parse_yes_no, ClinicalSnapshot};

/// A yes/no answer as it arrives: either a native boolean or a free-text token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YesNoAnswer {
    Flag(bool),
    Token(String),
}

impl YesNoAnswer {
    /// `None` when the token is neither yes nor no.
    pub fn resolve(&self) -> Option<bool> {
        match self {
            YesNoAnswer::Flag(flag) => Some(*flag),
            YesNoAnswer::Token(token) => parse_yes_no(token),
        }
    }
}

impl From<bool> for YesNoAnswer {
    fn from(flag: bool) -> Self {
        YesNoAnswer::Token(if flag { "yes" } else { "no" }.to_string())
    }
}

impl fmt::Display for YesNoAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YesNoAnswer::Flag(flag) => write!(f, "{flag}"),
            YesNoAnswer::Token(token) => write!(f, "{token}"),
        }
    }
}

/// Vital signs the intake layer may fill in when the form leaves them blank.
pub const DEFAULTABLE_VITALS: &[&str] = &[
    "heart_rate",
    "respiratory_rate",
    "temperature",
    "oxygen_saturation",
];

/// Intake form with every clinical field optional.
///
/// Integers are signed so out-of-range entries (e.g. a negative age) reach
/// validation and get a precise message instead of a parse failure.
/// Keys that match no field are kept in `unknown` for reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntakeForm {
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub hours_since_onset: Option<f64>,
    #[serde(default)]
    pub imaging_confirmed: Option<YesNoAnswer>,
    #[serde(default)]
    pub consent: Option<YesNoAnswer>,
    #[serde(default, alias = "nhiss_score")]
    pub nihss_score: Option<i64>,
    #[serde(default)]
    pub inr: Option<f64>,
    #[serde(default)]
    pub heart_rate: Option<i64>,
    #[serde(default)]
    pub respiratory_rate: Option<i64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub oxygen_saturation: Option<i64>,
    #[serde(default)]
    pub systolic_bp: Option<i64>,
    #[serde(default)]
    pub diastolic_bp: Option<i64>,
    #[serde(default)]
    pub glucose: Option<f64>,
    #[serde(default)]
    pub platelet_count: Option<i64>,
    #[serde(default)]
    pub anticoagulant_risk: Option<YesNoAnswer>,
    #[serde(default)]
    pub recent_trauma: Option<YesNoAnswer>,
    #[serde(default)]
    pub recent_stroke_or_injury: Option<YesNoAnswer>,
    #[serde(default)]
    pub intracranial_issue: Option<YesNoAnswer>,
    #[serde(default)]
    pub recent_mi: Option<YesNoAnswer>,
    #[serde(default)]
    pub recent_surgery: Option<YesNoAnswer>,
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

impl IntakeForm {
    /// Presence of each field, in snapshot field order.
    pub fn presence(&self) -> [(&'static str, bool); 20] {
        [
            ("age", self.age.is_some()),
            ("hours_since_onset", self.hours_since_onset.is_some()),
            ("imaging_confirmed", self.imaging_confirmed.is_some()),
            ("consent", self.consent.is_some()),
            ("nihss_score", self.nihss_score.is_some()),
            ("inr", self.inr.is_some()),
            ("heart_rate", self.heart_rate.is_some()),
            ("respiratory_rate", self.respiratory_rate.is_some()),
            ("temperature", self.temperature.is_some()),
            ("oxygen_saturation", self.oxygen_saturation.is_some()),
            ("systolic_bp", self.systolic_bp.is_some()),
            ("diastolic_bp", self.diastolic_bp.is_some()),
            ("glucose", self.glucose.is_some()),
            ("platelet_count", self.platelet_count.is_some()),
            ("anticoagulant_risk", self.anticoagulant_risk.is_some()),
            ("recent_trauma", self.recent_trauma.is_some()),
            ("recent_stroke_or_injury", self.recent_stroke_or_injury.is_some()),
            ("intracranial_issue", self.intracranial_issue.is_some()),
            ("recent_mi", self.recent_mi.is_some()),
            ("recent_surgery", self.recent_surgery.is_some()),
        ]
    }

    /// Names of fields left blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.presence()
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }

    /// Yes/no answers paired with their field names.
    pub fn answers(&self) -> [(&'static str, Option<&YesNoAnswer>); 8] {
        [
            ("imaging_confirmed", self.imaging_confirmed.as_ref()),
            ("consent", self.consent.as_ref()),
            ("anticoagulant_risk", self.anticoagulant_risk.as_ref()),
            ("recent_trauma", self.recent_trauma.as_ref()),
            ("recent_stroke_or_injury", self.recent_stroke_or_injury.as_ref()),
            ("intracranial_issue", self.intracranial_issue.as_ref()),
            ("recent_mi", self.recent_mi.as_ref()),
            ("recent_surgery", self.recent_surgery.as_ref()),
        ]
    }

    /// Integer entries paired with their field names.
    pub fn integers(&self) -> [(&'static str, Option<i64>); 8] {
        [
            ("age", self.age),
            ("nihss_score", self.nihss_score),
            ("heart_rate", self.heart_rate),
            ("respiratory_rate", self.respiratory_rate),
            ("oxygen_saturation", self.oxygen_saturation),
            ("systolic_bp", self.systolic_bp),
            ("diastolic_bp", self.diastolic_bp),
            ("platelet_count", self.platelet_count),
        ]
    }
}

impl From<&ClinicalSnapshot> for IntakeForm {
    fn from(s: &ClinicalSnapshot) -> Self {
        Self {
            age: Some(i64::from(s.age)),
            hours_since_onset: Some(s.hours_since_onset),
            imaging_confirmed: Some(s.imaging_confirmed.into()),
            consent: Some(s.consent.into()),
            nihss_score: Some(i64::from(s.nihss_score)),
            inr: Some(s.inr),
            heart_rate: Some(i64::from(s.heart_rate)),
            respiratory_rate: Some(i64::from(s.respiratory_rate)),
            temperature: Some(s.temperature),
            oxygen_saturation: Some(i64::from(s.oxygen_saturation)),
            systolic_bp: Some(i64::from(s.systolic_bp)),
            diastolic_bp: Some(i64::from(s.diastolic_bp)),
            glucose: Some(s.glucose),
            platelet_count: Some(i64::from(s.platelet_count)),
            anticoagulant_risk: Some(s.anticoagulant_risk.into()),
            recent_trauma: Some(s.recent_trauma.into()),
            recent_stroke_or_injury: Some(s.recent_stroke_or_injury.into()),
            intracranial_issue: Some(s.intracranial_issue.into()),
            recent_mi: Some(s.recent_mi.into()),
            recent_surgery: Some(s.recent_surgery.into()),
            unknown: BTreeMap::new(),
        }
    }
}
