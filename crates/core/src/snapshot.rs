//! Clinical snapshot: the flat record of facts a screening decision is made on.

use serde::{Deserialize, Serialize};

use crate::error::StrokeError;

/// Every field name of a [`ClinicalSnapshot`], in declaration order.
pub const SNAPSHOT_FIELDS: &[&str] = &[
    "age",
    "hours_since_onset",
    "imaging_confirmed",
    "consent",
    "nihss_score",
    "inr",
    "heart_rate",
    "respiratory_rate",
    "temperature",
    "oxygen_saturation",
    "systolic_bp",
    "diastolic_bp",
    "glucose",
    "platelet_count",
    "anticoagulant_risk",
    "recent_trauma",
    "recent_stroke_or_injury",
    "intracranial_issue",
    "recent_mi",
    "recent_surgery",
];

/// Clinical facts collected up to the moment of evaluation.
///
/// Yes/no answers are plain `bool`s in memory and `"yes"` / `"no"` on the wire.
/// The record is built fresh for every evaluation and never mutated by the
/// evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClinicalSnapshot {
    /// Years.
    pub age: u32,
    /// Hours from symptom onset to evaluation.
    pub hours_since_onset: f64,
    /// Neuroimaging confirms ischemic stroke.
    #[serde(with = "yes_no")]
    pub imaging_confirmed: bool,
    /// Informed consent obtained from patient or representative.
    #[serde(with = "yes_no")]
    pub consent: bool,
    #[serde(alias = "nhiss_score")]
    pub nihss_score: u32,
    pub inr: f64,
    /// Beats per minute.
    pub heart_rate: u32,
    /// Breaths per minute.
    pub respiratory_rate: u32,
    /// Degrees Fahrenheit.
    pub temperature: f64,
    /// Percent.
    pub oxygen_saturation: u32,
    /// mmHg.
    pub systolic_bp: u32,
    /// mmHg.
    pub diastolic_bp: u32,
    /// mg/dL.
    pub glucose: f64,
    /// Thousands per microlitre.
    pub platelet_count: u32,
    #[serde(with = "yes_no")]
    pub anticoagulant_risk: bool,
    /// Head or spinal trauma within 3 months.
    #[serde(with = "yes_no")]
    pub recent_trauma: bool,
    /// Prior stroke or serious head injury within 3 months.
    #[serde(with = "yes_no")]
    pub recent_stroke_or_injury: bool,
    /// Intracranial hemorrhage, tumor, or vascular malformation.
    #[serde(with = "yes_no")]
    pub intracranial_issue: bool,
    /// Recent myocardial infarction.
    #[serde(with = "yes_no")]
    pub recent_mi: bool,
    /// Recent surgery or biopsy of a parenchymal organ.
    #[serde(with = "yes_no")]
    pub recent_surgery: bool,
}

impl ClinicalSnapshot {
    /// Real-valued fields paired with their names.
    pub fn real_fields(&self) -> [(&'static str, f64); 4] {
        [
            ("hours_since_onset", self.hours_since_onset),
            ("inr", self.inr),
            ("temperature", self.temperature),
            ("glucose", self.glucose),
        ]
    }

    /// Reject values the numeric types admit but no reading can take.
    ///
    /// A NaN compares false against every threshold, so it would pass each
    /// guard unnoticed. Negative elapsed time, INR or glucose are equally
    /// meaningless.
    pub fn check_well_formed(&self) -> Result<(), StrokeError> {
        for (name, value) in self.real_fields() {
            if !value.is_finite() {
                return Err(StrokeError::invalid(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("hours_since_onset", self.hours_since_onset),
            ("inr", self.inr),
            ("glucose", self.glucose),
        ] {
            if value < 0.0 {
                return Err(StrokeError::invalid(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Parse a yes/no token, ignoring case and surrounding whitespace.
pub fn parse_yes_no(token: &str) -> Option<bool> {
    let token = token.trim();
    if token.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if token.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// Serde adapter for `bool` fields carried as `"yes"` / `"no"`.
///
/// Deserialization also accepts a native boolean.
pub mod yes_no {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "yes" } else { "no" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Token(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(flag) => Ok(flag),
            Raw::Token(token) => super::parse_yes_no(&token).ok_or_else(|| {
                D::Error::custom(format!("expected \"yes\" or \"no\", got \"{token}\""))
            }),
        }
    }
}
