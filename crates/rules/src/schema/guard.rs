//! Guard identifiers and protocol stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of one disqualifying check in the screening protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardId {
    OnsetWindow,
    Imaging,
    Consent,
    Age,
    Nihss,
    Inr,
    HeartRate,
    RespiratoryRate,
    Temperature,
    OxygenSaturation,
    RecentTrauma,
    RecentStrokeOrInjury,
    IntracranialIssue,
    RecentMi,
    BloodPressure,
    Glucose,
    Anticoagulant,
    Platelets,
    RecentSurgery,
}

impl GuardId {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardId::OnsetWindow => "onset_window",
            GuardId::Imaging => "imaging",
            GuardId::Consent => "consent",
            GuardId::Age => "age",
            GuardId::Nihss => "nihss",
            GuardId::Inr => "inr",
            GuardId::HeartRate => "heart_rate",
            GuardId::RespiratoryRate => "respiratory_rate",
            GuardId::Temperature => "temperature",
            GuardId::OxygenSaturation => "oxygen_saturation",
            GuardId::RecentTrauma => "recent_trauma",
            GuardId::RecentStrokeOrInjury => "recent_stroke_or_injury",
            GuardId::IntracranialIssue => "intracranial_issue",
            GuardId::RecentMi => "recent_mi",
            GuardId::BloodPressure => "blood_pressure",
            GuardId::Glucose => "glucose",
            GuardId::Anticoagulant => "anticoagulant",
            GuardId::Platelets => "platelets",
            GuardId::RecentSurgery => "recent_surgery",
        }
    }
}

impl fmt::Display for GuardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuardId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "onset_window" => Ok(GuardId::OnsetWindow),
            "imaging" => Ok(GuardId::Imaging),
            "consent" => Ok(GuardId::Consent),
            "age" => Ok(GuardId::Age),
            "nihss" => Ok(GuardId::Nihss),
            "inr" => Ok(GuardId::Inr),
            "heart_rate" => Ok(GuardId::HeartRate),
            "respiratory_rate" => Ok(GuardId::RespiratoryRate),
            "temperature" => Ok(GuardId::Temperature),
            "oxygen_saturation" => Ok(GuardId::OxygenSaturation),
            "recent_trauma" => Ok(GuardId::RecentTrauma),
            "recent_stroke_or_injury" => Ok(GuardId::RecentStrokeOrInjury),
            "intracranial_issue" => Ok(GuardId::IntracranialIssue),
            "recent_mi" => Ok(GuardId::RecentMi),
            "blood_pressure" => Ok(GuardId::BloodPressure),
            "glucose" => Ok(GuardId::Glucose),
            "anticoagulant" => Ok(GuardId::Anticoagulant),
            "platelets" => Ok(GuardId::Platelets),
            "recent_surgery" => Ok(GuardId::RecentSurgery),
            other => Err(format!("unknown guard: '{}'", other)),
        }
    }
}

/// Section of the protocol a guard belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolStage {
    /// Treatment window, imaging, consent.
    InitialAssessment,
    /// Age, stroke severity, coagulation.
    Inclusion,
    VitalSigns,
    /// Contraindications from history, labs, and blood pressure.
    Exclusion,
}

impl fmt::Display for ProtocolStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolStage::InitialAssessment => write!(f, "initial_assessment"),
            ProtocolStage::Inclusion => write!(f, "inclusion"),
            ProtocolStage::VitalSigns => write!(f, "vital_signs"),
            ProtocolStage::Exclusion => write!(f, "exclusion"),
        }
    }
}

impl FromStr for ProtocolStage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "initial_assessment" => Ok(ProtocolStage::InitialAssessment),
            "inclusion" => Ok(ProtocolStage::Inclusion),
            "vital_signs" => Ok(ProtocolStage::VitalSigns),
            "exclusion" => Ok(ProtocolStage::Exclusion),
            other => Err(format!("unknown protocol stage: '{}'", other)),
        }
    }
}
