//! The ordered guard table.
//!
//! Each entry pairs a disqualifying predicate with the reason reported when it
//! holds. Table position is precedence: when several conditions are present at
//! once, the earliest entry's reason is the one reported.

use std::ops::RangeInclusive;

use stroke_core::ClinicalSnapshot;

use crate::schema::{GuardId, ProtocolStage};

pub const ONSET_WINDOW_HOURS: f64 = 4.5;
pub const MIN_AGE: u32 = 18;
pub const MIN_NIHSS: u32 = 4;
pub const MAX_INR: f64 = 1.7;
pub const HEART_RATE_RANGE: RangeInclusive<u32> = 60..=100;
pub const RESPIRATORY_RATE_RANGE: RangeInclusive<u32> = 12..=20;
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 97.0..=100.4;
pub const OXYGEN_SATURATION_RANGE: RangeInclusive<u32> = 95..=100;
pub const MAX_SYSTOLIC_BP: u32 = 185;
pub const MAX_DIASTOLIC_BP: u32 = 110;
pub const GLUCOSE_RANGE: RangeInclusive<f64> = 50.0..=400.0;
pub const MIN_PLATELET_COUNT: u32 = 100;

/// One disqualifying check.
#[derive(Debug, Clone, Copy)]
pub struct Guard {
    pub id: GuardId,
    pub stage: ProtocolStage,
    pub reason: &'static str,
    check: fn(&ClinicalSnapshot) -> bool,
}

impl Guard {
    /// True when this guard rules the patient out.
    pub fn disqualifies(&self, snapshot: &ClinicalSnapshot) -> bool {
        (self.check)(snapshot)
    }
}

static PROTOCOL: [Guard; 19] = [
    Guard {
        id: GuardId::OnsetWindow,
        stage: ProtocolStage::InitialAssessment,
        reason: "beyond 4.5-hour treatment window",
        check: beyond_onset_window,
    },
    Guard {
        id: GuardId::Imaging,
        stage: ProtocolStage::InitialAssessment,
        reason: "ischemic stroke not confirmed by neuroimaging",
        check: imaging_unconfirmed,
    },
    Guard {
        id: GuardId::Consent,
        stage: ProtocolStage::InitialAssessment,
        reason: "informed consent not obtained",
        check: consent_missing,
    },
    Guard {
        id: GuardId::Age,
        stage: ProtocolStage::Inclusion,
        reason: "under 18 years old",
        check: underage,
    },
    Guard {
        id: GuardId::Nihss,
        stage: ProtocolStage::Inclusion,
        reason: "NIHSS score below minimum threshold",
        check: nihss_too_low,
    },
    Guard {
        id: GuardId::Inr,
        stage: ProtocolStage::Inclusion,
        reason: "INR exceeds safe threshold (> 1.7)",
        check: inr_too_high,
    },
    Guard {
        id: GuardId::HeartRate,
        stage: ProtocolStage::VitalSigns,
        reason: "abnormal heart rate outside 60–100 bpm",
        check: heart_rate_abnormal,
    },
    Guard {
        id: GuardId::RespiratoryRate,
        stage: ProtocolStage::VitalSigns,
        reason: "abnormal respiratory rate outside 12–20/min",
        check: respiratory_rate_abnormal,
    },
    Guard {
        id: GuardId::Temperature,
        stage: ProtocolStage::VitalSigns,
        reason: "abnormal temperature outside 97–100.4°F",
        check: temperature_abnormal,
    },
    Guard {
        id: GuardId::OxygenSaturation,
        stage: ProtocolStage::VitalSigns,
        reason: "oxygen saturation below 95%",
        check: oxygen_saturation_abnormal,
    },
    Guard {
        id: GuardId::RecentTrauma,
        stage: ProtocolStage::Exclusion,
        reason: "recent head/spinal trauma within 3 months",
        check: |s| s.recent_trauma,
    },
    Guard {
        id: GuardId::RecentStrokeOrInjury,
        stage: ProtocolStage::Exclusion,
        reason: "history of stroke/serious head injury within 3 months",
        check: |s| s.recent_stroke_or_injury,
    },
    Guard {
        id: GuardId::IntracranialIssue,
        stage: ProtocolStage::Exclusion,
        reason: "intracranial hemorrhage/tumor/vascular malformation present",
        check: |s| s.intracranial_issue,
    },
    Guard {
        id: GuardId::RecentMi,
        stage: ProtocolStage::Exclusion,
        reason: "recent myocardial infarction",
        check: |s| s.recent_mi,
    },
    Guard {
        id: GuardId::BloodPressure,
        stage: ProtocolStage::Exclusion,
        reason: "blood pressure exceeds safe threshold",
        check: blood_pressure_too_high,
    },
    Guard {
        id: GuardId::Glucose,
        stage: ProtocolStage::Exclusion,
        reason: "glucose outside acceptable range",
        check: glucose_out_of_range,
    },
    Guard {
        id: GuardId::Anticoagulant,
        stage: ProtocolStage::Exclusion,
        reason: "anticoagulant use with elevated INR risk",
        check: |s| s.anticoagulant_risk,
    },
    Guard {
        id: GuardId::Platelets,
        stage: ProtocolStage::Exclusion,
        reason: "platelet count below safe minimum",
        check: platelets_too_low,
    },
    Guard {
        id: GuardId::RecentSurgery,
        stage: ProtocolStage::Exclusion,
        reason: "recent surgery/biopsy of parenchymal organ",
        check: |s| s.recent_surgery,
    },
];

/// The full protocol, in evaluation order.
pub fn protocol() -> &'static [Guard] {
    &PROTOCOL
}

/// Look up a guard by id.
pub fn guard(id: GuardId) -> Option<&'static Guard> {
    PROTOCOL.iter().find(|g| g.id == id)
}

/// 1-based position of a guard in the protocol.
pub fn position(id: GuardId) -> Option<usize> {
    PROTOCOL.iter().position(|g| g.id == id).map(|i| i + 1)
}

// ── Predicates ──────────────────────────────────────────────────────

fn beyond_onset_window(s: &ClinicalSnapshot) -> bool {
    s.hours_since_onset > ONSET_WINDOW_HOURS
}

fn imaging_unconfirmed(s: &ClinicalSnapshot) -> bool {
    !s.imaging_confirmed
}

fn consent_missing(s: &ClinicalSnapshot) -> bool {
    !s.consent
}

fn underage(s: &ClinicalSnapshot) -> bool {
    s.age < MIN_AGE
}

fn nihss_too_low(s: &ClinicalSnapshot) -> bool {
    s.nihss_score < MIN_NIHSS
}

fn inr_too_high(s: &ClinicalSnapshot) -> bool {
    s.inr > MAX_INR
}

fn heart_rate_abnormal(s: &ClinicalSnapshot) -> bool {
    !HEART_RATE_RANGE.contains(&s.heart_rate)
}

fn respiratory_rate_abnormal(s: &ClinicalSnapshot) -> bool {
    !RESPIRATORY_RATE_RANGE.contains(&s.respiratory_rate)
}

fn temperature_abnormal(s: &ClinicalSnapshot) -> bool {
    !TEMPERATURE_RANGE.contains(&s.temperature)
}

fn oxygen_saturation_abnormal(s: &ClinicalSnapshot) -> bool {
    !OXYGEN_SATURATION_RANGE.contains(&s.oxygen_saturation)
}

fn blood_pressure_too_high(s: &ClinicalSnapshot) -> bool {
    s.systolic_bp > MAX_SYSTOLIC_BP || s.diastolic_bp > MAX_DIASTOLIC_BP
}

fn glucose_out_of_range(s: &ClinicalSnapshot) -> bool {
    !GLUCOSE_RANGE.contains(&s.glucose)
}

fn platelets_too_low(s: &ClinicalSnapshot) -> bool {
    s.platelet_count < MIN_PLATELET_COUNT
}
