//! tPA eligibility evaluator.
//!
//! Walks the guard table in order and stops at the first guard that
//! disqualifies the patient. The reason of that guard becomes the verdict's
//! reason; when no guard fires the patient is eligible.
//!
//! The evaluator is a pure function of its input: no clock, no I/O, no
//! shared state. It can be called from any number of threads at once.

mod guards;


use serde::{Deserialize, Serialize};
use tracing::debug;

use stroke_core::{ClinicalSnapshot, EligibilityVerdict, StrokeError};

use crate::schema::GuardId;

pub use guards::{
    guard, position, protocol, Guard, GLUCOSE_RANGE, HEART_RATE_RANGE, MAX_DIASTOLIC_BP,
    MAX_INR, MAX_SYSTOLIC_BP, MIN_AGE, MIN_NIHSS, MIN_PLATELET_COUNT, ONSET_WINDOW_HOURS,
    OXYGEN_SATURATION_RANGE, RESPIRATORY_RATE_RANGE, TEMPERATURE_RANGE,
};

// ── Assessment ──────────────────────────────────────────────────────

/// A verdict together with the guard that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(flatten)]
    pub verdict: EligibilityVerdict,
    /// `None` exactly when the verdict is eligible.
    pub triggered: Option<GuardId>,
}

// ── Evaluator ───────────────────────────────────────────────────────

/// Evaluates clinical snapshots against the thrombolysis protocol.
pub struct EligibilityEvaluator;

impl EligibilityEvaluator {
    /// Decide eligibility for one snapshot.
    ///
    /// Fails only with [`StrokeError::InvalidInput`] when a real-valued field
    /// is NaN/infinite or negative where no reading can be.
    pub fn evaluate(snapshot: &ClinicalSnapshot) -> Result<EligibilityVerdict, StrokeError> {
        Self::assess(snapshot).map(|a| a.verdict)
    }

    /// Like [`evaluate`](Self::evaluate), also reporting which guard fired.
    pub fn assess(snapshot: &ClinicalSnapshot) -> Result<Assessment, StrokeError> {
        snapshot.check_well_formed()?;

        match protocol().iter().find(|g| g.disqualifies(snapshot)) {
            Some(guard) => {
                debug!(guard = %guard.id, stage = %guard.stage, "guard fired");
                Ok(Assessment {
                    verdict: EligibilityVerdict::ineligible(guard.reason),
                    triggered: Some(guard.id),
                })
            }
            None => Ok(Assessment {
                verdict: EligibilityVerdict::eligible(),
                triggered: None,
            }),
        }
    }
}

/// Shorthand for [`EligibilityEvaluator::evaluate`].
pub fn evaluate(snapshot: &ClinicalSnapshot) -> Result<EligibilityVerdict, StrokeError> {
    EligibilityEvaluator::evaluate(snapshot)
}

/// Shorthand for [`EligibilityEvaluator::assess`].
pub fn assess(snapshot: &ClinicalSnapshot) -> Result<Assessment, StrokeError> {
    EligibilityEvaluator::assess(snapshot)
}
