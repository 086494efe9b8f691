use serde::{Deserialize, Serialize};

/// Reason reported when no disqualifying condition is present.
pub const ELIGIBLE_REASON: &str = "meets all criteria for intravenous thrombolysis";

/// Outcome of one eligibility evaluation: a decision plus exactly one reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub eligible: bool,
    pub reason: String,
}

impl EligibilityVerdict {
    pub fn eligible() -> Self {
        Self {
            eligible: true,
            reason: ELIGIBLE_REASON.to_string(),
        }
    }

    pub fn ineligible(reason: impl Into<String>) -> Self {
        Self {
            eligible: false,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for EligibilityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = if self.eligible { "ELIGIBLE" } else { "NOT ELIGIBLE" };
        write!(f, "{label}: {}", self.reason)
    }
}
