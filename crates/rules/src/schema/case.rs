//! Stroke case document: one intake form plus an optional expected outcome.

use serde::{Deserialize, Serialize};

use super::{CaseMetadata, GuardId, IntakeForm};

/// A screening case as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDocument {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CaseMetadata,
    pub intake: IntakeForm,
    /// Outcome a regression run should reproduce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<ExpectedVerdict>,
}

impl CaseDocument {
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Expected screening outcome. `reason` and `guard` are only compared when set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExpectedVerdict {
    pub eligible: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub guard: Option<GuardId>,
}

impl ExpectedVerdict {
    pub fn matches(&self, eligible: bool, reason: &str, guard: Option<GuardId>) -> bool {
        if self.eligible != eligible {
            return false;
        }
        if let Some(expected) = &self.reason {
            if expected != reason {
                return false;
            }
        }
        if let Some(expected) = self.guard {
            if Some(expected) != guard {
                return false;
            }
        }
        true
    }
}
