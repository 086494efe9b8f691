//! Metadata block of a case document.

use serde::{Deserialize, Serialize};

/// Identifies a case and the patient it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CaseMetadata {
    pub id: String,
    pub patient_code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}
