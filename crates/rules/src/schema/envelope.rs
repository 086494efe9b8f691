//! Case envelope for lightweight first-pass deserialization.

use serde::{Deserialize, Serialize};

use super::{CaseDocument, CaseMetadata, DocumentKind};

/// Lightweight first-pass deserializer that reads only the header fields.
///
/// Used during two-pass loading: first check `kind` and `metadata`, then
/// deserialize the full document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseEnvelope {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CaseMetadata,
    /// Remaining fields captured as raw YAML for second-pass deserialization.
    #[serde(flatten)]
    pub rest: serde_yaml::Value,
}

impl CaseEnvelope {
    /// Parse the `kind` field into a typed [`DocumentKind`].
    pub fn document_kind(&self) -> std::result::Result<DocumentKind, String> {
        self.kind.parse()
    }

    /// Two-pass: reconstruct the full YAML and deserialize into the concrete type.
    pub fn parse_full(&self) -> std::result::Result<CaseDocument, String> {
        match self.document_kind()? {
            DocumentKind::StrokeCase => {
                let yaml = serde_yaml::to_string(self).map_err(|e| e.to_string())?;
                serde_yaml::from_str(&yaml).map_err(|e| e.to_string())
            }
        }
    }
}
