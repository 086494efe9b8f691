//! Core [`CaseLoader`] struct: filesystem-backed case loading.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::schema::{CaseDocument, CaseEnvelope};
use crate::validation::fuzzy::is_kebab_case;

use super::error::{LoadError, LoadResult, LoadStatus, Result};

const SUPPORTED_API_VERSION: &str = "v1";

/// Filesystem-backed case loader.
///
/// Scans a directory (recursively) for `*.yml` / `*.yaml` / `*.json` files,
/// deserializes them into [`CaseDocument`] instances via two-pass
/// deserialization, and keeps an in-memory map keyed by case ID.
pub struct CaseLoader {
    /// Root directory containing case files.
    cases_dir: PathBuf,
    /// In-memory store of all loaded cases keyed by `metadata.id`.
    cases: Arc<RwLock<HashMap<String, CaseDocument>>>,
}

impl CaseLoader {
    pub fn new(cases_dir: PathBuf) -> Self {
        Self {
            cases_dir,
            cases: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Recursively scan the cases directory and load all case files.
    ///
    /// Dotfiles and unsupported extensions are skipped. Parse errors and
    /// duplicate IDs are reported per-file but do not abort the scan.
    pub fn load_all(&self) -> Result<Vec<LoadResult>> {
        let mut results = Vec::new();
        self.scan_dir_recursive(&self.cases_dir, &mut results)?;
        Ok(results)
    }

    /// Recursively scan a directory for case files.
    fn scan_dir_recursive(&self, dir: &Path, results: &mut Vec<LoadResult>) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "failed to read directory");
                return Ok(());
            }
        };

        // Sort for a stable load order, so duplicate-id reports are deterministic.
        let mut paths: Vec<PathBuf> = entries
            .collect::<std::result::Result<Vec<_>, _>>()?
            .into_iter()
            .map(|e| e.path())
            .collect();
        paths.sort();

        for path in paths {
            // Skip dotfiles/dotdirs
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    if path.is_file() {
                        results.push(LoadResult {
                            path,
                            status: LoadStatus::Skipped {
                                reason: "dotfile".to_string(),
                            },
                        });
                    }
                    continue;
                }
            }

            // Recurse into subdirectories
            if path.is_dir() {
                self.scan_dir_recursive(&path, results)?;
                continue;
            }

            if !is_case_file(&path) {
                results.push(LoadResult {
                    path,
                    status: LoadStatus::Skipped {
                        reason: "not a YAML or JSON file".to_string(),
                    },
                });
                continue;
            }

            let status = match self.load_file(&path) {
                Ok(doc) => {
                    let case_id = doc.metadata.id.clone();
                    if self.insert_case(case_id.clone(), doc) {
                        info!(case_id = %case_id, path = %path.display(), "loaded case");
                        LoadStatus::Loaded { case_id }
                    } else {
                        warn!(case_id = %case_id, path = %path.display(), "duplicate case id");
                        LoadStatus::Failed {
                            error: format!("duplicate case id '{case_id}'"),
                        }
                    }
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load case file");
                    LoadStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };
            results.push(LoadResult { path, status });
        }

        Ok(())
    }

    /// Insert a case unless its ID is already taken. Returns whether it was inserted.
    fn insert_case(&self, id: String, doc: CaseDocument) -> bool {
        let mut guard = self.cases.write().expect("cases lock poisoned");
        if guard.contains_key(&id) {
            return false;
        }
        guard.insert(id, doc);
        true
    }

    /// Parse a single case file into a [`CaseDocument`] via two-pass deserialization.
    ///
    /// First pass: deserialize as [`CaseEnvelope`] to check the header.
    /// Second pass: reconstruct and deserialize into the full document.
    pub fn load_file(&self, path: &Path) -> Result<CaseDocument> {
        let contents = fs::read_to_string(path)?;

        let envelope: CaseEnvelope = if has_extension(path, &["json"]) {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };

        if envelope.api_version != SUPPORTED_API_VERSION {
            return Err(LoadError::Invalid(format!(
                "unsupported apiVersion '{}', expected '{}'",
                envelope.api_version, SUPPORTED_API_VERSION
            )));
        }
        if envelope.metadata.id.is_empty() {
            return Err(LoadError::Invalid(
                "case metadata.id must not be empty".to_string(),
            ));
        }
        if envelope.metadata.patient_code.is_empty() {
            return Err(LoadError::Invalid(format!(
                "case '{}' has an empty metadata.patient_code",
                envelope.metadata.id
            )));
        }
        if !is_kebab_case(&envelope.metadata.id) {
            warn!(case_id = %envelope.metadata.id, "case id is not kebab-case");
        }

        envelope.parse_full().map_err(|e| {
            LoadError::Invalid(format!("failed to parse case '{}': {}", envelope.metadata.id, e))
        })
    }

    /// Get the cases directory path.
    pub fn cases_dir(&self) -> &Path {
        &self.cases_dir
    }

    /// All loaded cases, sorted by ID.
    pub fn cases(&self) -> Vec<CaseDocument> {
        let guard = self.cases.read().expect("cases lock poisoned");
        let mut cases: Vec<CaseDocument> = guard.values().cloned().collect();
        cases.sort_by(|a, b| a.metadata.id.cmp(&b.metadata.id));
        cases
    }

    /// Look up a loaded case by ID.
    pub fn get(&self, id: &str) -> Option<CaseDocument> {
        self.cases.read().expect("cases lock poisoned").get(id).cloned()
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e))
        .unwrap_or(false)
}

fn is_case_file(path: &Path) -> bool {
    has_extension(path, &["yml", "yaml", "json"])
}
