//! Regression runs: screen case documents and compare against their expected verdicts.
//!
//! A run passes only when at least one case was screened, every case passed,
//! and no file failed to load.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::loader::{CaseLoader, LoadError, LoadStatus, Result};
use crate::schema::CaseDocument;
use crate::screening::{Screener, ScreeningOutcome};

/// Result of screening one case document.
#[derive(Debug, Serialize)]
pub struct CaseReport {
    pub case_id: String,
    pub patient_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ScreeningOutcome>,
    /// Set when the intake was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// `None` when the case carries no expected block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches_expected: Option<bool>,
}

impl CaseReport {
    /// Rejected intake and expected-verdict mismatches both fail.
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.matches_expected != Some(false)
    }
}

#[derive(Debug, Serialize)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of screening every case in a directory.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub dir: PathBuf,
    pub cases: Vec<CaseReport>,
    pub load_failures: Vec<LoadFailure>,
    pub passed: usize,
    pub failed: usize,
}

impl BatchReport {
    /// True when nothing was screened at all.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty() && self.load_failures.is_empty()
    }

    /// An empty run never succeeds.
    pub fn succeeded(&self) -> bool {
        !self.is_empty() && self.failed == 0
    }
}

/// Screen one case document and compare it with its expected block.
pub fn screen_case(screener: &Screener, case: &CaseDocument) -> CaseReport {
    let mut report = CaseReport {
        case_id: case.metadata.id.clone(),
        patient_code: case.metadata.patient_code.clone(),
        outcome: None,
        error: None,
        matches_expected: None,
    };

    match screener.screen(
        &case.metadata.patient_code,
        Some(&case.metadata.id),
        &case.intake,
    ) {
        Ok(outcome) => {
            report.matches_expected = case.expected.as_ref().map(|e| {
                e.matches(
                    outcome.verdict.eligible,
                    &outcome.verdict.reason,
                    outcome.triggered_guard,
                )
            });
            report.outcome = Some(outcome);
        }
        Err(e) => report.error = Some(e.to_string()),
    }
    report
}

/// Load every case under the loader's directory and screen it.
///
/// A directory that does not exist is an error rather than an empty run.
pub fn screen_directory(loader: &CaseLoader, screener: &Screener) -> Result<BatchReport> {
    let dir = loader.cases_dir().to_path_buf();
    if !dir.is_dir() {
        return Err(LoadError::Invalid(format!(
            "cases directory {} does not exist or is not a directory",
            dir.display()
        )));
    }

    let load_failures: Vec<LoadFailure> = loader
        .load_all()?
        .into_iter()
        .filter_map(|r| match r.status {
            LoadStatus::Failed { error } => Some(LoadFailure {
                path: r.path,
                error,
            }),
            _ => None,
        })
        .collect();

    let cases: Vec<CaseReport> = loader
        .cases()
        .iter()
        .map(|case| screen_case(screener, case))
        .collect();

    let passed = cases.iter().filter(|c| c.passed()).count();
    let failed = cases.len() - passed + load_failures.len();

    let report = BatchReport {
        dir,
        cases,
        load_failures,
        passed,
        failed,
    };
    if report.is_empty() {
        warn!(dir = %report.dir.display(), "no case files found");
    }
    info!(dir = %report.dir.display(), passed, failed, "batch complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    use tempfile::TempDir;

    use stroke_core::config::IntakeConfig;

    use super::*;
    use crate::audit_log::AuditLog;

    fn case_yaml(id: &str, systolic: &str, expected_eligible: bool) -> String {
        format!(
            r#"
apiVersion: v1
kind: StrokeCase
metadata:
  id: {id}
  patient_code: {id}
intake:
  age: 65
  hours_since_onset: 2
  imaging_confirmed: yes
  consent: yes
  nihss_score: 8
  inr: 1.2
  heart_rate: 80
  respiratory_rate: 16
  temperature: 98.6
  oxygen_saturation: 97
  systolic_bp: {systolic}
  diastolic_bp: 90
  glucose: 120
  platelet_count: 250
  anticoagulant_risk: no
  recent_trauma: no
  recent_stroke_or_injury: no
  intracranial_issue: no
  recent_mi: no
  recent_surgery: no
expected:
  eligible: {expected_eligible}
"#
        )
    }

    fn write_case(dir: &Path, id: &str, systolic: &str, expected_eligible: bool) {
        fs::write(
            dir.join(format!("{id}.yml")),
            case_yaml(id, systolic, expected_eligible),
        )
        .unwrap();
    }

    fn run(dir: &Path) -> Result<BatchReport> {
        let screener = Screener::new(&IntakeConfig::default(), Arc::new(AuditLog::new()));
        screen_directory(&CaseLoader::new(dir.to_path_buf()), &screener)
    }

    #[test]
    fn matching_cases_succeed() {
        let dir = TempDir::new().unwrap();
        write_case(dir.path(), "eligible", "140", true);
        write_case(dir.path(), "hypertensive", "200", false);

        let report = run(dir.path()).unwrap();
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 0);
        assert!(report.succeeded());
    }

    #[test]
    fn expected_mismatch_fails_the_run() {
        let dir = TempDir::new().unwrap();
        write_case(dir.path(), "eligible", "140", true);
        write_case(dir.path(), "wrongly-expected", "200", true);

        let report = run(dir.path()).unwrap();
        assert_eq!(report.failed, 1);
        assert!(!report.succeeded());
        let mismatch = report
            .cases
            .iter()
            .find(|c| c.case_id == "wrongly-expected")
            .unwrap();
        assert_eq!(mismatch.matches_expected, Some(false));
        assert!(!mismatch.passed());
    }

    #[test]
    fn rejected_intake_fails_the_run() {
        let dir = TempDir::new().unwrap();
        write_case(dir.path(), "eligible", "140", true);
        write_case(dir.path(), "negative-pressure", "-5", false);

        let report = run(dir.path()).unwrap();
        assert!(!report.succeeded());
        let rejected = report
            .cases
            .iter()
            .find(|c| c.case_id == "negative-pressure")
            .unwrap();
        assert!(rejected.outcome.is_none());
        assert!(rejected.error.as_deref().unwrap().contains("systolic_bp"));
    }

    #[test]
    fn unloadable_file_fails_the_run() {
        let dir = TempDir::new().unwrap();
        write_case(dir.path(), "eligible", "140", true);
        fs::write(dir.path().join("broken.yml"), "apiVersion: [unterminated").unwrap();

        let report = run(dir.path()).unwrap();
        assert_eq!(report.load_failures.len(), 1);
        assert!(!report.succeeded());
    }

    #[test]
    fn empty_directory_never_succeeds() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "not a case").unwrap();

        let report = run(dir.path()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.failed, 0);
        assert!(!report.succeeded());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = run(&dir.path().join("typo")).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
        assert!(err.to_string().contains("does not exist"));
    }
}
