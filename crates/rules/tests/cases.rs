//! Integration tests that screen every case document in `data/cases/` and
//! check it against its `expected` block.

use std::path::PathBuf;
use std::sync::Arc;

use stroke_core::config::IntakeConfig;
use stroke_rules::audit_log::{AuditLog, AuditQuery, Outcome};
use stroke_rules::loader::{CaseLoader, LoadStatus};
use stroke_rules::schema::{CaseDocument, GuardId};
use stroke_rules::Screener;

/// Resolve the cases directory relative to the workspace root.
/// Integration tests run from the crate directory, so we go up two levels.
fn cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/cases")
}

fn load_cases() -> Vec<CaseDocument> {
    let loader = CaseLoader::new(cases_dir());
    let results = loader.load_all().expect("scan cases dir");
    for r in &results {
        if let LoadStatus::Failed { error } = &r.status {
            panic!("failed to load {}: {}", r.path.display(), error);
        }
    }
    loader.cases()
}

fn strict_screener() -> Screener {
    Screener::new(&IntakeConfig::default(), Arc::new(AuditLog::new()))
}

#[test]
fn every_case_file_loads() {
    let cases = load_cases();
    assert_eq!(cases.len(), 10);
    assert!(cases.iter().all(|c| c.kind == "StrokeCase"));
    assert!(cases.iter().all(|c| c.expected.is_some()));
}

#[test]
fn every_case_matches_its_expected_verdict() {
    let screener = strict_screener();
    for case in load_cases() {
        let outcome = screener
            .screen(&case.metadata.patient_code, Some(&case.metadata.id), &case.intake)
            .unwrap_or_else(|e| panic!("{}: {}", case.metadata.id, e));
        let expected = case.expected.as_ref().unwrap();
        assert!(
            expected.matches(
                outcome.verdict.eligible,
                &outcome.verdict.reason,
                outcome.triggered_guard
            ),
            "{}: got {:?} ({:?}), expected {:?}",
            case.metadata.id,
            outcome.verdict,
            outcome.triggered_guard,
            expected
        );
    }
}

#[test]
fn precedence_cases_report_earliest_guard() {
    let cases = load_cases();
    let pediatric = cases
        .iter()
        .find(|c| c.metadata.id == "pediatric-low-platelets")
        .unwrap();
    assert_eq!(pediatric.intake.platelet_count, Some(50));
    assert_eq!(pediatric.expected.as_ref().unwrap().guard, Some(GuardId::Age));

    let tagged: Vec<&str> = cases
        .iter()
        .filter(|c| {
            c.metadata
                .tags
                .as_ref()
                .is_some_and(|t| t.iter().any(|t| t == "precedence"))
        })
        .map(|c| c.metadata.id.as_str())
        .collect();
    assert_eq!(tagged, vec!["cardiac-and-surgical", "pediatric-low-platelets"]);
}

#[test]
fn legacy_score_spelling_is_read() {
    let cases = load_cases();
    let legacy = cases
        .iter()
        .find(|c| c.metadata.id == "minor-stroke-legacy-form")
        .unwrap();
    assert_eq!(legacy.intake.nihss_score, Some(3));
    assert!(legacy.intake.unknown.is_empty());
}

#[test]
fn json_case_uses_native_booleans() {
    let cases = load_cases();
    let json_case = cases.iter().find(|c| c.metadata.id == "hypoglycemic").unwrap();
    assert_eq!(
        json_case.intake.recent_mi.as_ref().and_then(|a| a.resolve()),
        Some(false)
    );
}

#[test]
fn audit_log_holds_one_entry_per_case() {
    let screener = strict_screener();
    let cases = load_cases();
    for case in &cases {
        screener
            .screen(&case.metadata.patient_code, Some(&case.metadata.id), &case.intake)
            .unwrap();
    }

    let audit = screener.audit_log();
    assert_eq!(audit.patients().len(), cases.len());

    let eligible: usize = audit
        .patients()
        .iter()
        .map(|p| {
            audit
                .query(
                    p,
                    &AuditQuery {
                        outcome: Some(Outcome::Eligible),
                        ..Default::default()
                    },
                )
                .len()
        })
        .sum();
    assert_eq!(eligible, 2);
}
