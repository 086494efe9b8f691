//! Screening service: one call per scan-upload event.
//!
//! Resolves the intake form, runs the evaluator, and records the outcome in
//! the audit log. Timestamps are taken here; the evaluator never sees a clock.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use stroke_core::config::IntakeConfig;
use stroke_core::{EligibilityVerdict, StrokeError};

use crate::audit_log::{AuditEntry, AuditLog};
use crate::evaluator::EligibilityEvaluator;
use crate::intake::{resolve_intake, VitalDefaults};
use crate::schema::{GuardId, IntakeForm};

/// What a screening produced, ready to be persisted by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningOutcome {
    #[serde(flatten)]
    pub verdict: EligibilityVerdict,
    pub triggered_guard: Option<GuardId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub substituted_fields: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub audit_id: Uuid,
}

/// Ties intake resolution, evaluation, and auditing together.
pub struct Screener {
    defaults: Option<VitalDefaults>,
    audit: Arc<AuditLog>,
}

impl Screener {
    /// Missing vitals are defaulted only when the config enables it.
    pub fn new(config: &IntakeConfig, audit: Arc<AuditLog>) -> Self {
        let defaults = config
            .substitute_missing_vitals
            .then(|| VitalDefaults::from(config));
        Self { defaults, audit }
    }

    pub fn audit_log(&self) -> &Arc<AuditLog> {
        &self.audit
    }

    /// Screen one intake form for a patient.
    ///
    /// Invalid input is returned as an error and leaves no audit entry.
    pub fn screen(
        &self,
        patient_code: &str,
        case_id: Option<&str>,
        form: &IntakeForm,
    ) -> Result<ScreeningOutcome, StrokeError> {
        let assessed = resolve_intake(form, self.defaults.as_ref()).and_then(|resolved| {
            let assessment = EligibilityEvaluator::assess(&resolved.snapshot)?;
            Ok((resolved, assessment))
        });
        let (resolved, assessment) = match assessed {
            Ok(pair) => pair,
            Err(e) => {
                warn!(patient_code, case_id, error = %e, "intake rejected");
                return Err(e);
            }
        };

        let substituted_fields: Vec<String> =
            resolved.substituted.iter().map(|f| f.to_string()).collect();
        let warnings: Vec<String> = resolved.warnings.iter().map(|w| w.to_string()).collect();

        let entry = AuditEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            patient_code: patient_code.to_string(),
            case_id: case_id.map(str::to_string),
            eligible: assessment.verdict.eligible,
            reason: assessment.verdict.reason.clone(),
            triggered_guard: assessment.triggered,
            substituted_fields: substituted_fields.clone(),
            warnings: warnings.clone(),
        };
        let audit_id = entry.id;
        self.audit.record(entry);

        info!(
            patient_code,
            case_id,
            eligible = assessment.verdict.eligible,
            guard = ?assessment.triggered,
            substituted = substituted_fields.len(),
            "screening complete"
        );

        Ok(ScreeningOutcome {
            verdict: assessment.verdict,
            triggered_guard: assessment.triggered,
            substituted_fields,
            warnings,
            audit_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit_log::AuditQuery;
    use stroke_core::ClinicalSnapshot;

    fn form() -> IntakeForm {
        IntakeForm::from(&ClinicalSnapshot {
            age: 65,
            hours_since_onset: 2.0,
            imaging_confirmed: true,
            consent: true,
            nihss_score: 8,
            inr: 1.2,
            heart_rate: 80,
            respiratory_rate: 16,
            temperature: 98.6,
            oxygen_saturation: 97,
            systolic_bp: 140,
            diastolic_bp: 90,
            glucose: 120.0,
            platelet_count: 250,
            anticoagulant_risk: false,
            recent_trauma: false,
            recent_stroke_or_injury: false,
            intracranial_issue: false,
            recent_mi: false,
            recent_surgery: false,
        })
    }

    fn screener(substitute: bool) -> Screener {
        let config = IntakeConfig {
            substitute_missing_vitals: substitute,
            ..IntakeConfig::default()
        };
        Screener::new(&config, Arc::new(AuditLog::new()))
    }

    #[test]
    fn eligible_screening_is_recorded() {
        let screener = screener(false);
        let outcome = screener.screen("P001", Some("p001-initial"), &form()).unwrap();
        assert!(outcome.verdict.eligible);
        assert!(outcome.triggered_guard.is_none());

        let latest = screener.audit_log().latest("P001").unwrap();
        assert_eq!(latest.id, outcome.audit_id);
        assert_eq!(latest.case_id.as_deref(), Some("p001-initial"));
        assert!(latest.eligible);
    }

    #[test]
    fn ineligible_screening_records_guard() {
        let screener = screener(false);
        let mut f = form();
        f.systolic_bp = Some(200);
        let outcome = screener.screen("P002", None, &f).unwrap();
        assert_eq!(outcome.verdict.reason, "blood pressure exceeds safe threshold");
        assert_eq!(outcome.triggered_guard, Some(GuardId::BloodPressure));

        let params = AuditQuery {
            guard: Some(GuardId::BloodPressure),
            ..Default::default()
        };
        assert_eq!(screener.audit_log().query("P002", &params).len(), 1);
    }

    #[test]
    fn invalid_input_leaves_no_audit_entry() {
        let screener = screener(true);
        let mut f = form();
        f.glucose = None;
        let err = screener.screen("P003", None, &f).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(screener.audit_log().latest("P003").is_none());
    }

    #[test]
    fn non_finite_reading_is_rejected_without_audit_entry() {
        let screener = screener(false);
        let mut f = form();
        f.temperature = Some(f64::NAN);
        let err = screener.screen("P006", Some("p006-nan"), &f).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("temperature"));
        assert!(screener.audit_log().latest("P006").is_none());
    }

    #[test]
    fn substitution_requires_config_opt_in() {
        let mut f = form();
        f.heart_rate = None;

        assert!(screener(false).screen("P004", None, &f).is_err());

        let lenient = screener(true);
        let outcome = lenient.screen("P004", None, &f).unwrap();
        assert!(outcome.verdict.eligible);
        assert_eq!(outcome.substituted_fields, vec!["heart_rate".to_string()]);
        assert_eq!(outcome.warnings.len(), 1);

        let recorded = lenient.audit_log().latest("P004").unwrap();
        assert_eq!(recorded.substituted_fields, vec!["heart_rate".to_string()]);
    }

    #[test]
    fn outcome_serializes_flat() {
        let outcome = screener(false).screen("P005", None, &form()).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["eligible"], true);
        assert_eq!(json["reason"], "meets all criteria for intravenous thrombolysis");
        assert!(json.get("warnings").is_none());
    }
}
