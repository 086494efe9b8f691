//! In-memory structured audit log of eligibility screenings.
//!
//! Stores per-patient entries capped at a configurable maximum (default 500)
//! with FIFO eviction. Uses `std::sync::RwLock` so one log can be shared
//! across request-handling threads behind an `Arc`.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::GuardId;

/// Screening outcome filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Eligible,
    Ineligible,
}

impl Outcome {
    pub fn from_eligible(eligible: bool) -> Self {
        if eligible {
            Outcome::Eligible
        } else {
            Outcome::Ineligible
        }
    }
}

/// One recorded screening.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub patient_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    pub eligible: bool,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggered_guard: Option<GuardId>,
    /// Vital signs filled from defaults rather than measured.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substituted_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AuditEntry {
    pub fn outcome(&self) -> Outcome {
        Outcome::from_eligible(self.eligible)
    }
}

/// Query parameters for filtering audit entries.
#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub outcome: Option<Outcome>,
    /// Only entries where this guard fired.
    pub guard: Option<GuardId>,
    /// Maximum number of entries to return.
    pub limit: Option<u32>,
    /// Only return entries at or after this RFC 3339 timestamp.
    pub since: Option<String>,
}

/// In-memory per-patient audit log with FIFO eviction.
pub struct AuditLog {
    entries: RwLock<HashMap<String, VecDeque<AuditEntry>>>,
    max_entries_per_patient: usize,
}

impl AuditLog {
    /// Create a new audit log with the default cap of 500 entries per patient.
    pub fn new() -> Self {
        Self::with_max_entries(500)
    }

    /// Create a new audit log with a custom per-patient entry cap.
    pub fn with_max_entries(max: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries_per_patient: max,
        }
    }

    /// Append an entry, evicting the patient's oldest entries past the cap.
    pub fn record(&self, entry: AuditEntry) {
        let mut guard = self.entries.write().expect("audit_log lock poisoned");
        let deque = guard
            .entry(entry.patient_code.clone())
            .or_insert_with(VecDeque::new);
        deque.push_back(entry);
        while deque.len() > self.max_entries_per_patient {
            deque.pop_front();
        }
    }

    /// Query entries for a patient, newest first.
    ///
    /// The lock is held only for the duration of the clone+filter.
    pub fn query(&self, patient_code: &str, params: &AuditQuery) -> Vec<AuditEntry> {
        let guard = self.entries.read().expect("audit_log lock poisoned");
        let Some(deque) = guard.get(patient_code) else {
            return Vec::new();
        };

        let since: Option<DateTime<Utc>> = params
            .since
            .as_ref()
            .and_then(|s| s.parse::<DateTime<Utc>>().ok());

        let limit = params.limit.unwrap_or(100) as usize;

        deque
            .iter()
            .rev()
            .filter(|e| params.outcome.map_or(true, |o| e.outcome() == o))
            .filter(|e| params.guard.map_or(true, |g| e.triggered_guard == Some(g)))
            .filter(|e| since.map_or(true, |s| e.timestamp >= s))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Most recent entry for a patient.
    pub fn latest(&self, patient_code: &str) -> Option<AuditEntry> {
        let guard = self.entries.read().expect("audit_log lock poisoned");
        guard.get(patient_code).and_then(|d| d.back().cloned())
    }

    /// Patient codes with at least one entry, sorted.
    pub fn patients(&self) -> Vec<String> {
        let guard = self.entries.read().expect("audit_log lock poisoned");
        let mut codes: Vec<String> = guard.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Clear all entries for a patient.
    pub fn clear(&self, patient_code: &str) {
        let mut guard = self.entries.write().expect("audit_log lock poisoned");
        guard.remove(patient_code);
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(patient: &str, eligible: bool, guard: Option<GuardId>) -> AuditEntry {
        AuditEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            patient_code: patient.to_string(),
            case_id: None,
            eligible,
            reason: if eligible { "eligible" } else { "ineligible" }.to_string(),
            triggered_guard: guard,
            substituted_fields: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_basic_record_and_query() {
        let log = AuditLog::new();
        log.record(entry("P001", true, None));
        log.record(entry("P001", false, Some(GuardId::Glucose)));
        log.record(entry("P001", false, Some(GuardId::BloodPressure)));

        let entries = log.query("P001", &AuditQuery::default());
        assert_eq!(entries.len(), 3);
        // Newest first
        assert_eq!(entries[0].triggered_guard, Some(GuardId::BloodPressure));
        assert!(entries[2].eligible);
    }

    #[test]
    fn test_outcome_filter() {
        let log = AuditLog::new();
        log.record(entry("P001", true, None));
        log.record(entry("P001", false, Some(GuardId::Age)));
        log.record(entry("P001", false, Some(GuardId::Inr)));

        let params = AuditQuery {
            outcome: Some(Outcome::Ineligible),
            ..Default::default()
        };
        let entries = log.query("P001", &params);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| !e.eligible));
    }

    #[test]
    fn test_guard_filter() {
        let log = AuditLog::new();
        log.record(entry("P001", false, Some(GuardId::Age)));
        log.record(entry("P001", false, Some(GuardId::Inr)));
        log.record(entry("P001", false, Some(GuardId::Age)));

        let params = AuditQuery {
            guard: Some(GuardId::Age),
            ..Default::default()
        };
        assert_eq!(log.query("P001", &params).len(), 2);
    }

    #[test]
    fn test_limit() {
        let log = AuditLog::new();
        for _ in 0..10 {
            log.record(entry("P001", true, None));
        }

        let params = AuditQuery {
            limit: Some(3),
            ..Default::default()
        };
        assert_eq!(log.query("P001", &params).len(), 3);
    }

    #[test]
    fn test_since_filter() {
        let log = AuditLog::new();
        let mut old = entry("P001", true, None);
        old.timestamp = Utc::now() - Duration::hours(2);
        log.record(old);
        log.record(entry("P001", false, Some(GuardId::Consent)));

        let params = AuditQuery {
            since: Some((Utc::now() - Duration::hours(1)).to_rfc3339()),
            ..Default::default()
        };
        let entries = log.query("P001", &params);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].triggered_guard, Some(GuardId::Consent));
    }

    #[test]
    fn test_fifo_eviction() {
        let log = AuditLog::with_max_entries(3);
        let ids: Vec<Uuid> = (0..4)
            .map(|_| {
                let e = entry("P001", true, None);
                let id = e.id;
                log.record(e);
                id
            })
            .collect();

        let entries = log.query("P001", &AuditQuery::default());
        assert_eq!(entries.len(), 3);
        // Oldest should have been evicted
        assert_eq!(entries[2].id, ids[1]);
        assert_eq!(entries[0].id, ids[3]);
    }

    #[test]
    fn test_latest_and_clear() {
        let log = AuditLog::new();
        log.record(entry("P001", true, None));
        log.record(entry("P001", false, Some(GuardId::Platelets)));
        assert_eq!(
            log.latest("P001").and_then(|e| e.triggered_guard),
            Some(GuardId::Platelets)
        );

        log.clear("P001");
        assert!(log.latest("P001").is_none());
        assert!(log.query("P001", &AuditQuery::default()).is_empty());
    }

    #[test]
    fn test_per_patient_isolation() {
        let log = AuditLog::new();
        log.record(entry("P002", true, None));
        log.record(entry("P001", false, Some(GuardId::RecentMi)));

        assert_eq!(log.patients(), vec!["P001".to_string(), "P002".to_string()]);
        let p1 = log.query("P001", &AuditQuery::default());
        assert_eq!(p1.len(), 1);
        assert_eq!(p1[0].patient_code, "P001");
        assert!(log.query("nonexistent", &AuditQuery::default()).is_empty());
    }

    #[test]
    fn test_entry_serialization_skips_empty() {
        let json = serde_json::to_value(entry("P001", false, Some(GuardId::Glucose))).unwrap();
        assert_eq!(json["triggered_guard"], "glucose");
        assert!(json.get("case_id").is_none());
        assert!(json.get("substituted_fields").is_none());
    }
}
