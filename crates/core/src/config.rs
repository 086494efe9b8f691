use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_f64(profile: &str, key: &str, default: f64) -> f64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key) {
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub intake: IntakeConfig,
    pub audit: AuditConfig,
    pub cases: CasesConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `TPA_PROFILE` env var. When set (e.g. `STAGING`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("TPA_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            intake: IntakeConfig::from_env_profiled(p),
            audit: AuditConfig::from_env_profiled(p),
            cases: CasesConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  intake:  substitute_missing_vitals={}, defaults hr={} rr={} temp={} spo2={}",
            self.intake.substitute_missing_vitals,
            self.intake.default_heart_rate,
            self.intake.default_respiratory_rate,
            self.intake.default_temperature,
            self.intake.default_oxygen_saturation,
        );
        tracing::info!("  audit:   max_entries_per_patient={}", self.audit.max_entries_per_patient);
        tracing::info!("  cases:   dir={}", self.cases.dir.display());
    }

    /// Same summary as a JSON value, for `--format json` output.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "intake": {
                "substitute_missing_vitals": self.intake.substitute_missing_vitals,
                "default_heart_rate": self.intake.default_heart_rate,
                "default_respiratory_rate": self.intake.default_respiratory_rate,
                "default_temperature": self.intake.default_temperature,
                "default_oxygen_saturation": self.intake.default_oxygen_saturation,
            },
            "audit": { "max_entries_per_patient": self.audit.max_entries_per_patient },
            "cases": { "dir": self.cases.dir },
        })
    }
}

// ── Intake ────────────────────────────────────────────────────

/// Controls the caller-side substitution of missing vital signs.
///
/// Substitution is off unless explicitly enabled. The evaluator never sees
/// these values as anything other than ordinary readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    pub substitute_missing_vitals: bool,
    pub default_heart_rate: u32,
    pub default_respiratory_rate: u32,
    pub default_temperature: f64,
    pub default_oxygen_saturation: u32,
}

impl IntakeConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            substitute_missing_vitals: profiled_env_bool(p, "TPA_SUBSTITUTE_MISSING_VITALS", false),
            default_heart_rate: profiled_env_u32(p, "TPA_DEFAULT_HEART_RATE", 80),
            default_respiratory_rate: profiled_env_u32(p, "TPA_DEFAULT_RESPIRATORY_RATE", 16),
            default_temperature: profiled_env_f64(p, "TPA_DEFAULT_TEMPERATURE", 98.6),
            default_oxygen_saturation: profiled_env_u32(p, "TPA_DEFAULT_OXYGEN_SATURATION", 98),
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            substitute_missing_vitals: false,
            default_heart_rate: 80,
            default_respiratory_rate: 16,
            default_temperature: 98.6,
            default_oxygen_saturation: 98,
        }
    }
}

// ── Audit ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    pub max_entries_per_patient: usize,
}

impl AuditConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            max_entries_per_patient: profiled_env_u32(p, "TPA_AUDIT_MAX_ENTRIES", 500) as usize,
        }
    }
}

// ── Case files ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasesConfig {
    pub dir: PathBuf,
}

impl CasesConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            dir: PathBuf::from(profiled_env_or(p, "TPA_CASES_DIR", "data/cases")),
        }
    }
}
