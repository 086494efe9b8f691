//! Intravenous thrombolysis (tPA) eligibility screening.
//!
//! This crate provides:
//! - The ordered 19-guard protocol table and a pure, short-circuiting evaluator
//! - Intake forms with loosely typed fields, resolved into clinical snapshots
//! - Structured validation with "Did you mean" suggestions for unknown fields
//! - A per-patient in-memory audit log of screenings
//! - A filesystem loader for YAML/JSON case documents
//! - Regression runs that check case documents against expected verdicts

pub mod audit_log;
pub mod evaluator;
pub mod intake;
pub mod loader;
pub mod regression;
pub mod schema;
pub mod screening;
pub mod validation;

pub use evaluator::{assess, evaluate, Assessment, EligibilityEvaluator};
pub use screening::{Screener, ScreeningOutcome};
