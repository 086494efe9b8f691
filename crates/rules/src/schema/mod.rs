//! Serde schema types for intake forms, case documents, and guard identifiers.
//!
//! - `IntakeForm`: the loosely typed form submitted with a scan upload
//! - `CaseEnvelope`: lightweight first-pass header (apiVersion, kind, metadata)
//! - `CaseDocument`: a full case with intake and optional expected outcome
//! - `GuardId` / `ProtocolStage`: stable names for protocol checks

mod case;
mod envelope;
mod guard;
mod intake;
mod kind;
mod metadata;

pub use case::*;
pub use envelope::*;
pub use guard::*;
pub use intake::*;
pub use kind::*;
pub use metadata::*;
