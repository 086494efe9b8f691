//! Shared data model, error type, and configuration for tPA eligibility screening.

pub mod config;
pub mod error;
pub mod snapshot;
pub mod verdict;

pub use config::Config;
pub use error::*;
pub use snapshot::*;
pub use verdict::*;
