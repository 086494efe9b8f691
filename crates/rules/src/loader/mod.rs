//! Filesystem case loader.
//!
//! Scans a cases directory for YAML/JSON case documents and keeps them in
//! memory keyed by case id, via two-pass deserialization
//! (CaseEnvelope -> CaseDocument).

mod core;
mod error;


pub use self::core::CaseLoader;
pub use self::error::{LoadError, LoadResult, LoadStatus, Result};
