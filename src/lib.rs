//! Observation dataset resolution for model diagnostics runs.
//!
//! Resolves, for each requested diagnostic variable, which observational
//! reference dataset (if any) backs it: a defaults lookup, an on-disk
//! existence check with a fallback search directory, and a normalized
//! descriptor for everything found.

pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod report;
pub mod resolve;
