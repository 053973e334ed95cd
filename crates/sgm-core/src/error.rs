//! # Error Types
//!
//! The error shared by the `sgm-core` value types. Crates further up keep
//! their own narrower enums (`PolicyError`, `StoreError`, `PlanError`).
//!
//! Calculations (SLA evaluation, load aggregation, completion rollups) are
//! total and never produce errors. Only parsing of externally supplied
//! values is fallible here.

use thiserror::Error;

/// Error produced when turning text into a core value type.
#[derive(Error, Debug)]
pub enum SgmError {
    /// A value could not be parsed into its domain type.
    #[error("parse error: {0}")]
    Parse(String),
}
