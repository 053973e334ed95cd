//! # sgm-core: Foundational Types for SGM Governance
//!
//! This crate holds the vocabulary shared by every other `sgm-*` crate:
//! the case record and its taxonomy, UTC-only timestamps, identifier
//! newtypes, and the shared parse error. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `CaseId`, `VersionId`,
//!    `PlanId`, `SectionId` are distinct types. A case id cannot be passed
//!    where a version id is expected.
//!
//! 2. **Closed enums for case taxonomy.** `CaseType`, `CaseStatus`, and
//!    `CasePriority` are exhaustive; adding a variant forces every policy
//!    table and aggregation to handle it.
//!
//! 3. **UTC-only timestamps.** `Timestamp` is always UTC at seconds
//!    precision, so day arithmetic is identical regardless of where a
//!    record was created.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sgm-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod case;
pub mod domain;
pub mod error;
pub mod identity;
pub mod temporal;

pub use case::Case;
pub use domain::{CasePriority, CaseStatus, CaseType};
pub use error::SgmError;
pub use identity::{CaseId, PlanId, SectionId, VersionId};
pub use temporal::Timestamp;
