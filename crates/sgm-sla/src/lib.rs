//! # sgm-sla: SLA Tracking and Load Balancing
//!
//! Computes, from a list of cases and the current time, everything the
//! case SLA dashboard shows: per-case SLA status, per-assignee load, and a
//! suggestion for who should take the next case.
//!
//! ## Components
//!
//! - **Policy table** (`policy.rs`): `(case type, priority)` → target days
//!   and warning/escalation thresholds, with a fallback for unmatched keys.
//! - **Evaluation** (`evaluation.rs`): days elapsed, percent elapsed, days
//!   remaining, `ON_TRACK | AT_RISK | BREACHED`, escalation flag.
//! - **Load** (`load.rs`): per-assignee counts and a priority-weighted
//!   capacity percentage banded into `UNDER | OPTIMAL | HIGH | OVER`.
//! - **Optimizer** (`optimizer.rs`): greedy lowest-capacity pick.
//! - **Overview** (`overview.rs`): dashboard roll-ups and urgency ordering.
//!
//! ## Design
//!
//! Everything here is a pure function of its inputs. Nothing is cached and
//! no state survives between calls, so every figure reflects the case list
//! and clock it was computed from. "Now" is always a parameter; callers
//! pass [`sgm_core::Timestamp::now()`] in production and a fixed instant
//! in tests.

pub mod evaluation;
pub mod load;
pub mod optimizer;
pub mod overview;
pub mod policy;

pub use evaluation::{classify, SlaCalculator, SlaEvaluation, SlaStatus};
pub use load::{AssigneeLoad, CapacityModel, Workload};
pub use optimizer::AssignmentSuggestion;
pub use overview::{distinct_assignees, rank_by_urgency, EvaluatedCase, SlaOverview};
pub use policy::{PolicyError, PolicyTable, SlaPolicy};
