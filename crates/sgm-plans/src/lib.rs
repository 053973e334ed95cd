//! # sgm-plans: Plan Completion
//!
//! A compensation plan is drafted section by section. Each section moves
//! through `NOT_STARTED → IN_PROGRESS → COMPLETED → UNDER_REVIEW →
//! APPROVED`; the plan's completion percentage is the share of sections
//! currently `COMPLETED`.
//!
//! - `plan.rs`: plan and section records, section state transitions.
//! - `completion.rs`: the completion rollup.

pub mod completion;
pub mod plan;

pub use completion::PlanCompletionStats;
pub use plan::{Plan, PlanError, PlanSection, PlanStatus, SectionCompletionStatus};
