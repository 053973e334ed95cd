//! # Per-Case SLA Evaluation
//!
//! Classifies one case against its policy at a given instant.
//!
//! ## Classification
//!
//! ```text
//! percent_elapsed >= 100                      → BREACHED
//! percent_elapsed >= escalation_threshold     → AT_RISK (escalate)
//! otherwise                                   → ON_TRACK
//! ```
//!
//! Escalation is a flag on AT_RISK, not a fourth status. The warning
//! threshold does not change the status; it is surfaced separately as
//! `warning_reached`.

use serde::{Deserialize, Serialize};

use sgm_core::{Case, Timestamp};

use crate::load::CapacityModel;
use crate::policy::{PolicyTable, SlaPolicy};

/// Where a case stands against its SLA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlaStatus {
    OnTrack,
    AtRisk,
    Breached,
}

impl SlaStatus {
    /// Sort key for urgency: breached cases first.
    pub fn urgency_rank(&self) -> u8 {
        match self {
            Self::Breached => 0,
            Self::AtRisk => 1,
            Self::OnTrack => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "ON_TRACK",
            Self::AtRisk => "AT_RISK",
            Self::Breached => "BREACHED",
        }
    }
}

impl std::fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The SLA figures for one case at one instant. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaEvaluation {
    /// The policy the case was measured against (possibly the fallback).
    pub policy: SlaPolicy,
    pub days_elapsed: i64,
    pub percent_elapsed: f64,
    /// Negative values are days overdue.
    pub days_remaining: i64,
    pub status: SlaStatus,
    pub should_escalate: bool,
    pub warning_reached: bool,
}

impl SlaEvaluation {
    /// Days past the target, or 0 if not yet due.
    pub fn days_overdue(&self) -> i64 {
        (-self.days_remaining).max(0)
    }
}

/// Classify a percent-elapsed figure against a policy.
pub fn classify(percent_elapsed: f64, policy: &SlaPolicy) -> SlaStatus {
    if percent_elapsed >= 100.0 {
        SlaStatus::Breached
    } else if percent_elapsed >= f64::from(policy.escalation_threshold_percent) {
        SlaStatus::AtRisk
    } else {
        SlaStatus::OnTrack
    }
}

/// SLA calculations over a policy table and capacity model.
///
/// Holds only reference data. Every method recomputes from its arguments.
#[derive(Debug, Clone, Default)]
pub struct SlaCalculator {
    pub(crate) policies: PolicyTable,
    pub(crate) capacity: CapacityModel,
}

impl SlaCalculator {
    pub fn new(policies: PolicyTable) -> Self {
        Self {
            policies,
            capacity: CapacityModel::default(),
        }
    }

    /// Replace the capacity model used for load and assignment.
    pub fn with_capacity_model(mut self, capacity: CapacityModel) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    pub fn capacity_model(&self) -> &CapacityModel {
        &self.capacity
    }

    /// Evaluate one case at `now`.
    ///
    /// Total: an unmatched `(type, priority)` uses the fallback policy and a
    /// zero-day target yields 0% elapsed.
    pub fn calculate_case_sla(&self, case: &Case, now: Timestamp) -> SlaEvaluation {
        let policy = self.policies.resolve(case.case_type, case.priority);
        let target = i64::from(policy.target_resolution_days);

        let days_elapsed = now.days_since(&case.created_at);
        let percent_elapsed = if target == 0 {
            0.0
        } else {
            100.0 * days_elapsed as f64 / target as f64
        };
        let days_remaining = target - days_elapsed;

        let status = classify(percent_elapsed, policy);
        let should_escalate = status == SlaStatus::AtRisk
            && percent_elapsed >= f64::from(policy.escalation_threshold_percent);
        let warning_reached = percent_elapsed >= f64::from(policy.warning_threshold_percent);

        SlaEvaluation {
            policy: policy.clone(),
            days_elapsed,
            percent_elapsed,
            days_remaining,
            status,
            should_escalate,
            warning_reached,
        }
    }
}
