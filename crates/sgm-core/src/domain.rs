//! # Case Taxonomy
//!
//! The three closed enums every case carries: what kind of request it is,
//! where it sits in its lifecycle, and how urgent it is. The wire form of
//! each variant is SCREAMING_SNAKE_CASE, matching the records produced by
//! the governance case intake.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SgmError;

/// The kind of governance request a case represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseType {
    /// Request for an exception to standard policy or plan rules.
    Exception,
    /// Disagreement over a commission calculation or plan interpretation.
    Dispute,
    /// Adjustment needed after a territory reassignment or coverage change.
    TerritoryChange,
    /// Mid-year plan change due to a role or assignment change.
    PlanModification,
    /// Request to modify a quota due to special circumstances.
    QuotaAdjustment,
}

impl CaseType {
    /// All case types in canonical order.
    pub fn all() -> &'static [CaseType] {
        &[
            Self::Exception,
            Self::Dispute,
            Self::TerritoryChange,
            Self::PlanModification,
            Self::QuotaAdjustment,
        ]
    }

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exception => "EXCEPTION",
            Self::Dispute => "DISPUTE",
            Self::TerritoryChange => "TERRITORY_CHANGE",
            Self::PlanModification => "PLAN_MODIFICATION",
            Self::QuotaAdjustment => "QUOTA_ADJUSTMENT",
        }
    }

    /// Display label, e.g. `TERRITORY CHANGE`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

/// Lifecycle status of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    /// Submitted, not yet picked up.
    New,
    /// Under active review by the assignee.
    UnderReview,
    /// Waiting on the submitter for more information.
    PendingInfo,
    /// Escalated to a committee.
    Escalated,
    /// Decision made (terminal).
    Resolved,
    /// Closed without further action (terminal).
    Closed,
}

impl CaseStatus {
    /// All statuses in lifecycle order.
    pub fn all() -> &'static [CaseStatus] {
        &[
            Self::New,
            Self::UnderReview,
            Self::PendingInfo,
            Self::Escalated,
            Self::Resolved,
            Self::Closed,
        ]
    }

    /// Whether this status ends the case. Terminal cases are not tracked
    /// against an SLA and do not count toward anyone's load.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::UnderReview => "UNDER_REVIEW",
            Self::PendingInfo => "PENDING_INFO",
            Self::Escalated => "ESCALATED",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }
}

/// Urgency of a case.
///
/// Ordered from least to most urgent, so `Urgent > High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CasePriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl CasePriority {
    /// All priorities, least urgent first.
    pub fn all() -> &'static [CasePriority] {
        &[Self::Low, Self::Medium, Self::High, Self::Urgent]
    }

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

macro_rules! display_and_parse {
    ($ty:ident, $what:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = SgmError;

            /// Parse from the wire identifier. Case-insensitive, and `-`
            /// is accepted in place of `_` so CLI input like
            /// `territory-change` works.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
                Self::all()
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == normalized)
                    .ok_or_else(|| SgmError::Parse(format!("unknown {}: {s:?}", $what)))
            }
        }
    };
}

display_and_parse!(CaseType, "case type");
display_and_parse!(CaseStatus, "case status");
display_and_parse!(CasePriority, "case priority");
