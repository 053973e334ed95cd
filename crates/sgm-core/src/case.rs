//! # Case Record
//!
//! The subset of a governance case that SLA tracking and load balancing
//! read. Intake records carry more (timeline, attachments, resolution);
//! unknown fields are ignored on deserialization.

use serde::{Deserialize, Serialize};

use crate::domain::{CasePriority, CaseStatus, CaseType};
use crate::identity::CaseId;
use crate::temporal::Timestamp;

/// A governance case as seen by the SLA layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: CaseId,
    pub case_number: String,
    #[serde(rename = "type")]
    pub case_type: CaseType,
    pub status: CaseStatus,
    pub priority: CasePriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// When the case was opened. Intake records call this `submittedAt`.
    #[serde(alias = "submittedAt")]
    pub created_at: Timestamp,
    pub title: String,
}

impl Case {
    /// Whether the case is still open and subject to SLA tracking.
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Whether the case is assigned to exactly `name`.
    pub fn is_assigned_to(&self, name: &str) -> bool {
        self.assigned_to.as_deref() == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTAKE_RECORD: &str = r#"{
        "id": "case-001",
        "caseNumber": "CASE-2025-1201",
        "type": "TERRITORY_CHANGE",
        "title": "Mid-Quarter Territory Reassignment",
        "description": "ignored",
        "submittedAt": "2025-12-08T09:30:00.000Z",
        "status": "UNDER_REVIEW",
        "priority": "HIGH",
        "assignedTo": "Amanda Foster",
        "timeline": []
    }"#;

    #[test]
    fn deserializes_intake_record() {
        let case: Case = serde_json::from_str(INTAKE_RECORD).unwrap();
        assert_eq!(case.id.as_str(), "case-001");
        assert_eq!(case.case_type, CaseType::TerritoryChange);
        assert_eq!(case.created_at.to_iso8601(), "2025-12-08T09:30:00Z");
        assert!(case.is_active());
        assert!(case.is_assigned_to("Amanda Foster"));
        assert!(!case.is_assigned_to("Amanda"));
    }

    #[test]
    fn serializes_with_created_at() {
        let case: Case = serde_json::from_str(INTAKE_RECORD).unwrap();
        let json = serde_json::to_value(&case).unwrap();
        assert_eq!(json["createdAt"], "2025-12-08T09:30:00Z");
        assert_eq!(json["type"], "TERRITORY_CHANGE");
    }

    #[test]
    fn unassigned_case_matches_nobody() {
        let mut case: Case = serde_json::from_str(INTAKE_RECORD).unwrap();
        case.assigned_to = None;
        assert!(!case.is_assigned_to(""));
    }

    #[test]
    fn terminal_case_is_inactive() {
        let mut case: Case = serde_json::from_str(INTAKE_RECORD).unwrap();
        case.status = CaseStatus::Closed;
        assert!(!case.is_active());
    }
}
