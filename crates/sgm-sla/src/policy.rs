//! # SLA Policy Table
//!
//! Static reference data mapping `(case type, priority)` to a resolution
//! target and the percent-elapsed thresholds at which a case is flagged.
//!
//! ## Fallback
//!
//! Lookups never fail. A key with no exact match resolves to the table's
//! fallback policy: the entry with the widest target, so an unmatched case
//! is never reported as breached sooner than any configured policy would
//! allow. An empty table falls back to [`SlaPolicy::builtin_default`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sgm_core::{CasePriority, CaseType};

/// One row of the SLA policy table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaPolicy {
    pub id: String,
    pub case_type: CaseType,
    pub priority: CasePriority,
    /// Calendar days allowed from case creation to resolution.
    pub target_resolution_days: u32,
    /// Percent of the target at which the case enters its warning window.
    pub warning_threshold_percent: u32,
    /// Percent of the target at which the case is at risk and escalates.
    pub escalation_threshold_percent: u32,
    #[serde(default)]
    pub description: String,
}

impl SlaPolicy {
    /// Policy used when a table has no rows at all.
    pub fn builtin_default() -> Self {
        Self {
            id: "sla-default".to_string(),
            case_type: CaseType::Exception,
            priority: CasePriority::Low,
            target_resolution_days: 30,
            warning_threshold_percent: 50,
            escalation_threshold_percent: 80,
            description: "Default policy for cases without a matching SLA".to_string(),
        }
    }

    fn standard(
        case_type: CaseType,
        priority: CasePriority,
        target_resolution_days: u32,
        warning_threshold_percent: u32,
        escalation_threshold_percent: u32,
        description: &str,
    ) -> Self {
        Self {
            id: format!(
                "sla-{}-{}",
                case_type.as_str().to_ascii_lowercase().replace('_', "-"),
                priority.as_str().to_ascii_lowercase()
            ),
            case_type,
            priority,
            target_resolution_days,
            warning_threshold_percent,
            escalation_threshold_percent,
            description: description.to_string(),
        }
    }
}

/// Errors loading or validating a policy table.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("failed to read policy file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid policy JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid policy YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("duplicate SLA policy for {case_type} / {priority}")]
    Duplicate {
        case_type: CaseType,
        priority: CasePriority,
    },

    #[error("policy {id}: warning threshold {warning}% is above escalation threshold {escalation}%")]
    Thresholds {
        id: String,
        warning: u32,
        escalation: u32,
    },
}

/// The set of SLA policies in force, plus the resolved fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable {
    policies: Vec<SlaPolicy>,
    fallback: SlaPolicy,
}

impl PolicyTable {
    /// Build a table from rows, rejecting duplicate keys and inverted
    /// thresholds.
    pub fn new(policies: Vec<SlaPolicy>) -> Result<Self, PolicyError> {
        let mut seen = HashSet::new();
        for policy in &policies {
            if !seen.insert((policy.case_type, policy.priority)) {
                return Err(PolicyError::Duplicate {
                    case_type: policy.case_type,
                    priority: policy.priority,
                });
            }
            if policy.warning_threshold_percent > policy.escalation_threshold_percent {
                return Err(PolicyError::Thresholds {
                    id: policy.id.clone(),
                    warning: policy.warning_threshold_percent,
                    escalation: policy.escalation_threshold_percent,
                });
            }
        }

        Ok(Self::with_widest_fallback(policies))
    }

    /// The governance team's standard SLA schedule.
    ///
    /// Not every `(type, priority)` pair is listed; low-priority territory,
    /// quota, and plan-modification cases resolve to the fallback.
    pub fn standard() -> Self {
        use CasePriority::*;
        use CaseType::*;

        let policies = vec![
            SlaPolicy::standard(Exception, Urgent, 2, 50, 80, "Urgent exceptions block payroll; resolve within 2 days"),
            SlaPolicy::standard(Exception, High, 5, 60, 80, "High-priority exception requests"),
            SlaPolicy::standard(Exception, Medium, 10, 70, 85, "Standard exception review cycle"),
            SlaPolicy::standard(Exception, Low, 15, 70, 90, "Low-impact policy interpretation requests"),
            SlaPolicy::standard(Dispute, Urgent, 3, 50, 75, "Disputes affecting the current pay period"),
            SlaPolicy::standard(Dispute, High, 5, 60, 80, "Commission calculation disputes with material impact"),
            SlaPolicy::standard(Dispute, Medium, 10, 70, 85, "Standard compensation disputes"),
            SlaPolicy::standard(Dispute, Low, 15, 70, 90, "Minor crediting disputes"),
            SlaPolicy::standard(TerritoryChange, Urgent, 5, 50, 80, "Territory changes with immediate quota impact"),
            SlaPolicy::standard(TerritoryChange, High, 10, 60, 80, "Mid-quarter territory reassignments"),
            SlaPolicy::standard(TerritoryChange, Medium, 15, 70, 85, "Planned coverage adjustments"),
            SlaPolicy::standard(QuotaAdjustment, Urgent, 5, 50, 80, "Quota relief needed before period close"),
            SlaPolicy::standard(QuotaAdjustment, High, 7, 60, 80, "Ramp extensions and territory-driven quota changes"),
            SlaPolicy::standard(QuotaAdjustment, Medium, 14, 70, 85, "Standard quota adjustment review"),
            SlaPolicy::standard(PlanModification, Urgent, 5, 50, 80, "Plan transitions for role changes effective immediately"),
            SlaPolicy::standard(PlanModification, High, 10, 60, 80, "Promotion and role-change plan updates"),
            SlaPolicy::standard(PlanModification, Medium, 20, 70, 85, "Planned mid-year plan modifications"),
        ];

        Self::with_widest_fallback(policies)
    }

    fn with_widest_fallback(policies: Vec<SlaPolicy>) -> Self {
        let fallback = policies
            .iter()
            .max_by_key(|p| p.target_resolution_days)
            .cloned()
            .unwrap_or_else(SlaPolicy::builtin_default);
        Self { policies, fallback }
    }

    /// Parse a JSON array of policies.
    pub fn from_json(raw: &str) -> Result<Self, PolicyError> {
        Self::new(serde_json::from_str(raw)?)
    }

    /// Parse a YAML sequence of policies.
    pub fn from_yaml(raw: &str) -> Result<Self, PolicyError> {
        Self::new(serde_yaml::from_str(raw)?)
    }

    /// Load a policy file. `.json` files are parsed as JSON, anything else
    /// as YAML.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&raw)
        } else {
            Self::from_yaml(&raw)
        }
    }

    /// Exact-match lookup.
    pub fn lookup(&self, case_type: CaseType, priority: CasePriority) -> Option<&SlaPolicy> {
        self.policies
            .iter()
            .find(|p| p.case_type == case_type && p.priority == priority)
    }

    /// Exact match, or the fallback policy.
    pub fn resolve(&self, case_type: CaseType, priority: CasePriority) -> &SlaPolicy {
        match self.lookup(case_type, priority) {
            Some(policy) => policy,
            None => {
                tracing::debug!(
                    case_type = %case_type,
                    priority = %priority,
                    fallback = %self.fallback.id,
                    "no SLA policy matched; using fallback"
                );
                &self.fallback
            }
        }
    }

    pub fn fallback(&self) -> &SlaPolicy {
        &self.fallback
    }

    pub fn policies(&self) -> &[SlaPolicy] {
        &self.policies
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(case_type: CaseType, priority: CasePriority, target: u32) -> SlaPolicy {
        SlaPolicy {
            id: format!("p-{case_type}-{priority}"),
            case_type,
            priority,
            target_resolution_days: target,
            warning_threshold_percent: 50,
            escalation_threshold_percent: 80,
            description: String::new(),
        }
    }

    #[test]
    fn standard_table_validates() {
        let table = PolicyTable::standard();
        assert!(PolicyTable::new(table.policies().to_vec()).is_ok());
        assert_eq!(table.policies().len(), 17);
    }

    #[test]
    fn standard_fallback_is_widest_target() {
        let table = PolicyTable::standard();
        let widest = table
            .policies()
            .iter()
            .map(|p| p.target_resolution_days)
            .max()
            .unwrap();
        assert_eq!(table.fallback().target_resolution_days, widest);
    }

    #[test]
    fn exact_lookup() {
        let table = PolicyTable::standard();
        let p = table.lookup(CaseType::Dispute, CasePriority::Urgent).unwrap();
        assert_eq!(p.target_resolution_days, 3);
        assert_eq!(p.id, "sla-dispute-urgent");
    }

    #[test]
    fn unmatched_key_resolves_to_fallback() {
        let table = PolicyTable::standard();
        assert!(table.lookup(CaseType::TerritoryChange, CasePriority::Low).is_none());
        let resolved = table.resolve(CaseType::TerritoryChange, CasePriority::Low);
        assert_eq!(resolved, table.fallback());
    }

    #[test]
    fn empty_table_uses_builtin_default() {
        let table = PolicyTable::new(Vec::new()).unwrap();
        let resolved = table.resolve(CaseType::Dispute, CasePriority::High);
        assert_eq!(resolved, &SlaPolicy::builtin_default());
    }

    #[test]
    fn duplicate_key_rejected() {
        let rows = vec![
            policy(CaseType::Dispute, CasePriority::High, 5),
            policy(CaseType::Dispute, CasePriority::High, 7),
        ];
        assert!(matches!(
            PolicyTable::new(rows),
            Err(PolicyError::Duplicate { .. })
        ));
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let mut row = policy(CaseType::Exception, CasePriority::Low, 10);
        row.warning_threshold_percent = 90;
        row.escalation_threshold_percent = 60;
        assert!(matches!(
            PolicyTable::new(vec![row]),
            Err(PolicyError::Thresholds { .. })
        ));
    }

    #[test]
    fn parses_yaml_rows() {
        let yaml = r#"
- id: quick-disputes
  caseType: DISPUTE
  priority: URGENT
  targetResolutionDays: 1
  warningThresholdPercent: 50
  escalationThresholdPercent: 75
"#;
        let table = PolicyTable::from_yaml(yaml).unwrap();
        let p = table.resolve(CaseType::Dispute, CasePriority::Urgent);
        assert_eq!(p.id, "quick-disputes");
        assert!(p.description.is_empty());
    }

    #[test]
    fn parses_json_rows() {
        let json = serde_json::to_string(PolicyTable::standard().policies()).unwrap();
        let table = PolicyTable::from_json(&json).unwrap();
        assert_eq!(table, PolicyTable::standard());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = PolicyTable::load(Path::new("/nonexistent/policies.yaml")).unwrap_err();
        assert!(matches!(err, PolicyError::Io { .. }));
    }
}
