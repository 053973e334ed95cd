//! # SLA Overview
//!
//! Dashboard roll-ups over all active cases: status counts, compliance
//! rate, urgency ordering, and the distinct assignee list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use sgm_core::{Case, Timestamp};

use crate::evaluation::{SlaCalculator, SlaEvaluation, SlaStatus};

/// A case paired with its SLA evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedCase {
    pub case: Case,
    pub sla: SlaEvaluation,
}

/// Status counts across active cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaOverview {
    pub total: usize,
    pub on_track: usize,
    pub at_risk: usize,
    pub breached: usize,
    pub should_escalate: usize,
    /// Rounded percentage of cases on track; 0 when there are none.
    pub compliance_rate: u32,
}

impl SlaOverview {
    pub fn from_evaluations(evaluated: &[EvaluatedCase]) -> Self {
        let mut overview = Self {
            total: evaluated.len(),
            ..Self::default()
        };
        for entry in evaluated {
            match entry.sla.status {
                SlaStatus::OnTrack => overview.on_track += 1,
                SlaStatus::AtRisk => overview.at_risk += 1,
                SlaStatus::Breached => overview.breached += 1,
            }
            if entry.sla.should_escalate {
                overview.should_escalate += 1;
            }
        }
        overview.compliance_rate = percent_of(overview.on_track, overview.total);
        overview
    }

    /// Rounded share of the total with `status`.
    pub fn share(&self, status: SlaStatus) -> u32 {
        let count = match status {
            SlaStatus::OnTrack => self.on_track,
            SlaStatus::AtRisk => self.at_risk,
            SlaStatus::Breached => self.breached,
        };
        percent_of(count, self.total)
    }
}

fn percent_of(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        (100.0 * part as f64 / whole as f64).round() as u32
    }
}

impl SlaCalculator {
    /// Evaluate every active case. Resolved and closed cases are skipped.
    pub fn evaluate_active(&self, cases: &[Case], now: Timestamp) -> Vec<EvaluatedCase> {
        cases
            .iter()
            .filter(|c| c.is_active())
            .map(|c| EvaluatedCase {
                case: c.clone(),
                sla: self.calculate_case_sla(c, now),
            })
            .collect()
    }
}

/// Order by urgency: breached, then at-risk, then on-track; within a
/// status, higher percent elapsed first.
pub fn rank_by_urgency(evaluated: &mut [EvaluatedCase]) {
    evaluated.sort_by(|a, b| {
        a.sla
            .status
            .urgency_rank()
            .cmp(&b.sla.status.urgency_rank())
            .then_with(|| b.sla.percent_elapsed.total_cmp(&a.sla.percent_elapsed))
    });
}

/// Distinct assignee names in first-seen order. Unassigned cases and
/// empty names are skipped.
pub fn distinct_assignees(cases: &[Case]) -> Vec<String> {
    let mut seen = HashSet::new();
    cases
        .iter()
        .filter_map(|c| c.assigned_to.as_deref())
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgm_core::{CaseId, CasePriority, CaseStatus, CaseType};

    fn now() -> Timestamp {
        Timestamp::parse("2026-03-20T12:00:00Z").unwrap()
    }

    fn case(id: &str, assignee: Option<&str>, status: CaseStatus, days_ago: i64) -> Case {
        Case {
            id: CaseId::new(id),
            case_number: id.to_uppercase(),
            case_type: CaseType::Dispute,
            status,
            priority: CasePriority::Medium,
            assigned_to: assignee.map(str::to_string),
            created_at: now().plus_days(-days_ago),
            title: id.into(),
        }
    }

    #[test]
    fn empty_overview_has_zero_compliance() {
        let overview = SlaOverview::from_evaluations(&[]);
        assert_eq!(overview.total, 0);
        assert_eq!(overview.compliance_rate, 0);
        assert_eq!(overview.share(SlaStatus::Breached), 0);
    }

    #[test]
    fn overview_counts_and_ranking() {
        // DISPUTE/MEDIUM: 10 days, escalation 85%.
        let cases = vec![
            case("a", Some("Ana"), CaseStatus::New, 1),
            case("b", Some("Ana"), CaseStatus::New, 9),
            case("c", Some("Ben"), CaseStatus::New, 12),
            case("d", Some("Ben"), CaseStatus::New, 3),
            case("e", Some("Ben"), CaseStatus::Resolved, 40),
        ];
        let calc = SlaCalculator::default();
        let mut evaluated = calc.evaluate_active(&cases, now());
        assert_eq!(evaluated.len(), 4);

        let overview = SlaOverview::from_evaluations(&evaluated);
        assert_eq!(overview.on_track, 2);
        assert_eq!(overview.at_risk, 1);
        assert_eq!(overview.breached, 1);
        assert_eq!(overview.should_escalate, 1);
        assert_eq!(overview.compliance_rate, 50);

        rank_by_urgency(&mut evaluated);
        let order: Vec<_> = evaluated.iter().map(|e| e.case.id.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn distinct_assignees_first_seen_order() {
        let cases = vec![
            case("a", Some("Ben"), CaseStatus::New, 0),
            case("b", None, CaseStatus::New, 0),
            case("c", Some("Ana"), CaseStatus::Closed, 0),
            case("d", Some("Ben"), CaseStatus::New, 0),
            case("e", Some(""), CaseStatus::New, 0),
        ];
        assert_eq!(distinct_assignees(&cases), vec!["Ben", "Ana"]);
    }
}
