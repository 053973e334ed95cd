//! # Assignee Load
//!
//! Per-assignee view of open work: how many cases, how urgent, how many
//! are slipping, and a capacity percentage.
//!
//! Capacity weighs each active case by priority against a nominal number
//! of case units one person can carry:
//!
//! | Priority | Units |
//! |----------|-------|
//! | LOW      | 0.5   |
//! | MEDIUM   | 1.0   |
//! | HIGH     | 1.5   |
//! | URGENT   | 2.0   |
//!
//! With the default nominal capacity of 5 units, two medium cases are 40%
//! and three high plus three medium cases are 150%.

use serde::{Deserialize, Serialize};

use sgm_core::{Case, CasePriority, Timestamp};

use crate::evaluation::{SlaCalculator, SlaStatus};

/// Nominal case units per assignee.
pub const DEFAULT_NOMINAL_UNITS: f64 = 5.0;

/// Workload band derived from capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Workload {
    Under,
    Optimal,
    High,
    Over,
}

impl Workload {
    /// Band a capacity percentage: `<70` UNDER, `<=100` OPTIMAL,
    /// `<=130` HIGH, otherwise OVER.
    pub fn from_capacity(capacity: u32) -> Self {
        match capacity {
            0..=69 => Self::Under,
            70..=100 => Self::Optimal,
            101..=130 => Self::High,
            _ => Self::Over,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under => "UNDER",
            Self::Optimal => "OPTIMAL",
            Self::High => "HIGH",
            Self::Over => "OVER",
        }
    }
}

impl std::fmt::Display for Workload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How case priority translates into capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityModel {
    pub nominal_units: f64,
}

impl CapacityModel {
    pub fn new(nominal_units: f64) -> Self {
        Self { nominal_units }
    }

    /// Units one case of `priority` consumes.
    pub fn weight(&self, priority: CasePriority) -> f64 {
        match priority {
            CasePriority::Low => 0.5,
            CasePriority::Medium => 1.0,
            CasePriority::High => 1.5,
            CasePriority::Urgent => 2.0,
        }
    }

    /// Rounded percentage of nominal capacity that `units` represents.
    /// A non-positive nominal capacity reports 0.
    pub fn percent(&self, units: f64) -> u32 {
        if self.nominal_units <= 0.0 || !self.nominal_units.is_finite() {
            return 0;
        }
        (100.0 * units / self.nominal_units).round().max(0.0) as u32
    }
}

impl Default for CapacityModel {
    fn default() -> Self {
        Self::new(DEFAULT_NOMINAL_UNITS)
    }
}

/// Open-work summary for one assignee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeLoad {
    pub assignee_name: String,
    pub active_cases: usize,
    pub urgent_cases: usize,
    pub high_priority_cases: usize,
    pub at_risk_cases: usize,
    pub breached_cases: usize,
    /// Mean days the assignee's active cases have been open, one decimal.
    pub avg_resolution_days: f64,
    pub capacity: u32,
    pub workload: Workload,
}

impl SlaCalculator {
    /// Aggregate the named assignee's active cases.
    ///
    /// Resolved and closed cases are excluded. An assignee with no active
    /// cases reports zeros and `UNDER`.
    pub fn calculate_assignee_load(
        &self,
        all_cases: &[Case],
        assignee_name: &str,
        now: Timestamp,
    ) -> AssigneeLoad {
        let mut load = AssigneeLoad {
            assignee_name: assignee_name.to_string(),
            active_cases: 0,
            urgent_cases: 0,
            high_priority_cases: 0,
            at_risk_cases: 0,
            breached_cases: 0,
            avg_resolution_days: 0.0,
            capacity: 0,
            workload: Workload::Under,
        };

        let mut units = 0.0;
        let mut total_days: i64 = 0;

        for case in all_cases
            .iter()
            .filter(|c| c.is_assigned_to(assignee_name) && c.is_active())
        {
            load.active_cases += 1;
            units += self.capacity.weight(case.priority);
            match case.priority {
                CasePriority::Urgent => load.urgent_cases += 1,
                CasePriority::High => load.high_priority_cases += 1,
                CasePriority::Medium | CasePriority::Low => {}
            }

            let sla = self.calculate_case_sla(case, now);
            total_days += sla.days_elapsed;
            match sla.status {
                SlaStatus::AtRisk => load.at_risk_cases += 1,
                SlaStatus::Breached => load.breached_cases += 1,
                SlaStatus::OnTrack => {}
            }
        }

        if load.active_cases > 0 {
            let mean = total_days as f64 / load.active_cases as f64;
            load.avg_resolution_days = (mean * 10.0).round() / 10.0;
        }
        load.capacity = self.capacity.percent(units);
        load.workload = Workload::from_capacity(load.capacity);
        load
    }

    /// Loads for several assignees, in the order given.
    pub fn assignee_loads(
        &self,
        all_cases: &[Case],
        assignee_names: &[String],
        now: Timestamp,
    ) -> Vec<AssigneeLoad> {
        assignee_names
            .iter()
            .map(|name| self.calculate_assignee_load(all_cases, name, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgm_core::{CaseId, CaseStatus, CaseType};

    fn now() -> Timestamp {
        Timestamp::parse("2026-03-20T12:00:00Z").unwrap()
    }

    fn case(assignee: &str, priority: CasePriority, status: CaseStatus, days_ago: i64) -> Case {
        Case {
            id: CaseId::generate(),
            case_number: "CASE".into(),
            case_type: CaseType::Dispute,
            status,
            priority,
            assigned_to: Some(assignee.into()),
            created_at: now().plus_days(-days_ago),
            title: "t".into(),
        }
    }

    #[test]
    fn workload_bands() {
        assert_eq!(Workload::from_capacity(0), Workload::Under);
        assert_eq!(Workload::from_capacity(69), Workload::Under);
        assert_eq!(Workload::from_capacity(70), Workload::Optimal);
        assert_eq!(Workload::from_capacity(100), Workload::Optimal);
        assert_eq!(Workload::from_capacity(101), Workload::High);
        assert_eq!(Workload::from_capacity(130), Workload::High);
        assert_eq!(Workload::from_capacity(131), Workload::Over);
    }

    #[test]
    fn counts_only_active_cases_of_the_assignee() {
        let cases = vec![
            case("Ana", CasePriority::Urgent, CaseStatus::New, 1),
            case("Ana", CasePriority::High, CaseStatus::UnderReview, 1),
            case("Ana", CasePriority::Medium, CaseStatus::Resolved, 1),
            case("Ana", CasePriority::Low, CaseStatus::Closed, 1),
            case("Ben", CasePriority::Urgent, CaseStatus::New, 1),
        ];
        let load = SlaCalculator::default().calculate_assignee_load(&cases, "Ana", now());
        assert_eq!(load.active_cases, 2);
        assert_eq!(load.urgent_cases, 1);
        assert_eq!(load.high_priority_cases, 1);
        // 2.0 + 1.5 units of 5
        assert_eq!(load.capacity, 70);
        assert_eq!(load.workload, Workload::Optimal);
    }

    #[test]
    fn counts_sla_slippage() {
        // Standard DISPUTE/HIGH target is 5 days, escalation at 80%.
        let cases = vec![
            case("Ana", CasePriority::High, CaseStatus::New, 1),
            case("Ana", CasePriority::High, CaseStatus::New, 4),
            case("Ana", CasePriority::High, CaseStatus::New, 9),
        ];
        let load = SlaCalculator::default().calculate_assignee_load(&cases, "Ana", now());
        assert_eq!(load.at_risk_cases, 1);
        assert_eq!(load.breached_cases, 1);
        assert!((load.avg_resolution_days - 4.7).abs() < 1e-9);
    }

    #[test]
    fn unknown_assignee_is_empty_and_under() {
        let load = SlaCalculator::default().calculate_assignee_load(&[], "Nobody", now());
        assert_eq!(load.active_cases, 0);
        assert_eq!(load.capacity, 0);
        assert_eq!(load.avg_resolution_days, 0.0);
        assert_eq!(load.workload, Workload::Under);
    }

    #[test]
    fn zero_nominal_capacity_reports_zero() {
        let calc = SlaCalculator::default().with_capacity_model(CapacityModel::new(0.0));
        let cases = vec![case("Ana", CasePriority::Urgent, CaseStatus::New, 1)];
        assert_eq!(calc.calculate_assignee_load(&cases, "Ana", now()).capacity, 0);
    }

    #[test]
    fn load_is_idempotent() {
        let cases = vec![
            case("Ana", CasePriority::Urgent, CaseStatus::New, 3),
            case("Ana", CasePriority::Low, CaseStatus::Escalated, 12),
        ];
        let calc = SlaCalculator::default();
        let first = calc.calculate_assignee_load(&cases, "Ana", now());
        let second = calc.calculate_assignee_load(&cases, "Ana", now());
        assert_eq!(first, second);
    }
}
