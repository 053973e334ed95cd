//! Plan completion rollup.

use serde::{Deserialize, Serialize};

use sgm_core::PlanId;

use crate::plan::Plan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCompletionStats {
    pub plan_id: PlanId,
    /// Rounded share of complete sections, 0 for a plan with no sections.
    pub completion_percentage: u32,
    pub sections_completed: usize,
    pub sections_total: usize,
    pub required_sections_completed: usize,
    pub required_sections_total: usize,
}

impl PlanCompletionStats {
    pub fn for_plan(plan: &Plan) -> Self {
        let sections_total = plan.sections.len();
        let sections_completed = plan
            .sections
            .iter()
            .filter(|s| s.completion_status.is_complete())
            .count();
        let required_sections_total = plan.sections.iter().filter(|s| s.is_required).count();
        let required_sections_completed = plan
            .sections
            .iter()
            .filter(|s| s.is_required && s.completion_status.is_complete())
            .count();

        Self {
            plan_id: plan.id.clone(),
            completion_percentage: percent(sections_completed, sections_total),
            sections_completed,
            sections_total,
            required_sections_completed,
            required_sections_total,
        }
    }

    /// Whether every required section is complete.
    pub fn required_complete(&self) -> bool {
        self.required_sections_completed == self.required_sections_total
    }
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * part as f64 / total as f64).round() as u32
}
