//! # Assignment Optimizer
//!
//! Greedy pick of who should take the next case: lowest capacity wins,
//! fewest urgent cases breaks ties, then name order for determinism.
//!
//! `confidence` is a presentation figure, not a probability. It grows with
//! the capacity gap to the runner-up: `clamp(60 + gap / 2, 60, 95)`, and a
//! sole candidate scores 95.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use sgm_core::{Case, CasePriority, Timestamp};

use crate::evaluation::SlaCalculator;
use crate::load::{AssigneeLoad, Workload};

const MIN_CONFIDENCE: u32 = 60;
const MAX_CONFIDENCE: u32 = 95;

/// Who should take the next case, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSuggestion {
    pub assignee: String,
    pub reason: String,
    /// 60..=95.
    pub confidence: u32,
    /// The assignee's capacity once the new case is added.
    pub projected_capacity: u32,
}

impl SlaCalculator {
    /// Suggest an assignee for a new case of `new_case_priority`.
    ///
    /// Returns `None` when there are no candidates. Duplicate names are
    /// considered once.
    pub fn suggest_optimal_assignment(
        &self,
        all_cases: &[Case],
        assignee_names: &[String],
        new_case_priority: CasePriority,
        now: Timestamp,
    ) -> Option<AssignmentSuggestion> {
        let mut seen = HashSet::new();
        let mut loads: Vec<AssigneeLoad> = assignee_names
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .map(|name| self.calculate_assignee_load(all_cases, name, now))
            .collect();

        loads.sort_by(|a, b| {
            a.capacity
                .cmp(&b.capacity)
                .then(a.urgent_cases.cmp(&b.urgent_cases))
                .then_with(|| a.assignee_name.cmp(&b.assignee_name))
        });

        let best = loads.first()?;
        let runner_up = loads.get(1);

        let confidence = match runner_up {
            None => MAX_CONFIDENCE,
            Some(next) => {
                let gap = next.capacity.saturating_sub(best.capacity);
                (MIN_CONFIDENCE + gap / 2).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
            }
        };

        let new_units = self.capacity.weight(new_case_priority);
        let projected_capacity = best
            .capacity
            .saturating_add(self.capacity.percent(new_units));

        let mut reason = match runner_up {
            None => format!(
                "Only available assignee; currently at {}% capacity with {} urgent case(s)",
                best.capacity, best.urgent_cases
            ),
            Some(_) => format!(
                "Lowest load among {} candidates: {}% capacity with {} urgent case(s)",
                loads.len(),
                best.capacity,
                best.urgent_cases
            ),
        };
        reason.push_str(&format!(
            "; a new {new_case_priority} case brings them to {projected_capacity}%"
        ));
        if best.workload == Workload::Over {
            reason.push_str("; every candidate is over capacity");
        }

        tracing::debug!(
            assignee = %best.assignee_name,
            capacity = best.capacity,
            confidence,
            candidates = loads.len(),
            "assignment suggestion computed"
        );

        Some(AssignmentSuggestion {
            assignee: best.assignee_name.clone(),
            reason,
            confidence,
            projected_capacity,
        })
    }
}
