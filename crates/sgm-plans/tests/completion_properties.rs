//! Property tests for the plan completion rollup.

use proptest::prelude::*;

use sgm_core::{PlanId, SectionId};
use sgm_plans::{Plan, PlanSection, PlanStatus, SectionCompletionStatus};

const STATES: [SectionCompletionStatus; 5] = [
    SectionCompletionStatus::NotStarted,
    SectionCompletionStatus::InProgress,
    SectionCompletionStatus::Completed,
    SectionCompletionStatus::UnderReview,
    SectionCompletionStatus::Approved,
];

fn plan_from(states: &[(usize, bool)]) -> Plan {
    Plan {
        id: PlanId::new("plan-prop"),
        plan_code: "PLAN-PROP".into(),
        title: "Property plan".into(),
        status: PlanStatus::Draft,
        owner: String::new(),
        sections: states
            .iter()
            .enumerate()
            .map(|(i, (state, required))| PlanSection {
                id: SectionId::new(format!("s-{i}")),
                section_key: format!("key-{i}"),
                title: format!("Section {i}"),
                order_index: i as u32,
                is_required: *required,
                content: None,
                completion_status: STATES[*state],
                reviewed_by: None,
                review_comments: None,
            })
            .collect(),
    }
}

proptest! {
    #[test]
    fn percentage_is_bounded_and_counts_consistent(
        states in prop::collection::vec((0usize..5, any::<bool>()), 0..30),
    ) {
        let stats = plan_from(&states).completion();
        prop_assert!(stats.completion_percentage <= 100);
        prop_assert!(stats.sections_completed <= stats.sections_total);
        prop_assert!(stats.required_sections_completed <= stats.required_sections_total);
        prop_assert!(stats.required_sections_completed <= stats.sections_completed);
    }

    #[test]
    fn completing_every_section_reaches_full(
        states in prop::collection::vec((0usize..5, any::<bool>()), 1..30),
    ) {
        let mut plan = plan_from(&states);
        let ids: Vec<_> = plan.sections.iter().map(|s| s.id.clone()).collect();
        let mut last = None;
        for id in &ids {
            last = Some(plan.mark_section_complete(id).unwrap());
        }
        let stats = last.unwrap();
        prop_assert_eq!(stats.completion_percentage, 100);
        prop_assert!(stats.required_complete());
    }

    #[test]
    fn marking_complete_never_lowers_percentage(
        states in prop::collection::vec((0usize..5, any::<bool>()), 1..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut plan = plan_from(&states);
        let before = plan.completion().completion_percentage;
        let id = plan.sections[pick.index(plan.sections.len())].id.clone();
        let after = plan.mark_section_complete(&id).unwrap().completion_percentage;
        prop_assert!(after >= before);
    }
}
