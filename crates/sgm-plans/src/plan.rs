//! # Plans and Plan Sections
//!
//! Section updates go through [`Plan`] so the plan-level rollup is always
//! recomputed from the current section states. Every mutating operation
//! returns the fresh [`PlanCompletionStats`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sgm_core::{PlanId, SectionId};

use crate::completion::PlanCompletionStats;

/// Lifecycle of a plan instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    Draft,
    InProgress,
    UnderReview,
    PendingApproval,
    Approved,
    Published,
    Superseded,
    Archived,
}

/// Drafting state of a single section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionCompletionStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    UnderReview,
    Approved,
}

impl SectionCompletionStatus {
    /// Only `COMPLETED` counts toward the rollup. A section that has gone
    /// on to review, approved or not, is no longer counted.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::UnderReview => "UNDER_REVIEW",
            Self::Approved => "APPROVED",
        }
    }
}

impl std::fmt::Display for SectionCompletionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSection {
    pub id: SectionId,
    #[serde(default)]
    pub section_key: String,
    pub title: String,
    #[serde(default)]
    pub order_index: u32,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub completion_status: SectionCompletionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_comments: Option<String>,
}

/// A compensation plan instance and its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: PlanId,
    pub plan_code: String,
    pub title: String,
    pub status: PlanStatus,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub sections: Vec<PlanSection>,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("section {section} not found in plan {plan}")]
    SectionNotFound { plan: PlanId, section: SectionId },
}

impl Plan {
    pub fn section(&self, id: &SectionId) -> Option<&PlanSection> {
        self.sections.iter().find(|s| &s.id == id)
    }

    fn section_mut(&mut self, id: &SectionId) -> Result<&mut PlanSection, PlanError> {
        let plan = self.id.clone();
        self.sections
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| PlanError::SectionNotFound {
                plan,
                section: id.clone(),
            })
    }

    /// Sections in drafting order.
    pub fn ordered_sections(&self) -> Vec<&PlanSection> {
        let mut sections: Vec<_> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order_index);
        sections
    }

    pub fn completion(&self) -> PlanCompletionStats {
        PlanCompletionStats::for_plan(self)
    }

    /// Mark a section `COMPLETED` and return the updated rollup.
    pub fn mark_section_complete(
        &mut self,
        section_id: &SectionId,
    ) -> Result<PlanCompletionStats, PlanError> {
        let section = self.section_mut(section_id)?;
        section.completion_status = SectionCompletionStatus::Completed;
        tracing::debug!(plan = %self.id, section = %section_id, "section marked complete");
        Ok(self.completion())
    }

    /// Replace a section's content.
    ///
    /// With `auto_complete`, non-blank content marks the section
    /// `COMPLETED`. Otherwise its status is left as is.
    pub fn update_section_content(
        &mut self,
        section_id: &SectionId,
        content: impl Into<String>,
        auto_complete: bool,
    ) -> Result<PlanCompletionStats, PlanError> {
        let section = self.section_mut(section_id)?;
        let content = content.into();
        let has_content = !content.trim().is_empty();
        section.content = Some(content);
        if auto_complete && has_content {
            section.completion_status = SectionCompletionStatus::Completed;
        }
        Ok(self.completion())
    }

    /// Record a review decision: approval moves the section to `APPROVED`,
    /// anything else sends it back to `UNDER_REVIEW`.
    pub fn review_section(
        &mut self,
        section_id: &SectionId,
        reviewer: impl Into<String>,
        approved: bool,
        comments: Option<String>,
    ) -> Result<PlanCompletionStats, PlanError> {
        let section = self.section_mut(section_id)?;
        section.reviewed_by = Some(reviewer.into());
        section.review_comments = comments;
        section.completion_status = if approved {
            SectionCompletionStatus::Approved
        } else {
            SectionCompletionStatus::UnderReview
        };
        Ok(self.completion())
    }
}
