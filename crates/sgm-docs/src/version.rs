//! # Document Versions

use serde::{Deserialize, Serialize};

use sgm_core::{SectionId, Timestamp, VersionId};

/// Review state of a document version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionStatus {
    Draft,
    InReview,
    Approved,
    Archived,
}

impl VersionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::InReview => "IN_REVIEW",
            Self::Approved => "APPROVED",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One section of a document version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSection {
    pub id: SectionId,
    pub title: String,
    pub content: String,
    pub order: u32,
}

/// A single version of a governed document (e.g. `SCP-001 v3.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersion {
    pub id: VersionId,
    pub document_code: String,
    pub version: String,
    pub title: String,
    pub status: VersionStatus,
    pub created_at: Timestamp,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub changes_summary: String,
    #[serde(default)]
    pub change_count: u32,
    #[serde(default)]
    pub sections: Vec<DocumentSection>,
}

impl DocumentVersion {
    pub fn section(&self, id: &SectionId) -> Option<&DocumentSection> {
        self.sections.iter().find(|s| &s.id == id)
    }
}

/// Counts for the version history header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionStats {
    pub total_versions: usize,
    /// Versions created in the 30 days before `now`.
    pub recent_updates: usize,
}

/// All known versions across documents.
#[derive(Debug, Clone, Default)]
pub struct VersionHistory {
    versions: Vec<DocumentVersion>,
}

impl VersionHistory {
    pub fn new(versions: Vec<DocumentVersion>) -> Self {
        Self { versions }
    }

    pub fn get(&self, id: &VersionId) -> Option<&DocumentVersion> {
        self.versions.iter().find(|v| &v.id == id)
    }

    pub fn all(&self) -> &[DocumentVersion] {
        &self.versions
    }

    /// Versions of one document, newest first.
    pub fn for_document(&self, document_code: &str) -> Vec<&DocumentVersion> {
        let mut versions: Vec<_> = self
            .versions
            .iter()
            .filter(|v| v.document_code == document_code)
            .collect();
        versions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        versions
    }

    /// Distinct document codes in first-seen order.
    pub fn document_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::new();
        for v in &self.versions {
            if !codes.contains(&v.document_code.as_str()) {
                codes.push(&v.document_code);
            }
        }
        codes
    }

    pub fn stats(&self, now: Timestamp) -> VersionStats {
        let cutoff = now.plus_days(-30);
        VersionStats {
            total_versions: self.versions.len(),
            recent_updates: self
                .versions
                .iter()
                .filter(|v| v.created_at >= cutoff)
                .count(),
        }
    }
}
