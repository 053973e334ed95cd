//! # Version Diffs
//!
//! Section-level comparison of two document versions.
//!
//! ## Rules
//!
//! - Section only in the new version → one `addition` of its content.
//! - Section only in the old version → one `deletion` of its content.
//! - Section in both with different content → one change whose kind
//!   depends on length: new text more than 20 characters longer is an
//!   `addition`, more than 20 characters shorter a `deletion`, otherwise a
//!   `modification`. Both texts are carried.
//!
//! Sections are matched by id. Changed and added sections are reported in
//! the new version's order, then removed sections in the old version's
//! order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use sgm_core::{SectionId, VersionId};

use crate::version::{DocumentVersion, VersionHistory};

/// Length difference, in characters, beyond which a rewrite counts as an
/// expansion or a cut rather than a modification.
const LENGTH_DELTA: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Addition,
    Deletion,
    Modification,
}

impl ChangeKind {
    /// Gutter marker used when rendering.
    pub fn marker(&self) -> char {
        match self {
            Self::Addition => '+',
            Self::Deletion => '-',
            Self::Modification => '~',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub line_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// All changes to one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDiff {
    pub section_id: SectionId,
    pub section_title: String,
    pub changes: Vec<Change>,
}

/// Compare two versions section by section.
pub fn compare_versions(old: &DocumentVersion, new: &DocumentVersion) -> Vec<VersionDiff> {
    let mut diffs = Vec::new();

    for new_section in &new.sections {
        match old.section(&new_section.id) {
            None => diffs.push(VersionDiff {
                section_id: new_section.id.clone(),
                section_title: new_section.title.clone(),
                changes: vec![Change {
                    kind: ChangeKind::Addition,
                    line_number: 1,
                    old_text: None,
                    new_text: Some(new_section.content.clone()),
                    context: Some("Entire section added".into()),
                }],
            }),
            Some(old_section) if old_section.content != new_section.content => {
                diffs.push(VersionDiff {
                    section_id: new_section.id.clone(),
                    section_title: new_section.title.clone(),
                    changes: vec![content_change(&old_section.content, &new_section.content)],
                });
            }
            Some(_) => {}
        }
    }

    for old_section in &old.sections {
        if new.section(&old_section.id).is_none() {
            diffs.push(VersionDiff {
                section_id: old_section.id.clone(),
                section_title: old_section.title.clone(),
                changes: vec![Change {
                    kind: ChangeKind::Deletion,
                    line_number: 1,
                    old_text: Some(old_section.content.clone()),
                    new_text: None,
                    context: Some("Entire section removed".into()),
                }],
            });
        }
    }

    diffs
}

fn content_change(old_text: &str, new_text: &str) -> Change {
    let old_len = old_text.chars().count();
    let new_len = new_text.chars().count();

    let (kind, context) = if new_len > old_len + LENGTH_DELTA {
        (ChangeKind::Addition, "Content expanded with additional details")
    } else if old_len > new_len + LENGTH_DELTA {
        (ChangeKind::Deletion, "Content shortened or removed")
    } else {
        (ChangeKind::Modification, "Content modified")
    };

    Change {
        kind,
        line_number: 1,
        old_text: Some(old_text.to_string()),
        new_text: Some(new_text.to_string()),
        context: Some(context.to_string()),
    }
}

/// Precomputed diffs keyed by `(old version, new version)`.
#[derive(Debug, Clone, Default)]
pub struct DiffCatalog {
    entries: HashMap<(VersionId, VersionId), Vec<VersionDiff>>,
}

impl DiffCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a diff for a version pair, replacing any existing entry.
    pub fn insert(&mut self, old: VersionId, new: VersionId, diffs: Vec<VersionDiff>) {
        self.entries.insert((old, new), diffs);
    }

    /// Diffs for a pair, if one was registered.
    pub fn lookup(&self, old: &VersionId, new: &VersionId) -> Option<&[VersionDiff]> {
        self.entries
            .get(&(old.clone(), new.clone()))
            .map(Vec::as_slice)
    }

    /// Registered diffs for a pair, computing them from `history` when the
    /// pair is not in the catalog. Unknown version ids give an empty diff.
    pub fn lookup_or_compare(
        &self,
        history: &VersionHistory,
        old: &VersionId,
        new: &VersionId,
    ) -> Vec<VersionDiff> {
        if let Some(diffs) = self.lookup(old, new) {
            return diffs.to_vec();
        }
        match (history.get(old), history.get(new)) {
            (Some(old_version), Some(new_version)) => compare_versions(old_version, new_version),
            _ => {
                tracing::debug!(old = %old, new = %new, "diff requested for unknown version");
                Vec::new()
            }
        }
    }

    /// Precompute diffs between consecutive versions of every document.
    pub fn from_history(history: &VersionHistory) -> Self {
        let mut catalog = Self::new();
        for code in history.document_codes() {
            let mut versions = history.for_document(code);
            versions.reverse();
            for pair in versions.windows(2) {
                let (old, new) = (pair[0], pair[1]);
                catalog.insert(old.id.clone(), new.id.clone(), compare_versions(old, new));
            }
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
