//! # sgm-docs: Document Versions and Diffs
//!
//! Policy and plan documents are versioned. Reviewers compare two versions
//! section by section before approving.
//!
//! - `version.rs`: version records and per-document history.
//! - `diff.rs`: section-level comparison and the diff catalog keyed by
//!   `(old version, new version)`.
//! - `render.rs`: plain-text presentation of a diff.
//!
//! Diffs are coarse on purpose: a changed section is reported as one
//! addition, deletion, or modification of its whole content. There is no
//! line-level text diff.

pub mod diff;
pub mod render;
pub mod version;

pub use diff::{compare_versions, Change, ChangeKind, DiffCatalog, VersionDiff};
pub use render::render_diff;
pub use version::{DocumentSection, DocumentVersion, VersionHistory, VersionStats, VersionStatus};
