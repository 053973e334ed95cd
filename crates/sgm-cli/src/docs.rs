//! # Docs Subcommand
//!
//! - `history`: versions of one document, newest first.
//! - `diff`: section-level diff between two versions.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use sgm_core::{Timestamp, VersionId};
use sgm_docs::{render_diff, DiffCatalog, DocumentVersion, VersionHistory};

use crate::config::SgmConfig;
use crate::{records_or_provider, resolve_now, to_pretty_json};

#[derive(Args, Debug)]
pub struct DocsArgs {
    #[command(subcommand)]
    pub command: DocsCommand,
}

#[derive(Subcommand, Debug)]
pub enum DocsCommand {
    /// List the versions of a document.
    History {
        /// Document code (e.g. SCP-001).
        #[arg(long)]
        document: String,
        /// JSON array of document versions. Defaults to the version provider.
        #[arg(long)]
        versions: Option<PathBuf>,
        /// Reference time for the recent-updates count.
        #[arg(long)]
        now: Option<Timestamp>,
        #[arg(long)]
        json: bool,
    },

    /// Compare two versions section by section.
    Diff {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        versions: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run_docs(args: &DocsArgs, config: &SgmConfig) -> Result<u8> {
    match &args.command {
        DocsCommand::History {
            document,
            versions,
            now,
            json,
        } => {
            let history = load_history(versions.as_deref(), config)?;
            let listed = history.for_document(document);
            if *json {
                println!("{}", to_pretty_json(&listed)?);
            } else {
                print!("{}", format_history(&history, document, resolve_now(*now)));
            }
            Ok(0)
        }

        DocsCommand::Diff {
            old,
            new,
            versions,
            json,
        } => {
            let history = load_history(versions.as_deref(), config)?;
            let catalog = DiffCatalog::from_history(&history);
            let diffs = catalog.lookup_or_compare(
                &history,
                &VersionId::new(old.as_str()),
                &VersionId::new(new.as_str()),
            );
            if *json {
                println!("{}", to_pretty_json(&diffs)?);
            } else {
                print!("{}", render_diff(&diffs));
            }
            Ok(0)
        }
    }
}

fn load_history(path: Option<&Path>, config: &SgmConfig) -> Result<VersionHistory> {
    let versions: Vec<DocumentVersion> =
        records_or_provider(path, || Ok(config.providers()?.versions))?;
    Ok(VersionHistory::new(versions))
}

pub fn format_history(history: &VersionHistory, document: &str, now: Timestamp) -> String {
    let versions = history.for_document(document);
    if versions.is_empty() {
        return format!("No versions found for {document}.\n");
    }
    let mut out = String::new();
    let stats = history.stats(now);
    let _ = writeln!(
        out,
        "{document}: {} version(s); {} update(s) across all documents in the last 30 days",
        versions.len(),
        stats.recent_updates
    );
    for v in versions {
        let _ = writeln!(
            out,
            "  {:<12} {:<6} {:<9} {}  by {}  ({} change(s)) {}",
            v.id.as_str(),
            v.version,
            v.status.as_str(),
            v.created_at,
            v.created_by,
            v.change_count,
            v.changes_summary
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> VersionHistory {
        let raw = r#"[
            {"id": "d-v1", "documentCode": "SCP-002", "version": "v1.0", "title": "T",
             "status": "ARCHIVED", "createdAt": "2025-01-01T00:00:00", "createdBy": "Emily Davis",
             "changesSummary": "Initial version"},
            {"id": "d-v2", "documentCode": "SCP-002", "version": "v2.0", "title": "T",
             "status": "APPROVED", "createdAt": "2025-12-01T00:00:00", "createdBy": "David Lee",
             "changesSummary": "Payment timing", "changeCount": 3}
        ]"#;
        VersionHistory::new(serde_json::from_str(raw).unwrap())
    }

    #[test]
    fn history_lists_newest_first() {
        let now = Timestamp::parse("2025-12-10T00:00:00Z").unwrap();
        let text = format_history(&history(), "SCP-002", now);
        assert!(text.starts_with("SCP-002: 2 version(s); 1 update(s)"));
        assert!(text.find("d-v2").unwrap() < text.find("d-v1").unwrap());
        assert!(text.contains("APPROVED"));
    }

    #[test]
    fn unknown_document() {
        let text = format_history(&history(), "SCP-404", Timestamp::now());
        assert_eq!(text, "No versions found for SCP-404.\n");
    }
}
