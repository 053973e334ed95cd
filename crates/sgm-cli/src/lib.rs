//! # sgm-cli: Command Line for SGM Governance
//!
//! Provides the `sgm` binary.
//!
//! ## Subcommands
//!
//! - `sgm sla`: SLA report, policy table, assignee load, assignment
//!   suggestions.
//! - `sgm docs`: document version history and version diffs.
//! - `sgm plans`: plan completion rollups.
//!
//! Input records come from JSON files passed on the command line, or from
//! the demo fixtures when demo data is enabled (`enable_demo_data` in the
//! config file, or `SGM_ENABLE_DEMO_DATA=true`).
//!
//! ```bash
//! sgm sla report --cases cases.json --now 2025-12-18T12:00:00Z
//! SGM_ENABLE_DEMO_DATA=1 sgm sla assign --priority urgent
//! sgm docs diff --old ver-001-v2 --new ver-001-v3 --versions versions.json
//! ```

pub mod config;
pub mod docs;
pub mod plans;
pub mod sla;

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use sgm_core::Timestamp;
use sgm_store::{Record, Repository};

pub use config::SgmConfig;

/// Read a JSON array of records from `path`.
pub fn load_json_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Records from `path` if given, otherwise everything in the repository
/// built by `provider`. The provider is only built when there is no file.
pub fn records_or_provider<T, R>(
    path: Option<&Path>,
    provider: impl FnOnce() -> Result<R>,
) -> Result<Vec<T>>
where
    T: Record + DeserializeOwned,
    R: Repository<T>,
{
    match path {
        Some(path) => load_json_records(path),
        None => {
            let records = provider()?.find_all();
            if records.is_empty() {
                tracing::warn!(
                    kind = T::KIND,
                    "no {} records: pass a file or enable demo data",
                    T::KIND
                );
            }
            Ok(records)
        }
    }
}

/// `--now` if given, otherwise the current time.
pub fn resolve_now(now: Option<Timestamp>) -> Timestamp {
    now.unwrap_or_else(Timestamp::now)
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}
