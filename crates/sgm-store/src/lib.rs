//! # sgm-store: In-Memory Providers
//!
//! Case, document-version, and plan providers behind one narrow
//! [`Repository`] interface. Providers start empty unless
//! [`ProviderConfig::enable_demo_data`] is set, in which case they are
//! seeded from fixtures compiled into the crate.
//!
//! Nothing here persists. Durable storage is out of scope for this
//! workspace.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod repository;

pub use config::{ConfigError, ProviderConfig, DEMO_DATA_VAR};
pub use error::StoreError;
pub use repository::{MemoryRepository, Record, RecordId, Repository};

use sgm_core::{Case, PlanId, SectionId};
use sgm_docs::{DocumentVersion, VersionHistory};
use sgm_plans::{Plan, PlanCompletionStats};

/// The full set of providers used by the governance tools.
#[derive(Debug, Clone, Default)]
pub struct Providers {
    pub cases: MemoryRepository<Case>,
    pub versions: MemoryRepository<DocumentVersion>,
    pub plans: MemoryRepository<Plan>,
}

impl Providers {
    pub fn new(config: &ProviderConfig) -> Result<Self, StoreError> {
        if !config.enable_demo_data {
            return Ok(Self::default());
        }
        let providers = Self {
            cases: MemoryRepository::seeded(fixtures::demo_cases()?),
            versions: MemoryRepository::seeded(fixtures::demo_versions()?),
            plans: MemoryRepository::seeded(fixtures::demo_plans()?),
        };
        tracing::info!(
            cases = providers.cases.len(),
            versions = providers.versions.len(),
            plans = providers.plans.len(),
            "providers seeded with demo data"
        );
        Ok(providers)
    }

    /// Snapshot of every stored document version.
    pub fn version_history(&self) -> VersionHistory {
        VersionHistory::new(self.versions.find_all())
    }

    /// Mark a plan section complete and return the plan's new rollup.
    pub fn mark_section_complete(
        &self,
        plan_id: &PlanId,
        section_id: &SectionId,
    ) -> Result<PlanCompletionStats, StoreError> {
        self.plans
            .try_update(plan_id, |plan| plan.mark_section_complete(section_id))
            .ok_or_else(|| StoreError::NotFound {
                kind: Plan::KIND,
                id: plan_id.to_string(),
            })?
            .map_err(StoreError::from)
    }

    pub fn plan_completion(&self, plan_id: &PlanId) -> Result<PlanCompletionStats, StoreError> {
        self.plans
            .find_by_id(plan_id)
            .map(|plan| plan.completion())
            .ok_or_else(|| StoreError::NotFound {
                kind: Plan::KIND,
                id: plan_id.to_string(),
            })
    }
}
