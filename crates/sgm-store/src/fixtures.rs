//! Embedded demo fixtures.

use serde::de::DeserializeOwned;

use sgm_core::Case;
use sgm_docs::DocumentVersion;
use sgm_plans::Plan;

use crate::error::StoreError;

const CASES: &str = include_str!("../fixtures/cases.json");
const VERSIONS: &str = include_str!("../fixtures/versions.json");
const PLANS: &str = include_str!("../fixtures/plans.json");

fn parse<T: DeserializeOwned>(name: &'static str, raw: &str) -> Result<Vec<T>, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::Fixture { name, source })
}

pub fn demo_cases() -> Result<Vec<Case>, StoreError> {
    parse("cases", CASES)
}

pub fn demo_versions() -> Result<Vec<DocumentVersion>, StoreError> {
    parse("versions", VERSIONS)
}

pub fn demo_plans() -> Result<Vec<Plan>, StoreError> {
    parse("plans", PLANS)
}
