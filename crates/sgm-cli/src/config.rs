//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! enable_demo_data: true
//! nominal_capacity: 6
//! policies_path: config/sla-policies.yaml
//! ```
//!
//! Every key is optional. When `enable_demo_data` is absent the
//! `SGM_ENABLE_DEMO_DATA` environment variable decides.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use sgm_sla::{CapacityModel, PolicyTable, SlaCalculator};
use sgm_store::{ProviderConfig, Providers};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SgmConfig {
    pub enable_demo_data: Option<bool>,
    /// Weighted units that make up 100 % capacity.
    pub nominal_capacity: Option<f64>,
    pub policies_path: Option<PathBuf>,
}

impl SgmConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("invalid YAML in {}", path.display()))?;
        if let Some(units) = config.nominal_capacity {
            if !(units.is_finite() && units > 0.0) {
                bail!("nominal_capacity must be a positive number, got {units}");
            }
        }
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn provider_config(&self) -> Result<ProviderConfig> {
        match self.enable_demo_data {
            Some(enable_demo_data) => Ok(ProviderConfig { enable_demo_data }),
            None => ProviderConfig::from_env().context("invalid provider configuration"),
        }
    }

    pub fn providers(&self) -> Result<Providers> {
        Providers::new(&self.provider_config()?).context("failed to initialize providers")
    }

    /// Build the SLA calculator. An explicit `policies` path wins over
    /// `policies_path`; with neither, the standard table is used.
    pub fn calculator(&self, policies: Option<&Path>) -> Result<SlaCalculator> {
        let table = match policies.or(self.policies_path.as_deref()) {
            Some(path) => PolicyTable::load(path)
                .with_context(|| format!("failed to load SLA policies from {}", path.display()))?,
            None => PolicyTable::standard(),
        };
        let mut calculator = SlaCalculator::new(table);
        if let Some(units) = self.nominal_capacity {
            calculator = calculator.with_capacity_model(CapacityModel::new(units));
        }
        Ok(calculator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_path_gives_defaults() {
        assert_eq!(SgmConfig::resolve(None).unwrap(), SgmConfig::default());
    }

    #[test]
    fn loads_all_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "sgm.yaml",
            "enable_demo_data: true\nnominal_capacity: 8\npolicies_path: p.yaml\n",
        );
        let config = SgmConfig::load(&path).unwrap();
        assert_eq!(config.enable_demo_data, Some(true));
        assert_eq!(config.nominal_capacity, Some(8.0));
        assert_eq!(config.policies_path, Some(PathBuf::from("p.yaml")));
        assert!(config.provider_config().unwrap().enable_demo_data);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let typo = write(&dir, "typo.yaml", "enable_demo: true\n");
        assert!(SgmConfig::load(&typo).is_err());

        let zero = write(&dir, "zero.yaml", "nominal_capacity: 0\n");
        let err = SgmConfig::load(&zero).unwrap_err();
        assert!(err.to_string().contains("nominal_capacity"));
    }

    #[test]
    fn calculator_uses_policy_file_and_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let policies = write(
            &dir,
            "policies.yaml",
            "- id: only\n  caseType: DISPUTE\n  priority: HIGH\n  targetResolutionDays: 4\n  warningThresholdPercent: 50\n  escalationThresholdPercent: 75\n",
        );
        let config = SgmConfig {
            nominal_capacity: Some(10.0),
            policies_path: Some(policies),
            ..SgmConfig::default()
        };
        let calc = config.calculator(None).unwrap();
        assert_eq!(calc.policies().policies().len(), 1);
        assert_eq!(calc.policies().fallback().target_resolution_days, 4);
        assert_eq!(calc.capacity_model().nominal_units, 10.0);
    }

    #[test]
    fn missing_policy_file_is_reported() {
        let config = SgmConfig::default();
        let err = config
            .calculator(Some(Path::new("/nonexistent/policies.yaml")))
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/policies.yaml"));
    }
}
