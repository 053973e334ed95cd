//! Provider configuration.
//!
//! Whether providers start with demo records is an explicit value passed
//! to their constructors. [`ProviderConfig::from_env`] reads it from the
//! environment for binaries that want the old switch-by-variable behavior.

use thiserror::Error;

/// Environment variable consulted by [`ProviderConfig::from_env`].
pub const DEMO_DATA_VAR: &str = "SGM_ENABLE_DEMO_DATA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProviderConfig {
    /// Seed providers with the embedded demo fixtures.
    pub enable_demo_data: bool,
}

impl ProviderConfig {
    pub fn demo() -> Self {
        Self {
            enable_demo_data: true,
        }
    }

    /// Load from `SGM_ENABLE_DEMO_DATA`. Unset means disabled.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            enable_demo_data: env_flag(DEMO_DATA_VAR)?,
        })
    }
}

fn env_flag(var: &str) -> Result<bool, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => parse_flag(var, &raw),
        Err(_) => Ok(false),
    }
}

fn parse_flag(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var: var.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a boolean (true/false/1/0), got {value:?}")]
    InvalidFlag { var: String, value: String },
}
