//! Configuration for classification and clustering.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Hard ceiling for generated document-type codes.
pub const MAX_CODE_LEN: usize = 50;

/// Tuning knobs for the template clustering pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Merge groups whose normalized base names contain one another.
    #[serde(default = "default_merge_groups")]
    pub merge_groups: bool,
    /// Shortest normalized key that may take part in a substring merge.
    #[serde(default = "default_min_merge_key_len")]
    pub min_merge_key_len: usize,
    /// Maximum length of a generated code (never above 50).
    #[serde(default = "default_max_code_len")]
    pub max_code_len: usize,
}

fn default_merge_groups() -> bool {
    true
}
fn default_min_merge_key_len() -> usize {
    4
}
fn default_max_code_len() -> usize {
    MAX_CODE_LEN
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            merge_groups: default_merge_groups(),
            min_merge_key_len: default_min_merge_key_len(),
            max_code_len: default_max_code_len(),
        }
    }
}

/// Top-level FormSage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSageConfig {
    #[serde(default)]
    pub cluster: ClusterConfig,
}

impl FormSageConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Load config from a JSON file, then let environment variables override it.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut config: FormSageConfig = serde_json::from_str(&raw)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply `FORMSAGE_*` overrides using the given variable lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("FORMSAGE_MERGE_GROUPS") {
            match v.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.cluster.merge_groups = true,
                "0" | "false" | "no" | "off" => self.cluster.merge_groups = false,
                other => warn!("Ignoring FORMSAGE_MERGE_GROUPS={}", other),
            }
        }
        if let Some(v) = lookup("FORMSAGE_MIN_MERGE_KEY_LEN") {
            match v.trim().parse() {
                Ok(n) => self.cluster.min_merge_key_len = n,
                Err(_) => warn!("Ignoring FORMSAGE_MIN_MERGE_KEY_LEN={}", v),
            }
        }
        if let Some(v) = lookup("FORMSAGE_MAX_CODE_LEN") {
            match v.trim().parse::<usize>() {
                Ok(n) => self.cluster.max_code_len = n.clamp(1, MAX_CODE_LEN),
                Err(_) => warn!("Ignoring FORMSAGE_MAX_CODE_LEN={}", v),
            }
        }
    }

    /// Reject values the clustering pass cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.cluster.max_code_len == 0 || self.cluster.max_code_len > MAX_CODE_LEN {
            return Err(Error::Config(format!(
                "max_code_len must be within 1..={}, got {}",
                MAX_CODE_LEN, self.cluster.max_code_len
            )));
        }
        Ok(())
    }
}
