//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading contribution
//! and tax policies from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{PolicyConfig, TaxBracket};

/// Loads and provides access to a validated policy.
///
/// # File Format
///
/// ```text
/// name: Hangzhou
/// basic_deduction: 60000
/// employee:
///   pension: 0.08
///   medical: 0.02
///   unemployment: 0.005
///   housing_fund: 0.12
/// employer:
///   pension: 0.14
///   medical: 0.095
///   unemployment: 0.005
///   work_injury: 0.002
///   housing_fund: 0.12
/// tax_brackets:
///   - { upper_bound: 36000, rate: 0.03, quick_deduction: 0 }
///   ...
///   - { rate: 0.45, quick_deduction: 181920 }
/// ```
///
/// # Example
///
/// ```no_run
/// use tax_cost_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hangzhou.yaml")?;
/// println!("Loaded policy: {}", loader.policy().name);
/// # Ok::<(), tax_cost_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: PolicyConfig,
}

impl ConfigLoader {
    /// Wraps the built-in policy.
    pub fn builtin() -> Self {
        Self {
            policy: PolicyConfig::default(),
        }
    }

    /// Loads a policy from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The rates or tax table are inconsistent (`InvalidPolicy`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let policy = Self::load_yaml::<PolicyConfig>(path)?;
        let policy = Self::from_policy(policy)?;
        debug!(
            path = %path.display(),
            policy = %policy.policy.name,
            brackets = policy.policy.tax_brackets.len(),
            "Loaded policy"
        );
        Ok(policy)
    }

    /// Validates an already-built policy and wraps it.
    pub fn from_policy(policy: PolicyConfig) -> EngineResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns the tax table of the loaded policy.
    pub fn tax_brackets(&self) -> &[TaxBracket] {
        &self.policy.tax_brackets
    }

    /// Consumes the loader, returning the policy.
    pub fn into_policy(self) -> PolicyConfig {
        self.policy
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::builtin()
    }
}
