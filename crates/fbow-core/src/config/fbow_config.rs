//! Top-level fbow configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{BootstrapConfig, EvaluationConfig, SimilarityConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "fbow.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`FBOW_*`)
/// 3. Project config (`fbow.toml` in project root)
/// 4. User config (`~/.fbow/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FbowConfig {
    pub evaluation: EvaluationConfig,
    pub similarity: SimilarityConfig,
    pub bootstrap: BootstrapConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub task_path: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub seed: Option<u64>,
    pub measure: Option<String>,
    pub baseline: Option<String>,
    pub conf_intervals: Option<bool>,
}

impl FbowConfig {
    /// Load configuration with 4-layer resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &FbowConfig) -> Result<(), ConfigError> {
        if config.evaluation.batch_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "evaluation.batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.bootstrap.n_resamples == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "bootstrap.n_resamples".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(alpha) = config.bootstrap.alpha {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "bootstrap.alpha".to_string(),
                    message: "must be strictly between 0.0 and 1.0".to_string(),
                });
            }
        }
        if config.bootstrap.effective_enabled() && config.similarity.baseline.is_none() {
            return Err(ConfigError::ValidationFailed {
                field: "similarity.baseline".to_string(),
                message: "required when bootstrap.enabled is true".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.fbow/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".fbow").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut FbowConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FbowConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), "merged config file");
        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut FbowConfig, other: &FbowConfig) {
        // Evaluation
        if other.evaluation.task_path.is_some() {
            base.evaluation.task_path = other.evaluation.task_path.clone();
        }
        if !other.evaluation.tasks.is_empty() {
            base.evaluation.tasks = other.evaluation.tasks.clone();
        }
        if other.evaluation.batch_size.is_some() {
            base.evaluation.batch_size = other.evaluation.batch_size;
        }
        if other.evaluation.seed.is_some() {
            base.evaluation.seed = other.evaluation.seed;
        }

        // Similarity
        if other.similarity.measure.is_some() {
            base.similarity.measure = other.similarity.measure.clone();
        }
        if other.similarity.baseline.is_some() {
            base.similarity.baseline = other.similarity.baseline.clone();
        }

        // Bootstrap
        if other.bootstrap.enabled.is_some() {
            base.bootstrap.enabled = other.bootstrap.enabled;
        }
        if other.bootstrap.n_resamples.is_some() {
            base.bootstrap.n_resamples = other.bootstrap.n_resamples;
        }
        if other.bootstrap.alpha.is_some() {
            base.bootstrap.alpha = other.bootstrap.alpha;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `FBOW_BATCH_SIZE`, `FBOW_SEED`, `FBOW_MEASURE`, etc.
    fn apply_env_overrides(config: &mut FbowConfig) {
        if let Ok(val) = std::env::var("FBOW_TASK_PATH") {
            config.evaluation.task_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("FBOW_BATCH_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.evaluation.batch_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FBOW_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                config.evaluation.seed = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FBOW_MEASURE") {
            config.similarity.measure = Some(val);
        }
        if let Ok(val) = std::env::var("FBOW_BASELINE") {
            config.similarity.baseline = Some(val);
        }
        if let Ok(val) = std::env::var("FBOW_CONF_INTERVALS") {
            if let Ok(v) = val.parse::<bool>() {
                config.bootstrap.enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FBOW_BOOTSTRAP_RESAMPLES") {
            if let Ok(v) = val.parse::<usize>() {
                config.bootstrap.n_resamples = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut FbowConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.task_path {
            config.evaluation.task_path = Some(v.clone());
        }
        if let Some(v) = cli.batch_size {
            config.evaluation.batch_size = Some(v);
        }
        if let Some(v) = cli.seed {
            config.evaluation.seed = Some(v);
        }
        if let Some(ref v) = cli.measure {
            config.similarity.measure = Some(v.clone());
        }
        if let Some(ref v) = cli.baseline {
            config.similarity.baseline = Some(v.clone());
        }
        if let Some(v) = cli.conf_intervals {
            config.bootstrap.enabled = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
