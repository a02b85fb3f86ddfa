//! Bootstrap confidence interval configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BOOTSTRAP_ALPHA, DEFAULT_BOOTSTRAP_RESAMPLES};

/// Configuration for the paired BCa bootstrap on correlation deltas.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Compute confidence intervals against the baseline. Default: false.
    pub enabled: Option<bool>,
    /// Number of bootstrap resamples. Default: 10000.
    pub n_resamples: Option<usize>,
    /// Two-sided significance level. Default: 0.05.
    pub alpha: Option<f64>,
}

impl BootstrapConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn effective_n_resamples(&self) -> usize {
        self.n_resamples.unwrap_or(DEFAULT_BOOTSTRAP_RESAMPLES)
    }

    pub fn effective_alpha(&self) -> f64 {
        self.alpha.unwrap_or(DEFAULT_BOOTSTRAP_ALPHA)
    }
}
