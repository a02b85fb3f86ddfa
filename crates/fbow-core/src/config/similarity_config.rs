//! Similarity measure selection.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MEASURE;

/// Which similarity measure to evaluate, and optionally which to compare against.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Candidate measure name, e.g. "dynamax_jaccard". Default: "avg_cosine".
    pub measure: Option<String>,
    /// Baseline measure for significance testing.
    pub baseline: Option<String>,
}

impl SimilarityConfig {
    pub fn effective_measure(&self) -> &str {
        self.measure.as_deref().unwrap_or(DEFAULT_MEASURE)
    }
}
