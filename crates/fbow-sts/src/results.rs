//! Evaluation result records.
//!
//! A benchmark result serializes as `{<split>: SplitResult, ..., "all": AggregateResult}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stats::{mean, weighted_mean, ConfidenceInterval, Correlation};

/// Candidate-versus-baseline comparison on one split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// `r(gold, candidate) - r(gold, baseline)`.
    pub delta: f64,
    /// `r(gold, baseline)`.
    pub baseline: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conf_int: Option<ConfidenceInterval>,
}

impl Comparison {
    /// Whether the interval excludes a zero delta. `None` without an interval.
    pub fn is_significant(&self) -> Option<bool> {
        self.conf_int.map(|ci| !ci.contains(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitResult {
    pub pearson: Correlation,
    pub spearman: Correlation,
    pub n_samples: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanPair {
    pub mean: f64,
    /// Weighted by split sample counts.
    pub wmean: f64,
}

impl MeanPair {
    pub fn compute(values: &[f64], weights: &[usize]) -> Self {
        Self {
            mean: mean(values),
            wmean: weighted_mean(values, weights),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub pearson: MeanPair,
    pub spearman: MeanPair,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_pearson: Option<MeanPair>,
    /// Candidate minus baseline Pearson, averaged over splits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<MeanPair>,
}

impl AggregateResult {
    /// Aggregate split results in evaluation order.
    pub fn from_splits<'a, I>(splits: I) -> Self
    where
        I: IntoIterator<Item = &'a SplitResult>,
    {
        let mut pearson = Vec::new();
        let mut spearman = Vec::new();
        let mut baseline = Vec::new();
        let mut delta = Vec::new();
        let mut weights = Vec::new();
        for split in splits {
            pearson.push(split.pearson.coefficient);
            spearman.push(split.spearman.coefficient);
            weights.push(split.n_samples);
            if let Some(cmp) = &split.comparison {
                baseline.push(cmp.baseline);
                delta.push(cmp.delta);
            }
        }
        // Only meaningful when every split was compared.
        let compared = !baseline.is_empty() && baseline.len() == pearson.len();
        Self {
            pearson: MeanPair::compute(&pearson, &weights),
            spearman: MeanPair::compute(&spearman, &weights),
            baseline_pearson: compared.then(|| MeanPair::compute(&baseline, &weights)),
            delta: compared.then(|| MeanPair::compute(&delta, &weights)),
        }
    }
}

/// All splits of one benchmark plus their aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    #[serde(skip)]
    pub name: String,
    /// Split names in evaluation order.
    #[serde(skip)]
    pub split_order: Vec<String>,
    #[serde(flatten)]
    pub splits: BTreeMap<String, SplitResult>,
    #[serde(rename = "all")]
    pub all: AggregateResult,
}

impl BenchmarkResult {
    /// Build from `(split name, result)` pairs in evaluation order.
    pub fn new(name: impl Into<String>, results: Vec<(String, SplitResult)>) -> Self {
        let all = AggregateResult::from_splits(results.iter().map(|(_, r)| r));
        let split_order = results.iter().map(|(n, _)| n.clone()).collect();
        Self {
            name: name.into(),
            split_order,
            splits: results.into_iter().collect(),
            all,
        }
    }

    pub fn split(&self, name: &str) -> Option<&SplitResult> {
        self.splits.get(name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
