//! Bias-corrected and accelerated (BCa) bootstrap confidence intervals.
//!
//! Resampling indices come from a caller-supplied RNG, so a fixed seed
//! reproduces the same interval.

use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::warn;

use fbow_core::config::BootstrapConfig;
use fbow_core::constants::{DEFAULT_BOOTSTRAP_ALPHA, DEFAULT_BOOTSTRAP_RESAMPLES};
use fbow_core::errors::{EvaluationError, EvaluationResult};

use super::correlation::pearson_r;

/// Resample count and two-sided significance level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BcaSettings {
    pub n_resamples: usize,
    pub alpha: f64,
}

impl Default for BcaSettings {
    fn default() -> Self {
        Self {
            n_resamples: DEFAULT_BOOTSTRAP_RESAMPLES,
            alpha: DEFAULT_BOOTSTRAP_ALPHA,
        }
    }
}

impl From<&BootstrapConfig> for BcaSettings {
    fn from(config: &BootstrapConfig) -> Self {
        Self {
            n_resamples: config.effective_n_resamples(),
            alpha: config.effective_alpha(),
        }
    }
}

/// Serialized as `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", from = "[f64; 2]")]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl From<ConfidenceInterval> for [f64; 2] {
    fn from(ci: ConfidenceInterval) -> Self {
        [ci.lower, ci.upper]
    }
}

impl From<[f64; 2]> for ConfidenceInterval {
    fn from([lower, upper]: [f64; 2]) -> Self {
        Self { lower, upper }
    }
}

impl ConfidenceInterval {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// BCa interval for `statistic` over `n` samples.
///
/// `statistic` receives the sample indices to evaluate on: `0..n` for the
/// observed value, leave-one-out sets for the jackknife, and draws with
/// replacement for each replicate. Non-finite replicates are dropped.
pub fn bca_interval<F, R>(
    n: usize,
    mut statistic: F,
    settings: &BcaSettings,
    rng: &mut R,
) -> EvaluationResult<ConfidenceInterval>
where
    F: FnMut(&[usize]) -> f64,
    R: Rng + ?Sized,
{
    if n < 3 {
        return Err(EvaluationError::InsufficientSamples {
            required: 3,
            actual: n,
        });
    }
    if settings.n_resamples == 0 {
        return Err(EvaluationError::Bootstrap(
            "n_resamples must be greater than 0".to_string(),
        ));
    }
    if !(settings.alpha > 0.0 && settings.alpha < 1.0) {
        return Err(EvaluationError::Bootstrap(format!(
            "alpha must be strictly between 0 and 1, got {}",
            settings.alpha
        )));
    }

    let all: Vec<usize> = (0..n).collect();
    let observed = statistic(&all);
    if !observed.is_finite() {
        return Err(EvaluationError::Bootstrap(format!(
            "observed statistic is not finite ({observed})"
        )));
    }

    let mut indices = vec![0usize; n];
    let mut replicates = Vec::with_capacity(settings.n_resamples);
    for _ in 0..settings.n_resamples {
        for slot in indices.iter_mut() {
            *slot = rng.gen_range(0..n);
        }
        replicates.push(statistic(&indices));
    }
    let before = replicates.len();
    replicates.retain(|v| v.is_finite());
    let dropped = before - replicates.len();
    if dropped > 0 {
        warn!(dropped_replicates = dropped, "dropped non-finite bootstrap replicates");
    }
    if replicates.is_empty() {
        return Err(EvaluationError::Bootstrap(
            "every bootstrap replicate was non-finite".to_string(),
        ));
    }
    replicates.sort_by(f64::total_cmp);
    let b = replicates.len() as f64;

    let normal = Normal::standard();

    // Bias correction. The proportion is kept off 0 and 1 so z0 stays finite.
    let below = replicates.iter().filter(|&&v| v < observed).count() as f64;
    let proportion = (below / b).clamp(0.5 / b, 1.0 - 0.5 / b);
    let z0 = normal.inverse_cdf(proportion);

    // Acceleration from the leave-one-out jackknife.
    let mut loo = Vec::with_capacity(n - 1);
    let jackknife: Vec<f64> = (0..n)
        .map(|skip| {
            loo.clear();
            loo.extend((0..n).filter(|&i| i != skip));
            statistic(&loo)
        })
        .filter(|v| v.is_finite())
        .collect();
    let acceleration = acceleration(&jackknife);

    let bound = |quantile: f64| -> EvaluationResult<f64> {
        let zs = z0 + normal.inverse_cdf(quantile);
        let adjusted = normal.cdf(z0 + zs / (1.0 - acceleration * zs));
        if !adjusted.is_finite() {
            return Err(EvaluationError::Bootstrap(format!(
                "adjusted quantile is not finite for {quantile}"
            )));
        }
        Ok(replicates[quantile_index(replicates.len() - 1, adjusted)])
    };

    Ok(ConfidenceInterval {
        lower: bound(settings.alpha / 2.0)?,
        upper: bound(1.0 - settings.alpha / 2.0)?,
    })
}

/// Index of quantile `q` in a sorted slice whose last index is `last`.
/// Halfway cases round to even, as numpy does.
fn quantile_index(last: usize, q: f64) -> usize {
    ((last as f64) * q).round_ties_even().clamp(0.0, last as f64) as usize
}

fn acceleration(jackknife: &[f64]) -> f64 {
    if jackknife.is_empty() {
        return 0.0;
    }
    let mean = jackknife.iter().sum::<f64>() / jackknife.len() as f64;
    let (num, den) = jackknife.iter().fold((0.0, 0.0), |(num, den), v| {
        let d = mean - v;
        (num + d * d * d, den + d * d)
    });
    let a = num / (6.0 * den.powf(1.5));
    if a.is_finite() {
        a
    } else {
        0.0
    }
}

/// BCa interval for `r(gold, candidate) - r(gold, baseline)`, resampling
/// the three series jointly.
pub fn paired_delta_interval<R: Rng + ?Sized>(
    gold: &[f64],
    candidate: &[f64],
    baseline: &[f64],
    settings: &BcaSettings,
    rng: &mut R,
) -> EvaluationResult<ConfidenceInterval> {
    for other in [candidate.len(), baseline.len()] {
        if other != gold.len() {
            return Err(EvaluationError::LengthMismatch {
                left: gold.len(),
                right: other,
            });
        }
    }

    let mut g = Vec::with_capacity(gold.len());
    let mut c = Vec::with_capacity(gold.len());
    let mut b = Vec::with_capacity(gold.len());
    let statistic = |idx: &[usize]| {
        g.clear();
        c.clear();
        b.clear();
        for &i in idx {
            g.push(gold[i]);
            c.push(candidate[i]);
            b.push(baseline[i]);
        }
        pearson_r(&g, &c) - pearson_r(&g, &b)
    };
    bca_interval(gold.len(), statistic, settings, rng)
}
