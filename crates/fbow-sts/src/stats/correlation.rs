//! Pearson and Spearman correlation with two-sided p-values.
//!
//! p-values come from the Student-t distribution with `n - 2` degrees of
//! freedom via `statrs`. Degenerate inputs follow fixed rules: `n == 2`
//! gives p = 1, a perfect correlation gives p = 0, and a constant series
//! gives a NaN coefficient and NaN p-value.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::warn;

use fbow_core::errors::{EvaluationError, EvaluationResult};

/// A correlation coefficient with its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub coefficient: f64,
    pub p_value: f64,
}

fn check_inputs(x: &[f64], y: &[f64]) -> EvaluationResult<()> {
    if x.len() != y.len() {
        return Err(EvaluationError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(EvaluationError::InsufficientSamples {
            required: 2,
            actual: x.len(),
        });
    }
    Ok(())
}

/// Pearson coefficient only, clamped to [-1, 1]. NaN for constant input.
///
/// Callers guarantee equal lengths; this is the inner loop of the bootstrap.
pub fn pearson_r(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let r = sxy / (sxx * syy).sqrt();
    if r.is_nan() {
        r
    } else {
        r.clamp(-1.0, 1.0)
    }
}

fn p_value(r: f64, n: usize) -> f64 {
    if r.is_nan() {
        return f64::NAN;
    }
    if n == 2 {
        return 1.0;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }
    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}

/// Pearson product-moment correlation.
pub fn pearson(x: &[f64], y: &[f64]) -> EvaluationResult<Correlation> {
    check_inputs(x, y)?;
    let coefficient = pearson_r(x, y);
    if coefficient.is_nan() {
        warn!(n = x.len(), "correlation undefined for constant input");
    }
    Ok(Correlation {
        coefficient,
        p_value: p_value(coefficient, x.len()),
    })
}

/// 1-based ranks; tied values share the average of their ranks.
pub fn rank_average(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1..=end.
        let rank = (start + 1 + end) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = rank;
        }
        start = end;
    }
    ranks
}

/// Spearman rank correlation: Pearson over average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> EvaluationResult<Correlation> {
    check_inputs(x, y)?;
    pearson(&rank_average(x), &rank_average(y))
}
