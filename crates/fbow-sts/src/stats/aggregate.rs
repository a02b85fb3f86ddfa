//! Cross-split aggregation of correlation coefficients.

/// Unweighted mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean weighted by per-split sample counts. NaN when the total weight is 0.
pub fn weighted_mean(values: &[f64], weights: &[usize]) -> f64 {
    let total: usize = weights.iter().sum();
    let sum: f64 = values
        .iter()
        .zip(weights)
        .map(|(v, &w)| v * w as f64)
        .sum();
    sum / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_and_unweighted() {
        let r = [0.2, 0.8];
        let n = [10, 90];
        assert!((mean(&r) - 0.5).abs() < 1e-12);
        assert!((weighted_mean(&r, &n) - 0.74).abs() < 1e-12);
    }

    #[test]
    fn test_empty_is_nan() {
        assert!(mean(&[]).is_nan());
        assert!(weighted_mean(&[], &[]).is_nan());
    }
}
