//! Averaged-embedding baseline.

use fbow_core::errors::SimilarityError;
use fbow_core::types::EmbeddingBag;

use crate::fuzzify::dot;

/// Cosine similarity; NaN when either vector has zero norm.
pub fn cosine(x: &[f64], y: &[f64]) -> f64 {
    dot(x, y) / (dot(x, x).sqrt() * dot(y, y).sqrt())
}

fn mean_vector(bag: &EmbeddingBag) -> Vec<f64> {
    let mut mean = vec![0.0; bag.dim()];
    for row in bag.rows() {
        for (m, v) in mean.iter_mut().zip(row) {
            *m += v;
        }
    }
    let n = bag.len() as f64;
    mean.iter_mut().for_each(|m| *m /= n);
    mean
}

/// Cosine similarity between the two sentences' average word vectors.
pub fn avg_cosine(x: &EmbeddingBag, y: &EmbeddingBag) -> Result<f64, SimilarityError> {
    if x.dim() != y.dim() {
        return Err(SimilarityError::DimensionMismatch {
            expected: x.dim(),
            actual: y.dim(),
        });
    }
    Ok(cosine(&mean_vector(x), &mean_vector(y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_cosine_uses_means() {
        let x = EmbeddingBag::from_rows(&[[1.0, 0.0], [0.0, 1.0]]).unwrap();
        let y = EmbeddingBag::from_rows(&[[3.0, 3.0]]).unwrap();
        assert!((avg_cosine(&x, &y).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_avg_cosine_opposite() {
        let x = EmbeddingBag::from_rows(&[[1.0, 2.0]]).unwrap();
        let y = EmbeddingBag::from_rows(&[[-2.0, -4.0]]).unwrap();
        assert!((avg_cosine(&x, &y).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_norm_is_nan() {
        assert!(cosine(&[0.0, 0.0], &[1.0, 0.0]).is_nan());
    }
}
