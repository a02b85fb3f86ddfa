//! Sentence fuzzifier.

use fbow_core::errors::SimilarityError;
use fbow_core::types::{EmbeddingBag, MembershipVector, Universe};

#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Membership of `bag` in every concept of `universe`.
///
/// `m[k] = max(0, max_i <bag_i, U_k>)`: a sentence holds a concept to the
/// degree its most aligned word does, and never negatively.
pub fn fuzzify(bag: &EmbeddingBag, universe: &Universe) -> Result<MembershipVector, SimilarityError> {
    if bag.dim() != universe.dim() {
        return Err(SimilarityError::DimensionMismatch {
            expected: universe.dim(),
            actual: bag.dim(),
        });
    }
    let affinities = universe
        .rows()
        .map(|concept| {
            bag.rows()
                .map(|word| dot(word, concept))
                .fold(f64::NEG_INFINITY, f64::max)
        })
        .collect();
    Ok(MembershipVector::clipped(affinities))
}

/// Per-dimension max over the bag's rows, clipped at zero.
///
/// Equivalent to fuzzifying against the identity universe, without building it.
pub fn max_pool(bag: &EmbeddingBag) -> MembershipVector {
    let mut pooled = vec![f64::NEG_INFINITY; bag.dim()];
    for word in bag.rows() {
        for (p, &v) in pooled.iter_mut().zip(word) {
            *p = p.max(v);
        }
    }
    MembershipVector::clipped(pooled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzify_takes_max_over_words() {
        let bag = EmbeddingBag::from_rows(&[[1.0, 0.0], [0.5, 0.5]]).unwrap();
        let universe = Universe::from_rows(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]).unwrap();
        let m = fuzzify(&bag, &universe).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 0.5, 1.0]);
    }

    #[test]
    fn test_fuzzify_clips_negative_affinity() {
        let bag = EmbeddingBag::from_rows(&[[-1.0, -2.0]]).unwrap();
        let universe = Universe::from_rows(&[[1.0, 1.0], [-1.0, 0.0]]).unwrap();
        let m = fuzzify(&bag, &universe).unwrap();
        assert_eq!(m.as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn test_fuzzify_dimension_mismatch() {
        let bag = EmbeddingBag::from_rows(&[[1.0, 0.0]]).unwrap();
        let universe = Universe::identity(3).unwrap();
        assert!(matches!(
            fuzzify(&bag, &universe),
            Err(SimilarityError::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_max_pool_matches_identity_universe() {
        let bag = EmbeddingBag::from_rows(&[[0.2, -0.4, 0.9], [0.7, -0.1, -0.3]]).unwrap();
        let pooled = max_pool(&bag);
        let via_identity = fuzzify(&bag, &Universe::identity(3).unwrap()).unwrap();
        assert_eq!(pooled, via_identity);
        assert_eq!(pooled.as_slice(), &[0.7, 0.0, 0.9]);
    }
}
