//! Fuzzy-set similarity operators.
//!
//! Intersection and union of fuzzy sets are the element-wise min and max of
//! their membership vectors; cardinality is the sum of memberships. Zero
//! denominators are not guarded: 0/0 comes back as NaN for the caller to
//! sanitize.

use fbow_core::errors::SimilarityError;
use fbow_core::types::{EmbeddingBag, MembershipVector, Universe};

use crate::fuzzify::{fuzzify, max_pool};

/// Σ min(m_x, m_y).
pub fn intersection_cardinality(m_x: &MembershipVector, m_y: &MembershipVector) -> f64 {
    debug_assert_eq!(m_x.len(), m_y.len());
    m_x.as_slice()
        .iter()
        .zip(m_y.as_slice())
        .map(|(a, b)| a.min(*b))
        .sum()
}

/// Σ max(m_x, m_y).
pub fn union_cardinality(m_x: &MembershipVector, m_y: &MembershipVector) -> f64 {
    debug_assert_eq!(m_x.len(), m_y.len());
    m_x.as_slice()
        .iter()
        .zip(m_y.as_slice())
        .map(|(a, b)| a.max(*b))
        .sum()
}

/// Fuzzy Jaccard: |x ∩ y| / |x ∪ y|.
pub fn fuzzy_jaccard(m_x: &MembershipVector, m_y: &MembershipVector) -> f64 {
    intersection_cardinality(m_x, m_y) / union_cardinality(m_x, m_y)
}

/// Fuzzy Otsuka: |x ∩ y| / sqrt(|x| |y|).
pub fn fuzzy_otsuka(m_x: &MembershipVector, m_y: &MembershipVector) -> f64 {
    intersection_cardinality(m_x, m_y) / (m_x.cardinality() * m_y.cardinality()).sqrt()
}

/// Fuzzy Dice: 2 |x ∩ y| / (|x| + |y|).
pub fn fuzzy_dice(m_x: &MembershipVector, m_y: &MembershipVector) -> f64 {
    2.0 * intersection_cardinality(m_x, m_y) / (m_x.cardinality() + m_y.cardinality())
}

/// Fuzzify both bags against the dynamic universe built from their own rows.
fn dynamax_memberships(
    x: &EmbeddingBag,
    y: &EmbeddingBag,
) -> Result<(MembershipVector, MembershipVector), SimilarityError> {
    let universe = Universe::from_bags(x, y)?;
    Ok((fuzzify(x, &universe)?, fuzzify(y, &universe)?))
}

/// DynaMax-Jaccard similarity between two sentences.
pub fn dynamax_jaccard(x: &EmbeddingBag, y: &EmbeddingBag) -> Result<f64, SimilarityError> {
    let (m_x, m_y) = dynamax_memberships(x, y)?;
    Ok(fuzzy_jaccard(&m_x, &m_y))
}

/// DynaMax-Otsuka similarity between two sentences.
pub fn dynamax_otsuka(x: &EmbeddingBag, y: &EmbeddingBag) -> Result<f64, SimilarityError> {
    let (m_x, m_y) = dynamax_memberships(x, y)?;
    Ok(fuzzy_otsuka(&m_x, &m_y))
}

/// DynaMax-Dice similarity between two sentences.
pub fn dynamax_dice(x: &EmbeddingBag, y: &EmbeddingBag) -> Result<f64, SimilarityError> {
    let (m_x, m_y) = dynamax_memberships(x, y)?;
    Ok(fuzzy_dice(&m_x, &m_y))
}

/// MaxPool-Jaccard: each bag's own clipped max-pooled vector is its membership.
pub fn max_jaccard(x: &EmbeddingBag, y: &EmbeddingBag) -> Result<f64, SimilarityError> {
    if x.dim() != y.dim() {
        return Err(SimilarityError::DimensionMismatch {
            expected: x.dim(),
            actual: y.dim(),
        });
    }
    Ok(fuzzy_jaccard(&max_pool(x), &max_pool(y)))
}

/// FBoW-Jaccard under a fixed, caller-chosen universe.
pub fn fbow_jaccard(
    universe: &Universe,
    x: &EmbeddingBag,
    y: &EmbeddingBag,
) -> Result<f64, SimilarityError> {
    let m_x = fuzzify(x, universe)?;
    let m_y = fuzzify(y, universe)?;
    Ok(fuzzy_jaccard(&m_x, &m_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(rows: &[[f64; 3]]) -> EmbeddingBag {
        EmbeddingBag::from_rows(rows).unwrap()
    }

    #[test]
    fn test_dynamax_jaccard_hand_computed() {
        // U = [x0; y0] = [[1,0,0],[0,1,0]]
        // m_x = [1, 0], m_y = [0, 1] → 0 / 2
        let x = bag(&[[1.0, 0.0, 0.0]]);
        let y = bag(&[[0.0, 1.0, 0.0]]);
        assert_eq!(dynamax_jaccard(&x, &y).unwrap(), 0.0);

        // U = [[1,1,0],[1,0,0]]
        // m_x = [2, 1], m_y = [1, 1] → min 2 / max 3
        let x = bag(&[[1.0, 1.0, 0.0]]);
        let y = bag(&[[1.0, 0.0, 0.0]]);
        assert!((dynamax_jaccard(&x, &y).unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_dynamax_otsuka_and_dice_hand_computed() {
        let x = bag(&[[1.0, 1.0, 0.0]]);
        let y = bag(&[[1.0, 0.0, 0.0]]);
        // m_x = [2, 1] (|x| = 3), m_y = [1, 1] (|y| = 2), ∩ = 2
        let otsuka = dynamax_otsuka(&x, &y).unwrap();
        assert!((otsuka - 2.0 / 6.0_f64.sqrt()).abs() < 1e-12);
        let dice = dynamax_dice(&x, &y).unwrap();
        assert!((dice - 4.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_self_similarity_is_one() {
        let x = bag(&[[0.3, -0.2, 0.9], [-0.5, 0.4, 0.1]]);
        assert_eq!(dynamax_jaccard(&x, &x).unwrap(), 1.0);
        assert_eq!(dynamax_dice(&x, &x).unwrap(), 1.0);
        assert!((dynamax_otsuka(&x, &x).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_bags_give_nan() {
        let z = EmbeddingBag::zeros(3).unwrap();
        assert!(dynamax_jaccard(&z, &z).unwrap().is_nan());
        assert!(max_jaccard(&z, &z).unwrap().is_nan());
    }

    #[test]
    fn test_max_jaccard_uses_pooled_vectors() {
        let x = bag(&[[1.0, -1.0, 0.0], [0.0, 2.0, 0.0]]);
        let y = bag(&[[1.0, 1.0, 1.0]]);
        // pooled x = [1, 2, 0], y = [1, 1, 1] → min 2 / max 4
        assert!((max_jaccard(&x, &y).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fbow_jaccard_identity_equals_max_jaccard() {
        let x = bag(&[[0.1, 0.5, -0.3], [0.4, -0.2, 0.6]]);
        let y = bag(&[[0.2, 0.2, 0.2]]);
        let u = Universe::identity(3).unwrap();
        let a = fbow_jaccard(&u, &x, &y).unwrap();
        let b = max_jaccard(&x, &y).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch_between_bags() {
        let x = bag(&[[1.0, 0.0, 0.0]]);
        let y = EmbeddingBag::from_rows(&[[1.0, 0.0]]).unwrap();
        assert!(dynamax_jaccard(&x, &y).is_err());
        assert!(max_jaccard(&x, &y).is_err());
    }
}
