//! Soft-cardinality Jaccard over literal multisets of word vectors.
//!
//! Duplicate detection uses exact floating-point equality of whole rows
//! (IEEE `==`, so `-0.0` and `0.0` coincide). Vectors that differ only by
//! rounding noise are distinct elements; this mirrors how the measure is
//! defined and is intentionally not tolerance-based.

use rustc_hash::FxHashMap;

use fbow_core::errors::SimilarityError;
use fbow_core::types::{EmbeddingBag, RowMatrix};

use crate::fuzzify::dot;

/// Hashable identity of a row under exact equality.
fn row_key(row: &[f64]) -> Vec<u64> {
    row.iter()
        .map(|&v| if v == 0.0 { 0u64 } else { v.to_bits() })
        .collect()
}

/// Count each distinct row, remembering first-seen order.
fn count_rows(bag: &EmbeddingBag) -> (Vec<&[f64]>, FxHashMap<Vec<u64>, usize>) {
    let mut order = Vec::new();
    let mut counts: FxHashMap<Vec<u64>, usize> = FxHashMap::default();
    for row in bag.rows() {
        let count = counts.entry(row_key(row)).or_insert(0);
        if *count == 0 {
            order.push(row);
        }
        *count += 1;
    }
    (order, counts)
}

/// Multiset union: every distinct row appears max(count_x, count_y) times.
pub fn multiset_union(x: &EmbeddingBag, y: &EmbeddingBag) -> Result<EmbeddingBag, SimilarityError> {
    if x.dim() != y.dim() {
        return Err(SimilarityError::DimensionMismatch {
            expected: x.dim(),
            actual: y.dim(),
        });
    }
    let (x_order, x_counts) = count_rows(x);
    let (y_order, y_counts) = count_rows(y);

    let mut data = Vec::with_capacity((x.len() + y.len()) * x.dim());
    for row in &x_order {
        let key = row_key(row);
        let n = x_counts[&key].max(y_counts.get(&key).copied().unwrap_or(0));
        for _ in 0..n {
            data.extend_from_slice(row);
        }
    }
    for row in &y_order {
        let key = row_key(row);
        if x_counts.contains_key(&key) {
            continue;
        }
        for _ in 0..y_counts[&key] {
            data.extend_from_slice(row);
        }
    }
    RowMatrix::from_flat(x.dim(), data).map(EmbeddingBag::from_matrix)
}

/// Soft cardinality: Σ_j 1 / Σ_i max(0, cos(s_i, s_j)).
///
/// Each element counts for less the more it overlaps with the rest of the
/// bag, itself included. Zero-norm rows yield NaN.
pub fn soft_cardinality(bag: &EmbeddingBag) -> f64 {
    let rows: Vec<&[f64]> = bag.rows().collect();
    let norms: Vec<f64> = rows.iter().map(|r| dot(r, r).sqrt()).collect();
    rows.iter()
        .enumerate()
        .map(|(j, s_j)| {
            let overlap: f64 = rows
                .iter()
                .enumerate()
                .map(|(i, s_i)| {
                    let cos = dot(s_i, s_j) / (norms[i] * norms[j]);
                    // keeps NaN, unlike f64::max
                    if cos < 0.0 {
                        0.0
                    } else {
                        cos
                    }
                })
                .sum();
            1.0 / overlap
        })
        .sum()
}

/// Soft-cardinality Jaccard, with the intersection by inclusion–exclusion.
pub fn sc_jaccard(x: &EmbeddingBag, y: &EmbeddingBag) -> Result<f64, SimilarityError> {
    let union = multiset_union(x, y)?;
    let sc_x = soft_cardinality(x);
    let sc_y = soft_cardinality(y);
    let sc_union = soft_cardinality(&union);
    Ok((sc_x + sc_y - sc_union) / sc_union)
}
