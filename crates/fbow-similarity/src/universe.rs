//! Static universes shared across all comparisons.

use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;

use fbow_core::errors::SimilarityError;
use fbow_core::types::{RowMatrix, Universe};

/// `n_concepts × dim` universe with i.i.d. standard-normal entries.
///
/// Deterministic for a seeded `rng`; rows are drawn in order.
pub fn random_normal<R: Rng + ?Sized>(
    n_concepts: usize,
    dim: usize,
    rng: &mut R,
) -> Result<Universe, SimilarityError> {
    let normal = Normal::standard();
    let data: Vec<f64> = (0..n_concepts * dim).map(|_| normal.sample(rng)).collect();
    RowMatrix::from_flat(dim, data).map(Universe::from_matrix)
}
