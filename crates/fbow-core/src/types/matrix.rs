//! Dense row-major matrices and the domain wrappers built on them.
//!
//! `EmbeddingBag` and `Universe` are both `n × d` matrices; they differ only
//! in role. Construction validates shape so the similarity operators can
//! index rows without further checks.

use crate::errors::SimilarityError;

/// A non-empty, row-major `n × d` matrix of `f64` with `d >= 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl RowMatrix {
    /// Build a matrix from explicit rows. Rejects empty input, zero-width
    /// rows, and ragged rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, SimilarityError> {
        let first = rows.first().ok_or(SimilarityError::EmptyBag)?;
        let dim = first.as_ref().len();
        if dim == 0 {
            return Err(SimilarityError::ZeroDimension);
        }
        let mut data = Vec::with_capacity(rows.len() * dim);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dim {
                return Err(SimilarityError::RaggedRows {
                    row: i,
                    expected: dim,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { dim, data })
    }

    /// Build a matrix from a flat row-major buffer.
    pub fn from_flat(dim: usize, data: Vec<f64>) -> Result<Self, SimilarityError> {
        if dim == 0 {
            return Err(SimilarityError::ZeroDimension);
        }
        if data.is_empty() {
            return Err(SimilarityError::EmptyBag);
        }
        if data.len() % dim != 0 {
            return Err(SimilarityError::RaggedRows {
                row: data.len() / dim,
                expected: dim,
                actual: data.len() % dim,
            });
        }
        Ok(Self { dim, data })
    }

    /// A single all-zero row of width `dim`.
    pub fn zero_row(dim: usize) -> Result<Self, SimilarityError> {
        Self::from_flat(dim, vec![0.0; dim])
    }

    pub fn n_rows(&self) -> usize {
        self.data.len() / self.dim
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.dim)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Stack `self` on top of `other`. Both must share the same width.
    pub fn vstack(&self, other: &RowMatrix) -> Result<RowMatrix, SimilarityError> {
        if self.dim != other.dim {
            return Err(SimilarityError::DimensionMismatch {
                expected: self.dim,
                actual: other.dim,
            });
        }
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Ok(RowMatrix {
            dim: self.dim,
            data,
        })
    }
}

/// The word vectors of one sentence. Always holds at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingBag(RowMatrix);

impl EmbeddingBag {
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, SimilarityError> {
        RowMatrix::from_rows(rows).map(Self)
    }

    pub fn from_matrix(matrix: RowMatrix) -> Self {
        Self(matrix)
    }

    /// Stand-in bag for sentences with no known token: one zero vector.
    pub fn zeros(dim: usize) -> Result<Self, SimilarityError> {
        RowMatrix::zero_row(dim).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.n_rows()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn dim(&self) -> usize {
        self.0.dim()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        self.0.row(i)
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.0.rows()
    }

    pub fn as_matrix(&self) -> &RowMatrix {
        &self.0
    }
}

/// A `K × d` matrix of concept directions that memberships are measured against.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe(RowMatrix);

impl Universe {
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, SimilarityError> {
        RowMatrix::from_rows(rows).map(Self)
    }

    pub fn from_matrix(matrix: RowMatrix) -> Self {
        Self(matrix)
    }

    /// The `d × d` identity: memberships become the clipped per-dimension max.
    pub fn identity(dim: usize) -> Result<Self, SimilarityError> {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        RowMatrix::from_flat(dim, data).map(Self)
    }

    /// Dynamic universe: the row union of two bags, `x` rows first.
    pub fn from_bags(x: &EmbeddingBag, y: &EmbeddingBag) -> Result<Self, SimilarityError> {
        x.as_matrix().vstack(y.as_matrix()).map(Self)
    }

    pub fn n_concepts(&self) -> usize {
        self.0.n_rows()
    }

    pub fn dim(&self) -> usize {
        self.0.dim()
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.0.rows()
    }

    pub fn as_matrix(&self) -> &RowMatrix {
        &self.0
    }
}

/// Graded, non-negative membership of a sentence in each universe concept.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipVector(Vec<f64>);

impl MembershipVector {
    /// Wrap raw affinities, clipping negatives (and NaN) to zero.
    pub fn clipped(values: Vec<f64>) -> Self {
        Self(values.into_iter().map(|v| v.max(0.0)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Fuzzy cardinality: the sum of memberships.
    pub fn cardinality(&self) -> f64 {
        self.0.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_empty() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            RowMatrix::from_rows(&rows),
            Err(SimilarityError::EmptyBag)
        ));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        match RowMatrix::from_rows(&rows) {
            Err(SimilarityError::RaggedRows { row, expected, actual }) => {
                assert_eq!((row, expected, actual), (1, 2, 1));
            }
            other => panic!("expected RaggedRows, got {:?}", other),
        }
    }

    #[test]
    fn test_vstack_keeps_row_order() {
        let a = RowMatrix::from_rows(&[[1.0, 0.0]]).unwrap();
        let b = RowMatrix::from_rows(&[[0.0, 1.0], [2.0, 2.0]]).unwrap();
        let stacked = a.vstack(&b).unwrap();
        assert_eq!(stacked.n_rows(), 3);
        assert_eq!(stacked.row(0), &[1.0, 0.0]);
        assert_eq!(stacked.row(2), &[2.0, 2.0]);
    }

    #[test]
    fn test_vstack_dimension_mismatch() {
        let a = RowMatrix::from_rows(&[[1.0, 0.0]]).unwrap();
        let b = RowMatrix::from_rows(&[[1.0, 0.0, 0.0]]).unwrap();
        assert!(matches!(
            a.vstack(&b),
            Err(SimilarityError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_zero_bag_has_one_row() {
        let bag = EmbeddingBag::zeros(4).unwrap();
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.dim(), 4);
        assert!(bag.row(0).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_identity_universe() {
        let u = Universe::identity(3).unwrap();
        assert_eq!(u.n_concepts(), 3);
        let rows: Vec<&[f64]> = u.rows().collect();
        assert_eq!(rows[1], &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_membership_clips_negatives_and_nan() {
        let m = MembershipVector::clipped(vec![-1.0, 0.5, f64::NAN]);
        assert_eq!(m.as_slice(), &[0.0, 0.5, 0.0]);
        assert!((m.cardinality() - 0.5).abs() < 1e-12);
    }
}
