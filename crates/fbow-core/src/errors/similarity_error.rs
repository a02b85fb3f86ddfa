//! Similarity operator errors.

use super::error_code::{self, FbowErrorCode};

/// Errors raised by matrix construction and similarity operators.
///
/// Numerical degeneracy (0/0) is not an error: operators return NaN/Inf and
/// the scorer sanitizes it.
#[derive(Debug, thiserror::Error)]
pub enum SimilarityError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding bag must contain at least one vector")]
    EmptyBag,

    #[error("Matrix rows must have dimension >= 1")]
    ZeroDimension,

    #[error("Ragged matrix: row {row} has length {actual}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown similarity measure: {0}")]
    UnknownMeasure(String),

    #[error("Measure {0} requires a fixed universe matrix")]
    MissingUniverse(&'static str),
}

impl FbowErrorCode for SimilarityError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DimensionMismatch { .. } | Self::RaggedRows { .. } | Self::ZeroDimension => {
                error_code::DIMENSION_MISMATCH
            }
            Self::EmptyBag => error_code::EMPTY_BAG,
            Self::UnknownMeasure(_) => error_code::UNKNOWN_MEASURE,
            Self::MissingUniverse(_) => error_code::MISSING_UNIVERSE,
        }
    }
}
