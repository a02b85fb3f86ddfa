//! Evaluation errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::{self, FbowErrorCode};
use super::{ConfigError, DatasetError, SimilarityError};

/// Errors that can occur while scoring a benchmark and computing statistics.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("Need at least {required} samples, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Encoder returned {actual} encodings for a batch of {expected}")]
    EncoderCountMismatch { expected: usize, actual: usize },

    #[error("Encoder failed: {0}")]
    Encoder(String),

    #[error("Bootstrap failed: {0}")]
    Bootstrap(String),

    #[error("Similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FbowErrorCode for EvaluationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientSamples { .. } => error_code::INSUFFICIENT_SAMPLES,
            Self::LengthMismatch { .. } => error_code::LENGTH_MISMATCH,
            Self::EncoderCountMismatch { .. } | Self::Encoder(_) => error_code::ENCODER_ERROR,
            Self::Bootstrap(_) => error_code::BOOTSTRAP_ERROR,
            Self::Similarity(e) => e.error_code(),
            Self::Dataset(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used throughout the evaluation crate.
pub type EvaluationResult<T> = Result<T, EvaluationError>;
