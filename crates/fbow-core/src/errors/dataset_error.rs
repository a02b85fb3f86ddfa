//! Dataset loading errors.

use super::error_code::{self, FbowErrorCode};

/// Errors that can occur while loading or querying a benchmark.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Malformed line {line} in {path}: {message}")]
    MalformedLine {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Pair count mismatch in split {split}: {left} vs {right}")]
    PairCountMismatch {
        split: String,
        left: usize,
        right: usize,
    },

    #[error("Invalid gold score {value:?} at line {line} in {path}")]
    InvalidScore {
        path: String,
        line: usize,
        value: String,
    },

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Unknown split {split} in benchmark {benchmark}")]
    UnknownSplit { benchmark: String, split: String },
}

impl FbowErrorCode for DatasetError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::DATASET_IO,
            Self::MalformedLine { .. }
            | Self::PairCountMismatch { .. }
            | Self::InvalidScore { .. } => error_code::MALFORMED_DATASET,
            Self::UnknownTask(_) => error_code::UNKNOWN_TASK,
            Self::UnknownSplit { .. } => error_code::UNKNOWN_SPLIT,
        }
    }
}
