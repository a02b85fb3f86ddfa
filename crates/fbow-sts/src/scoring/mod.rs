//! Sentence encoding and batched pair scoring.

pub mod batch;
pub mod encoder;

pub use batch::{BatchScorer, SplitScores};
pub use encoder::{SentenceEncoder, TokenEncoder, WordVectorEncoder};
