//! # fbow-core
//!
//! Foundation crate for fuzzy bag-of-words sentence similarity.
//! Defines the shared matrix types, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::FbowConfig;
pub use errors::{ConfigError, DatasetError, EvaluationError, FbowErrorCode, SimilarityError};
pub use types::{EmbeddingBag, MembershipVector, RowMatrix, Sentence, Universe};
