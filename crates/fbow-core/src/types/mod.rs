//! Shared value types: dense row matrices, embedding bags, universes.

pub mod matrix;

pub use matrix::{EmbeddingBag, MembershipVector, RowMatrix, Universe};

/// A whitespace-tokenized sentence.
pub type Sentence = Vec<String>;
