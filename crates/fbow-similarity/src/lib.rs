//! # fbow-similarity
//!
//! Fuzzy bag-of-words similarity between sentences represented as bags of
//! word vectors.
//!
//! A sentence is fuzzified against a universe of concept directions: its
//! membership in concept `k` is the largest dot product of any of its words
//! with that concept, clipped at zero. Two membership vectors are compared
//! with fuzzy generalizations of Jaccard, Otsuka, and Dice. The DynaMax
//! variants build the universe on the fly from the two sentences themselves.

pub mod baseline;
pub mod classical;
pub mod fuzzify;
pub mod fuzzy;
pub mod measure;
pub mod soft_card;
pub mod universe;

pub use fuzzify::{fuzzify, max_pool};
pub use measure::{
    NamedMeasure, PairSimilarity, SimilarityKind, SimilarityMeasure, TokenMeasure,
};
