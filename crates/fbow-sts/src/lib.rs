//! # fbow-sts
//!
//! Evaluation harness for sentence similarity measures on the STS 2012–2016
//! benchmarks.
//!
//! Pipeline: load a benchmark (`dataset`), encode and score each split in
//! fixed-size batches (`scoring`), correlate system scores with gold scores
//! and optionally bootstrap the correlation delta against a baseline
//! (`stats`). `StsEvaluator` drives the whole run.

pub mod dataset;
pub mod evaluator;
pub mod results;
pub mod scoring;
pub mod stats;

pub use dataset::{Benchmark, DatasetSplit, StsTask};
pub use evaluator::{configured_measures, configured_tasks, ConfiguredMeasures, StsEvaluator};
pub use results::{AggregateResult, BenchmarkResult, Comparison, MeanPair, SplitResult};
pub use scoring::{BatchScorer, SentenceEncoder, SplitScores, TokenEncoder, WordVectorEncoder};
pub use stats::{BcaSettings, ConfidenceInterval, Correlation};
