//! Correlation, aggregation, and bootstrap significance.

pub mod aggregate;
pub mod bootstrap;
pub mod correlation;

pub use aggregate::{mean, weighted_mean};
pub use bootstrap::{bca_interval, paired_delta_interval, BcaSettings, ConfidenceInterval};
pub use correlation::{pearson, pearson_r, rank_average, spearman, Correlation};
