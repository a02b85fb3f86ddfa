//! Benchmark datasets: sentence pairs with gold similarity scores.

pub mod loader;
pub mod split;
pub mod task;

pub use split::{Benchmark, DatasetSplit};
pub use task::StsTask;
