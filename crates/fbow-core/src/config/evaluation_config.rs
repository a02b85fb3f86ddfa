//! Evaluation harness configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_SEED, SUPPORTED_TASKS};

/// Configuration for loading and scoring STS benchmarks.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Root directory containing `downstream/STS/...`. Default: "data".
    pub task_path: Option<PathBuf>,
    /// Tasks to evaluate. Empty means all supported tasks.
    pub tasks: Vec<String>,
    /// Sentence pairs encoded per batch. Default: 128.
    pub batch_size: Option<usize>,
    /// Seed for the bootstrap RNG. Default: 1111.
    pub seed: Option<u64>,
}

impl EvaluationConfig {
    pub fn effective_task_path(&self) -> PathBuf {
        self.task_path.clone().unwrap_or_else(|| PathBuf::from("data"))
    }

    pub fn effective_tasks(&self) -> Vec<String> {
        if self.tasks.is_empty() {
            SUPPORTED_TASKS.iter().map(|t| t.to_string()).collect()
        } else {
            self.tasks.clone()
        }
    }

    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}
