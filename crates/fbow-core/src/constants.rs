//! Shared constants for fuzzy bag-of-words evaluation.

/// fbow version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of sentence pairs encoded per batch.
pub const DEFAULT_BATCH_SIZE: usize = 128;

/// Default seed for the bootstrap random number generator.
pub const DEFAULT_SEED: u64 = 1111;

/// Default number of bootstrap resamples for confidence intervals.
pub const DEFAULT_BOOTSTRAP_RESAMPLES: usize = 10_000;

/// Default two-sided significance level for confidence intervals.
pub const DEFAULT_BOOTSTRAP_ALPHA: f64 = 0.05;

/// Token substituted for empty sentences before encoding.
pub const EMPTY_SENTENCE_PLACEHOLDER: &str = ".";

/// Similarity measure used when none is configured.
pub const DEFAULT_MEASURE: &str = "avg_cosine";

/// Name of the aggregate entry in a benchmark result.
pub const AGGREGATE_KEY: &str = "all";

// ---- Benchmark layout ----

/// Directory under the task path holding the STS benchmarks.
pub const STS_DATA_DIR: &str = "downstream/STS";

/// File name prefix for tab-separated sentence pairs.
pub const STS_INPUT_PREFIX: &str = "STS.input.";

/// File name prefix for gold similarity scores.
pub const STS_GOLD_PREFIX: &str = "STS.gs.";

/// File name suffix shared by input and gold files.
pub const STS_FILE_SUFFIX: &str = ".txt";

/// Number of supported STS tasks.
pub const SUPPORTED_TASK_COUNT: usize = 5;

/// Supported STS task names.
pub const SUPPORTED_TASKS: [&str; SUPPORTED_TASK_COUNT] =
    ["STS12", "STS13", "STS14", "STS15", "STS16"];
