//! Drives benchmark evaluation: scoring, correlation, and significance.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, info_span, warn};

use fbow_core::config::FbowConfig;
use fbow_core::constants::{DEFAULT_SEED, VERSION};
use fbow_core::errors::{ConfigError, DatasetError, EvaluationResult, SimilarityError};
use fbow_core::types::{EmbeddingBag, Sentence};
use fbow_similarity::{NamedMeasure, PairSimilarity};

use crate::dataset::{Benchmark, DatasetSplit, StsTask};
use crate::results::{BenchmarkResult, Comparison, SplitResult};
use crate::scoring::{BatchScorer, SentenceEncoder, TokenEncoder, WordVectorEncoder};
use crate::stats::{self, BcaSettings};

/// Evaluates similarity measures against STS gold scores.
///
/// Each `evaluate` call reseeds its own RNG from `seed`, so results do not
/// depend on what was evaluated before.
#[derive(Debug, Clone, PartialEq)]
pub struct StsEvaluator {
    scorer: BatchScorer,
    seed: u64,
    bootstrap: Option<BcaSettings>,
}

impl Default for StsEvaluator {
    fn default() -> Self {
        Self::from_parts(BatchScorer::default(), DEFAULT_SEED, None)
    }
}

impl StsEvaluator {
    /// Build from a validated configuration. Measure names must resolve.
    pub fn new(config: &FbowConfig) -> Result<Self, ConfigError> {
        FbowConfig::validate(config)?;
        resolve_measures(config)?;
        let scorer = BatchScorer::new(config.evaluation.effective_batch_size())?;
        let bootstrap = config
            .bootstrap
            .effective_enabled()
            .then(|| BcaSettings::from(&config.bootstrap));
        Ok(Self::from_parts(
            scorer,
            config.evaluation.effective_seed(),
            bootstrap,
        ))
    }

    pub fn from_parts(scorer: BatchScorer, seed: u64, bootstrap: Option<BcaSettings>) -> Self {
        Self {
            scorer,
            seed,
            bootstrap,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn bootstrap(&self) -> Option<&BcaSettings> {
        self.bootstrap.as_ref()
    }

    /// Evaluate `measure` (and optionally `baseline`) on every split of
    /// `benchmark`, in split order.
    pub fn evaluate<E>(
        &self,
        benchmark: &Benchmark,
        encoder: &E,
        measure: &dyn PairSimilarity<E::Encoding>,
        baseline: Option<&dyn PairSimilarity<E::Encoding>>,
    ) -> EvaluationResult<BenchmarkResult>
    where
        E: SentenceEncoder + ?Sized,
    {
        let _span = info_span!("evaluate", benchmark = benchmark.name()).entered();
        info!(
            version = VERSION,
            measure = measure.name(),
            baseline = baseline.map(|b| b.name()),
            splits = benchmark.splits().len(),
            n_samples = benchmark.n_pairs(),
            bootstrap = self.bootstrap.is_some(),
            "starting evaluation"
        );
        if self.bootstrap.is_some() && baseline.is_none() {
            warn!("bootstrap requested without a baseline measure; skipping intervals");
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut results = Vec::with_capacity(benchmark.splits().len());
        for split in benchmark.splits() {
            let result = self.evaluate_split(split, encoder, measure, baseline, &mut rng)?;
            results.push((split.name().to_string(), result));
        }

        let result = BenchmarkResult::new(benchmark.name(), results);
        info!(
            pearson_wmean = result.all.pearson.wmean,
            spearman_wmean = result.all.spearman.wmean,
            "evaluation finished"
        );
        Ok(result)
    }

    fn evaluate_split<E>(
        &self,
        split: &DatasetSplit,
        encoder: &E,
        measure: &dyn PairSimilarity<E::Encoding>,
        baseline: Option<&dyn PairSimilarity<E::Encoding>>,
        rng: &mut ChaCha8Rng,
    ) -> EvaluationResult<SplitResult>
    where
        E: SentenceEncoder + ?Sized,
    {
        let started = Instant::now();
        let scores = self.scorer.score(split, encoder, measure, baseline)?;
        let gold = split.gold_scores();

        let pearson = stats::pearson(gold, &scores.system)?;
        let spearman = stats::spearman(gold, &scores.system)?;

        let comparison = match &scores.baseline {
            Some(base) => {
                let base_r = stats::pearson(gold, base)?.coefficient;
                let conf_int = match &self.bootstrap {
                    Some(settings) => Some(stats::paired_delta_interval(
                        gold,
                        &scores.system,
                        base,
                        settings,
                        rng,
                    )?),
                    None => None,
                };
                Some(Comparison {
                    delta: pearson.coefficient - base_r,
                    baseline: base_r,
                    conf_int,
                })
            }
            None => None,
        };

        debug!(
            split = split.name(),
            n_samples = split.len(),
            sanitized_scores = scores.sanitized,
            pearson = pearson.coefficient,
            spearman = spearman.coefficient,
            delta = comparison.map(|c| c.delta),
            significant = comparison.and_then(|c| c.is_significant()),
            ci_lower = comparison.and_then(|c| c.conf_int).map(|ci| ci.lower),
            ci_upper = comparison.and_then(|c| c.conf_int).map(|ci| ci.upper),
            split_eval_time_ms = started.elapsed().as_millis() as u64,
            "evaluated split"
        );

        Ok(SplitResult {
            pearson,
            spearman,
            n_samples: split.len(),
            comparison,
        })
    }

    /// Load and evaluate each task from `task_path`, keyed by task name.
    pub fn evaluate_tasks<E>(
        &self,
        task_path: &Path,
        tasks: &[StsTask],
        encoder: &E,
        measure: &dyn PairSimilarity<E::Encoding>,
        baseline: Option<&dyn PairSimilarity<E::Encoding>>,
    ) -> EvaluationResult<BTreeMap<String, BenchmarkResult>>
    where
        E: SentenceEncoder + ?Sized,
    {
        let mut results = BTreeMap::new();
        for task in tasks {
            let benchmark = task.load(task_path)?;
            let result = self.evaluate(&benchmark, encoder, measure, baseline)?;
            results.insert(task.name().to_string(), result);
        }
        Ok(results)
    }

    /// Evaluate the configured measure (and baseline) on the configured
    /// tasks under the configured task path.
    ///
    /// Embedding measures encode with `word_vectors`; token measures use
    /// the raw tokens.
    pub fn evaluate_configured(
        &self,
        config: &FbowConfig,
        word_vectors: &WordVectorEncoder,
    ) -> EvaluationResult<BTreeMap<String, BenchmarkResult>> {
        let tasks = configured_tasks(config)?;
        let task_path = config.evaluation.effective_task_path();
        let measures = resolve_measures(config)?;

        match (&measures.measure, &measures.baseline) {
            (NamedMeasure::Embedding(m), None) => {
                self.evaluate_tasks(&task_path, &tasks, word_vectors, m, None)
            }
            (NamedMeasure::Embedding(m), Some(NamedMeasure::Embedding(b))) => {
                let b: &dyn PairSimilarity<EmbeddingBag> = b;
                self.evaluate_tasks(&task_path, &tasks, word_vectors, m, Some(b))
            }
            (NamedMeasure::Token(m), None) => {
                self.evaluate_tasks(&task_path, &tasks, &TokenEncoder, m, None)
            }
            (NamedMeasure::Token(m), Some(NamedMeasure::Token(b))) => {
                let b: &dyn PairSimilarity<Sentence> = b;
                self.evaluate_tasks(&task_path, &tasks, &TokenEncoder, m, Some(b))
            }
            // Mixed pairs are rejected by `resolve_measures`.
            (_, Some(_)) => Err(mixed_levels_error().into()),
        }
    }
}

/// The candidate measure and optional baseline named in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguredMeasures {
    pub measure: NamedMeasure,
    pub baseline: Option<NamedMeasure>,
}

/// Resolve `similarity.measure` and `similarity.baseline` by name.
pub fn configured_measures(config: &FbowConfig) -> Result<ConfiguredMeasures, SimilarityError> {
    let measure = NamedMeasure::from_name(config.similarity.effective_measure())?;
    let baseline = config
        .similarity
        .baseline
        .as_deref()
        .map(NamedMeasure::from_name)
        .transpose()?;
    Ok(ConfiguredMeasures { measure, baseline })
}

/// `configured_measures` with failures reported against the config field.
fn resolve_measures(config: &FbowConfig) -> Result<ConfiguredMeasures, ConfigError> {
    let invalid = |field: &str, e: SimilarityError| ConfigError::ValidationFailed {
        field: field.to_string(),
        message: e.to_string(),
    };
    let measure = NamedMeasure::from_name(config.similarity.effective_measure())
        .map_err(|e| invalid("similarity.measure", e))?;
    let baseline = match config.similarity.baseline.as_deref() {
        Some(name) => {
            Some(NamedMeasure::from_name(name).map_err(|e| invalid("similarity.baseline", e))?)
        }
        None => None,
    };
    if baseline
        .as_ref()
        .is_some_and(|b| b.is_token_level() != measure.is_token_level())
    {
        return Err(mixed_levels_error());
    }
    Ok(ConfiguredMeasures { measure, baseline })
}

fn mixed_levels_error() -> ConfigError {
    ConfigError::ValidationFailed {
        field: "similarity.baseline".to_string(),
        message: "baseline must compare the same input as the measure (tokens or embeddings)"
            .to_string(),
    }
}

/// Tasks named in the configuration; all supported tasks when none are named.
pub fn configured_tasks(config: &FbowConfig) -> Result<Vec<StsTask>, DatasetError> {
    config
        .evaluation
        .effective_tasks()
        .iter()
        .map(|name| name.parse())
        .collect()
}
