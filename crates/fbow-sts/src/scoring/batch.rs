//! Batched scoring of a split.

use rayon::prelude::*;
use tracing::debug;

use fbow_core::constants::DEFAULT_BATCH_SIZE;
use fbow_core::errors::{ConfigError, EvaluationError, EvaluationResult};
use fbow_core::types::Sentence;
use fbow_similarity::PairSimilarity;

use crate::dataset::DatasetSplit;

use super::encoder::SentenceEncoder;

/// Per-pair scores for one split, in the split's (sorted) order.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitScores {
    pub system: Vec<f64>,
    pub baseline: Option<Vec<f64>>,
    /// How many non-finite scores were replaced with 0.0.
    pub sanitized: usize,
}

/// Scores sentence pairs in contiguous, fixed-size batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchScorer {
    batch_size: usize,
}

impl Default for BatchScorer {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl BatchScorer {
    pub fn new(batch_size: usize) -> Result<Self, ConfigError> {
        if batch_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "evaluation.batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(Self { batch_size })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Score every pair of `split` with `measure` and, if given, `baseline`.
    ///
    /// Each side of a batch is encoded once; both measures reuse the
    /// encodings. Non-finite scores are replaced with 0.0 and counted.
    pub fn score<E>(
        &self,
        split: &DatasetSplit,
        encoder: &E,
        measure: &dyn PairSimilarity<E::Encoding>,
        baseline: Option<&dyn PairSimilarity<E::Encoding>>,
    ) -> EvaluationResult<SplitScores>
    where
        E: SentenceEncoder + ?Sized,
    {
        let (sentences1, sentences2, _) = split.parts();
        let mut system = Vec::with_capacity(split.len());
        let mut base = baseline.map(|_| Vec::with_capacity(split.len()));
        let mut sanitized = 0usize;

        for (batch1, batch2) in sentences1
            .chunks(self.batch_size)
            .zip(sentences2.chunks(self.batch_size))
        {
            let enc1 = encode_checked(encoder, batch1)?;
            let enc2 = encode_checked(encoder, batch2)?;

            let (scores, n) = score_pairs(measure, &enc1, &enc2)?;
            system.extend(scores);
            sanitized += n;

            if let (Some(baseline), Some(base)) = (baseline, base.as_mut()) {
                let (scores, n) = score_pairs(baseline, &enc1, &enc2)?;
                base.extend(scores);
                sanitized += n;
            }
        }

        if sanitized > 0 {
            debug!(
                split = split.name(),
                sanitized_scores = sanitized,
                "replaced non-finite similarity scores with 0"
            );
        }

        Ok(SplitScores {
            system,
            baseline: base,
            sanitized,
        })
    }
}

fn encode_checked<E>(encoder: &E, batch: &[Sentence]) -> EvaluationResult<Vec<E::Encoding>>
where
    E: SentenceEncoder + ?Sized,
{
    let encoded = encoder.encode(batch)?;
    if encoded.len() != batch.len() {
        return Err(EvaluationError::EncoderCountMismatch {
            expected: batch.len(),
            actual: encoded.len(),
        });
    }
    Ok(encoded)
}

/// Score aligned encodings in parallel, preserving order.
fn score_pairs<T: Send + Sync>(
    measure: &dyn PairSimilarity<T>,
    left: &[T],
    right: &[T],
) -> EvaluationResult<(Vec<f64>, usize)> {
    let raw = left
        .par_iter()
        .zip(right.par_iter())
        .map(|(x, y)| measure.similarity(x, y))
        .collect::<Result<Vec<f64>, _>>()?;

    let mut sanitized = 0;
    let scores = raw
        .into_iter()
        .map(|s| {
            if s.is_finite() {
                s
            } else {
                sanitized += 1;
                0.0
            }
        })
        .collect();
    Ok((scores, sanitized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbow_core::errors::SimilarityError;
    use fbow_similarity::TokenMeasure;

    use crate::scoring::TokenEncoder;

    /// Scores a pair by the length of its first sentence.
    struct FirstLength;

    impl PairSimilarity<Sentence> for FirstLength {
        fn name(&self) -> &str {
            "first_length"
        }

        fn similarity(&self, x: &Sentence, _y: &Sentence) -> Result<f64, SimilarityError> {
            Ok(x.len() as f64)
        }
    }

    /// Returns NaN for every pair.
    struct AlwaysNan;

    impl PairSimilarity<Sentence> for AlwaysNan {
        fn name(&self) -> &str {
            "always_nan"
        }

        fn similarity(&self, _x: &Sentence, _y: &Sentence) -> Result<f64, SimilarityError> {
            Ok(f64::NAN)
        }
    }

    /// Drops the last sentence of every batch.
    struct ShortEncoder;

    impl SentenceEncoder for ShortEncoder {
        type Encoding = Sentence;

        fn encode(&self, batch: &[Sentence]) -> EvaluationResult<Vec<Sentence>> {
            Ok(batch[..batch.len().saturating_sub(1)].to_vec())
        }
    }

    fn split(n: usize) -> DatasetSplit {
        let s1: Vec<Sentence> = (1..=n).map(|k| vec!["w".to_string(); k]).collect();
        let s2: Vec<Sentence> = (0..n).map(|_| vec!["w".to_string()]).collect();
        let gold: Vec<f64> = (0..n).map(|k| k as f64).collect();
        DatasetSplit::new("toy", s1, s2, gold).unwrap()
    }

    #[test]
    fn test_order_preserved_across_batch_sizes() {
        let split = split(20);
        let expected: Vec<f64> = (1..=20).map(|k| k as f64).collect();
        for batch_size in [1, 7, 20] {
            let scores = BatchScorer::new(batch_size)
                .unwrap()
                .score(&split, &TokenEncoder, &FirstLength, None)
                .unwrap();
            assert_eq!(scores.system, expected, "batch_size {batch_size}");
            assert!(scores.baseline.is_none());
        }
    }

    #[test]
    fn test_baseline_scored_alongside() {
        let split = split(5);
        let scores = BatchScorer::default()
            .score(&split, &TokenEncoder, &FirstLength, Some(&TokenMeasure::SetJaccard))
            .unwrap();
        assert_eq!(scores.baseline, Some(vec![1.0; 5]));
    }

    #[test]
    fn test_non_finite_scores_are_zeroed() {
        let split = split(4);
        let scores = BatchScorer::new(3)
            .unwrap()
            .score(&split, &TokenEncoder, &AlwaysNan, Some(&AlwaysNan))
            .unwrap();
        assert_eq!(scores.system, vec![0.0; 4]);
        assert_eq!(scores.baseline, Some(vec![0.0; 4]));
        assert_eq!(scores.sanitized, 8);
    }

    #[test]
    fn test_encoder_count_mismatch() {
        let split = split(3);
        let err = BatchScorer::default()
            .score(&split, &ShortEncoder, &FirstLength, None)
            .unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::EncoderCountMismatch { expected: 3, actual: 2 }
        ));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(matches!(
            BatchScorer::new(0),
            Err(ConfigError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_empty_split_yields_no_scores() {
        let split = DatasetSplit::new("empty", vec![], vec![], vec![]).unwrap();
        let scores = BatchScorer::default()
            .score(&split, &TokenEncoder, &FirstLength, None)
            .unwrap();
        assert!(scores.system.is_empty());
    }
}
