//! In-memory dataset splits and benchmarks.

use std::cmp::Ordering;

use fbow_core::errors::DatasetError;
use fbow_core::types::Sentence;

/// One named split: co-indexed sentence pairs and gold scores.
///
/// Pairs are kept stable-sorted by `(len(s1), len(s2), gold)` so that
/// similarly sized sentences share a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit {
    name: String,
    sentences1: Vec<Sentence>,
    sentences2: Vec<Sentence>,
    gold_scores: Vec<f64>,
}

impl DatasetSplit {
    pub fn new(
        name: impl Into<String>,
        sentences1: Vec<Sentence>,
        sentences2: Vec<Sentence>,
        gold_scores: Vec<f64>,
    ) -> Result<Self, DatasetError> {
        let name = name.into();
        if sentences1.len() != sentences2.len() {
            return Err(DatasetError::PairCountMismatch {
                split: name,
                left: sentences1.len(),
                right: sentences2.len(),
            });
        }
        if sentences1.len() != gold_scores.len() {
            return Err(DatasetError::PairCountMismatch {
                split: name,
                left: sentences1.len(),
                right: gold_scores.len(),
            });
        }

        let mut order: Vec<usize> = (0..gold_scores.len()).collect();
        order.sort_by(|&a, &b| {
            pair_order(
                (&sentences1[a], &sentences2[a], gold_scores[a]),
                (&sentences1[b], &sentences2[b], gold_scores[b]),
            )
        });

        let mut s1 = Vec::with_capacity(order.len());
        let mut s2 = Vec::with_capacity(order.len());
        let mut gold = Vec::with_capacity(order.len());
        let mut sentences1: Vec<Option<Sentence>> = sentences1.into_iter().map(Some).collect();
        let mut sentences2: Vec<Option<Sentence>> = sentences2.into_iter().map(Some).collect();
        for i in order {
            s1.extend(sentences1[i].take());
            s2.extend(sentences2[i].take());
            gold.push(gold_scores[i]);
        }

        Ok(Self {
            name,
            sentences1: s1,
            sentences2: s2,
            gold_scores: gold,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sentences1(&self) -> &[Sentence] {
        &self.sentences1
    }

    pub fn sentences2(&self) -> &[Sentence] {
        &self.sentences2
    }

    pub fn gold_scores(&self) -> &[f64] {
        &self.gold_scores
    }

    /// `(sentences1, sentences2, gold_scores)`.
    pub fn parts(&self) -> (&[Sentence], &[Sentence], &[f64]) {
        (&self.sentences1, &self.sentences2, &self.gold_scores)
    }

    pub fn len(&self) -> usize {
        self.gold_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gold_scores.is_empty()
    }
}

/// Sort key for pairs: sentence lengths, then gold score.
pub fn pair_order(a: (&Sentence, &Sentence, f64), b: (&Sentence, &Sentence, f64)) -> Ordering {
    a.0.len()
        .cmp(&b.0.len())
        .then_with(|| a.1.len().cmp(&b.1.len()))
        .then_with(|| a.2.total_cmp(&b.2))
}

/// A named, ordered collection of splits. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Benchmark {
    name: String,
    splits: Vec<DatasetSplit>,
}

impl Benchmark {
    pub fn new(name: impl Into<String>, splits: Vec<DatasetSplit>) -> Self {
        Self {
            name: name.into(),
            splits,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn splits(&self) -> &[DatasetSplit] {
        &self.splits
    }

    pub fn split(&self, name: &str) -> Result<&DatasetSplit, DatasetError> {
        self.splits
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| DatasetError::UnknownSplit {
                benchmark: self.name.clone(),
                split: name.to_string(),
            })
    }

    /// Total number of scored pairs across all splits.
    pub fn n_pairs(&self) -> usize {
        self.splits.iter().map(DatasetSplit::len).sum()
    }
}
