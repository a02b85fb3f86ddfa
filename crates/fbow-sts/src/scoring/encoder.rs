//! Encoders turn token lists into whatever a similarity measure consumes.

use std::io::{BufRead, BufReader};
use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

use fbow_core::constants::EMPTY_SENTENCE_PLACEHOLDER;
use fbow_core::errors::{DatasetError, EvaluationResult, SimilarityError};
use fbow_core::types::{EmbeddingBag, Sentence};

/// Encodes a batch of sentences, one encoding per sentence, in order.
pub trait SentenceEncoder: Sync {
    type Encoding: Send + Sync;

    fn encode(&self, batch: &[Sentence]) -> EvaluationResult<Vec<Self::Encoding>>;
}

/// Substitute the placeholder token for an empty sentence.
fn non_empty(sentence: &Sentence) -> std::borrow::Cow<'_, Sentence> {
    if sentence.is_empty() {
        std::borrow::Cow::Owned(vec![EMPTY_SENTENCE_PLACEHOLDER.to_string()])
    } else {
        std::borrow::Cow::Borrowed(sentence)
    }
}

/// Passes tokens through unchanged, for token-set measures.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenEncoder;

impl SentenceEncoder for TokenEncoder {
    type Encoding = Sentence;

    fn encode(&self, batch: &[Sentence]) -> EvaluationResult<Vec<Sentence>> {
        Ok(batch.iter().map(|s| non_empty(s).into_owned()).collect())
    }
}

/// Looks tokens up in an in-memory word-vector table.
///
/// Out-of-vocabulary tokens are skipped. A sentence with no known token
/// becomes a single zero vector, so no bag is ever empty.
#[derive(Debug, Clone)]
pub struct WordVectorEncoder {
    dim: usize,
    vectors: FxHashMap<String, Vec<f64>>,
}

impl WordVectorEncoder {
    pub fn new<I>(dim: usize, vectors: I) -> Result<Self, SimilarityError>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        if dim == 0 {
            return Err(SimilarityError::ZeroDimension);
        }
        let mut table = FxHashMap::default();
        for (word, vector) in vectors {
            if vector.len() != dim {
                return Err(SimilarityError::DimensionMismatch {
                    expected: dim,
                    actual: vector.len(),
                });
            }
            table.insert(word, vector);
        }
        Ok(Self {
            dim,
            vectors: table,
        })
    }

    /// Load vectors from a word2vec-style text file.
    ///
    /// The first line (`<count> <dim>`) is skipped; each following line is
    /// `word v1 v2 ...`. When `vocabulary` is given only those words are kept.
    /// `normalize` scales every kept vector to unit length.
    pub fn load_text(
        path: &Path,
        vocabulary: Option<&FxHashSet<String>>,
        normalize: bool,
    ) -> Result<Self, DatasetError> {
        let io_err = |e: std::io::Error| DatasetError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        let file = std::fs::File::open(path).map_err(io_err)?;
        let reader = BufReader::new(file);

        let mut dim = None;
        let mut vectors = FxHashMap::default();
        for (i, line) in reader.lines().enumerate().skip(1) {
            let line = line.map_err(io_err)?;
            let Some((word, rest)) = line.split_once(' ') else {
                continue;
            };
            if vocabulary.is_some_and(|v| !v.contains(word)) {
                continue;
            }
            let mut vector = rest
                .split_whitespace()
                .map(str::parse::<f64>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| DatasetError::MalformedLine {
                    path: path.display().to_string(),
                    line: i + 1,
                    message: e.to_string(),
                })?;
            let expected = *dim.get_or_insert(vector.len());
            if vector.len() != expected || expected == 0 {
                return Err(DatasetError::MalformedLine {
                    path: path.display().to_string(),
                    line: i + 1,
                    message: format!("expected {expected} components, got {}", vector.len()),
                });
            }
            if normalize {
                let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    vector.iter_mut().for_each(|v| *v /= norm);
                }
            }
            vectors.insert(word.to_string(), vector);
        }

        let dim = dim.ok_or_else(|| DatasetError::MalformedLine {
            path: path.display().to_string(),
            line: 1,
            message: "no word vectors found".to_string(),
        })?;
        info!(
            path = %path.display(),
            words = vectors.len(),
            dim,
            "loaded word vectors"
        );
        Ok(Self { dim, vectors })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectors.len()
    }

    fn encode_one(&self, sentence: &Sentence) -> Result<EmbeddingBag, SimilarityError> {
        let sentence = non_empty(sentence);
        let rows: Vec<&[f64]> = sentence
            .iter()
            .filter_map(|w| self.vectors.get(w).map(Vec::as_slice))
            .collect();
        if rows.is_empty() {
            EmbeddingBag::zeros(self.dim)
        } else {
            EmbeddingBag::from_rows(&rows)
        }
    }
}

impl SentenceEncoder for WordVectorEncoder {
    type Encoding = EmbeddingBag;

    fn encode(&self, batch: &[Sentence]) -> EvaluationResult<Vec<EmbeddingBag>> {
        batch
            .iter()
            .map(|s| self.encode_one(s).map_err(Into::into))
            .collect()
    }
}
