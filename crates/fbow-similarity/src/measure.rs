//! Closed registry of similarity measures.
//!
//! `SimilarityKind` enumerates every embedding-bag operator; adding one means
//! adding a variant and its match arm, so nothing can be registered by name
//! alone. A `SimilarityMeasure` is the configured, ready-to-score form: the
//! kind plus, for `FbowJaccard`, the fixed universe it scores against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use fbow_core::errors::SimilarityError;
use fbow_core::types::{EmbeddingBag, Sentence, Universe};

use crate::{baseline, classical, fuzzy, soft_card};

/// Pairwise similarity over encoded sentences.
///
/// Implementations are pure: the same pair always yields the same score.
/// They may return NaN/Inf for degenerate input; callers sanitize.
pub trait PairSimilarity<E: ?Sized>: Send + Sync {
    /// Registry name of the measure, e.g. "dynamax_jaccard".
    fn name(&self) -> &str;

    fn similarity(&self, x: &E, y: &E) -> Result<f64, SimilarityError>;
}

/// Embedding-bag similarity operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityKind {
    AvgCosine,
    MaxJaccard,
    DynamaxJaccard,
    DynamaxOtsuka,
    DynamaxDice,
    FbowJaccard,
    ScJaccard,
}

impl SimilarityKind {
    pub const ALL: [SimilarityKind; 7] = [
        Self::AvgCosine,
        Self::MaxJaccard,
        Self::DynamaxJaccard,
        Self::DynamaxOtsuka,
        Self::DynamaxDice,
        Self::FbowJaccard,
        Self::ScJaccard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AvgCosine => "avg_cosine",
            Self::MaxJaccard => "max_jaccard",
            Self::DynamaxJaccard => "dynamax_jaccard",
            Self::DynamaxOtsuka => "dynamax_otsuka",
            Self::DynamaxDice => "dynamax_dice",
            Self::FbowJaccard => "fbow_jaccard",
            Self::ScJaccard => "sc_jaccard",
        }
    }

    /// Whether the operator needs a caller-supplied universe.
    pub fn requires_universe(&self) -> bool {
        matches!(self, Self::FbowJaccard)
    }
}

impl fmt::Display for SimilarityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityKind {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SimilarityError::UnknownMeasure(s.to_string()))
    }
}

/// A configured embedding-bag similarity measure.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMeasure {
    kind: SimilarityKind,
    universe: Option<Universe>,
}

impl SimilarityMeasure {
    /// A measure that needs no fixed universe.
    pub fn new(kind: SimilarityKind) -> Result<Self, SimilarityError> {
        if kind.requires_universe() {
            return Err(SimilarityError::MissingUniverse(kind.as_str()));
        }
        Ok(Self {
            kind,
            universe: None,
        })
    }

    /// FBoW-Jaccard bound to a fixed universe.
    pub fn fbow_jaccard(universe: Universe) -> Self {
        Self {
            kind: SimilarityKind::FbowJaccard,
            universe: Some(universe),
        }
    }

    /// Resolve a registry name. `fbow_jaccard` cannot be built by name
    /// since it needs a universe; use [`SimilarityMeasure::fbow_jaccard`].
    pub fn from_name(name: &str) -> Result<Self, SimilarityError> {
        Self::new(name.parse()?)
    }

    pub fn kind(&self) -> SimilarityKind {
        self.kind
    }

    pub fn universe(&self) -> Option<&Universe> {
        self.universe.as_ref()
    }

    /// Score one pair of bags.
    pub fn score(&self, x: &EmbeddingBag, y: &EmbeddingBag) -> Result<f64, SimilarityError> {
        match self.kind {
            SimilarityKind::AvgCosine => baseline::avg_cosine(x, y),
            SimilarityKind::MaxJaccard => fuzzy::max_jaccard(x, y),
            SimilarityKind::DynamaxJaccard => fuzzy::dynamax_jaccard(x, y),
            SimilarityKind::DynamaxOtsuka => fuzzy::dynamax_otsuka(x, y),
            SimilarityKind::DynamaxDice => fuzzy::dynamax_dice(x, y),
            SimilarityKind::FbowJaccard => {
                let universe = self
                    .universe
                    .as_ref()
                    .ok_or(SimilarityError::MissingUniverse(self.kind.as_str()))?;
                fuzzy::fbow_jaccard(universe, x, y)
            }
            SimilarityKind::ScJaccard => soft_card::sc_jaccard(x, y),
        }
    }
}

impl PairSimilarity<EmbeddingBag> for SimilarityMeasure {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn similarity(&self, x: &EmbeddingBag, y: &EmbeddingBag) -> Result<f64, SimilarityError> {
        self.score(x, y)
    }
}

/// Token-level measures that compare raw sentences, not embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenMeasure {
    SetJaccard,
    BagJaccard,
}

impl TokenMeasure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetJaccard => "set_jaccard",
            Self::BagJaccard => "bag_jaccard",
        }
    }
}

impl FromStr for TokenMeasure {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "set_jaccard" => Ok(Self::SetJaccard),
            "bag_jaccard" => Ok(Self::BagJaccard),
            other => Err(SimilarityError::UnknownMeasure(other.to_string())),
        }
    }
}

impl PairSimilarity<Sentence> for TokenMeasure {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn similarity(&self, x: &Sentence, y: &Sentence) -> Result<f64, SimilarityError> {
        Ok(match self {
            Self::SetJaccard => classical::set_jaccard(x.as_slice(), y.as_slice()),
            Self::BagJaccard => classical::bag_jaccard(x.as_slice(), y.as_slice()),
        })
    }
}

/// Any registered measure, resolved from its name.
#[derive(Debug, Clone, PartialEq)]
pub enum NamedMeasure {
    Embedding(SimilarityMeasure),
    Token(TokenMeasure),
}

impl NamedMeasure {
    /// Resolve an embedding-bag or token-level measure by registry name.
    pub fn from_name(name: &str) -> Result<Self, SimilarityError> {
        match name.parse::<SimilarityKind>() {
            Ok(kind) => SimilarityMeasure::new(kind).map(Self::Embedding),
            Err(_) => name.parse::<TokenMeasure>().map(Self::Token),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Embedding(m) => m.kind().as_str(),
            Self::Token(m) => m.as_str(),
        }
    }

    /// Whether the measure compares raw tokens rather than embeddings.
    pub fn is_token_level(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}
