//! Reads STS split files from disk.
//!
//! Layout per split, inside the task directory:
//! - `STS.input.<split>.txt`: one pair per line, `sentence1 TAB sentence2`
//! - `STS.gs.<split>.txt`: one gold score per line; blank lines drop the pair

use std::path::Path;

use tracing::debug;

use fbow_core::constants::{STS_FILE_SUFFIX, STS_GOLD_PREFIX, STS_INPUT_PREFIX};
use fbow_core::errors::DatasetError;
use fbow_core::types::Sentence;

use super::split::{Benchmark, DatasetSplit};

fn read_lines(path: &Path) -> Result<Vec<String>, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

fn tokenize(sentence: &str) -> Sentence {
    sentence.split_whitespace().map(String::from).collect()
}

/// Load one split from `dir`, dropping unscored pairs and sorting the rest.
pub fn load_split(dir: &Path, split: &str) -> Result<DatasetSplit, DatasetError> {
    let input_path = dir.join(format!("{STS_INPUT_PREFIX}{split}{STS_FILE_SUFFIX}"));
    let gold_path = dir.join(format!("{STS_GOLD_PREFIX}{split}{STS_FILE_SUFFIX}"));

    let input_lines = read_lines(&input_path)?;
    let gold_lines = read_lines(&gold_path)?;
    if input_lines.len() != gold_lines.len() {
        return Err(DatasetError::PairCountMismatch {
            split: split.to_string(),
            left: input_lines.len(),
            right: gold_lines.len(),
        });
    }

    let mut sentences1 = Vec::with_capacity(input_lines.len());
    let mut sentences2 = Vec::with_capacity(input_lines.len());
    let mut gold_scores = Vec::with_capacity(input_lines.len());
    let mut dropped = 0usize;

    for (i, (line, raw_gold)) in input_lines.iter().zip(&gold_lines).enumerate() {
        let mut fields = line.split('\t');
        let (left, right) = match (fields.next(), fields.next(), fields.next()) {
            (Some(left), Some(right), None) => (left, right),
            _ => {
                return Err(DatasetError::MalformedLine {
                    path: input_path.display().to_string(),
                    line: i + 1,
                    message: "expected exactly one tab separating the two sentences"
                        .to_string(),
                })
            }
        };

        let raw_gold = raw_gold.trim();
        if raw_gold.is_empty() {
            dropped += 1;
            continue;
        }
        let gold: f64 = raw_gold.parse().map_err(|_| DatasetError::InvalidScore {
            path: gold_path.display().to_string(),
            line: i + 1,
            value: raw_gold.to_string(),
        })?;

        sentences1.push(tokenize(left));
        sentences2.push(tokenize(right));
        gold_scores.push(gold);
    }

    debug!(split, kept = gold_scores.len(), dropped, "loaded STS split");
    DatasetSplit::new(split, sentences1, sentences2, gold_scores)
}

impl Benchmark {
    /// Load every named split from `dir`, keeping the given split order.
    pub fn load_dir<S: AsRef<str>>(
        name: &str,
        dir: &Path,
        split_names: &[S],
    ) -> Result<Self, DatasetError> {
        let splits = split_names
            .iter()
            .map(|s| load_split(dir, s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, splits))
    }
}
