//! Classical set and multiset Jaccard over raw tokens.

use rustc_hash::{FxHashMap, FxHashSet};

/// Jaccard over the token sets. 0.0 if either sentence is empty.
pub fn set_jaccard<S: AsRef<str>>(x: &[S], y: &[S]) -> f64 {
    if x.is_empty() || y.is_empty() {
        return 0.0;
    }
    let xs: FxHashSet<&str> = x.iter().map(AsRef::as_ref).collect();
    let ys: FxHashSet<&str> = y.iter().map(AsRef::as_ref).collect();
    let inter = xs.intersection(&ys).count();
    let union = xs.union(&ys).count();
    inter as f64 / union as f64
}

fn token_counts<S: AsRef<str>>(tokens: &[S]) -> FxHashMap<&str, usize> {
    let mut counts = FxHashMap::default();
    for t in tokens {
        *counts.entry(t.as_ref()).or_insert(0) += 1;
    }
    counts
}

/// Jaccard over token multisets: Σ min(count) / Σ max(count).
/// 0.0 if either sentence is empty.
pub fn bag_jaccard<S: AsRef<str>>(x: &[S], y: &[S]) -> f64 {
    if x.is_empty() || y.is_empty() {
        return 0.0;
    }
    let xc = token_counts(x);
    let yc = token_counts(y);
    let mut inter = 0usize;
    let mut union = 0usize;
    for (token, &cx) in &xc {
        let cy = yc.get(token).copied().unwrap_or(0);
        inter += cx.min(cy);
        union += cx.max(cy);
    }
    union += yc
        .iter()
        .filter(|(token, _)| !xc.contains_key(*token))
        .map(|(_, &cy)| cy)
        .sum::<usize>();
    inter as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_jaccard() {
        let x = ["a", "cat", "sat", "a"];
        let y = ["a", "dog", "sat"];
        // {a, cat, sat} vs {a, dog, sat}: 2 / 4
        assert!((set_jaccard(&x, &y) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_bag_jaccard_counts_repeats() {
        let x = ["a", "a", "b"];
        let y = ["a", "c"];
        // min: a=1 → 1; max: a=2, b=1, c=1 → 4
        assert!((bag_jaccard(&x, &y) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sentence_scores_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(set_jaccard(&empty, &["a"]), 0.0);
        assert_eq!(bag_jaccard(&["a"], &empty), 0.0);
    }
}
