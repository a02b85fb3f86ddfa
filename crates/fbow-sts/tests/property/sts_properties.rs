use fbow_core::errors::SimilarityError;
use fbow_core::types::Sentence;
use fbow_similarity::PairSimilarity;
use fbow_sts::dataset::split::pair_order;
use fbow_sts::stats::{pearson_r, rank_average};
use fbow_sts::{BatchScorer, DatasetSplit, TokenEncoder};
use proptest::prelude::*;

/// Scores a pair by a hash of both sentences, so any reordering shows up.
struct Fingerprint;

impl PairSimilarity<Sentence> for Fingerprint {
    fn name(&self) -> &str {
        "fingerprint"
    }

    fn similarity(&self, x: &Sentence, y: &Sentence) -> Result<f64, SimilarityError> {
        let bytes = x.iter().chain(y).flat_map(|w| w.bytes());
        Ok(bytes.fold(17u64, |h, b| h.wrapping_mul(31).wrapping_add(b as u64)) as f64)
    }
}

fn arb_sentence() -> impl Strategy<Value = Sentence> {
    prop::collection::vec("[a-d]{1,3}", 0..5)
}

fn arb_split() -> impl Strategy<Value = DatasetSplit> {
    prop::collection::vec((arb_sentence(), arb_sentence(), 0.0f64..5.0), 1..40).prop_map(
        |pairs| {
            let (s1, rest): (Vec<_>, Vec<_>) = pairs.into_iter().map(|(a, b, g)| (a, (b, g))).unzip();
            let (s2, gold): (Vec<_>, Vec<_>) = rest.into_iter().unzip();
            DatasetSplit::new("prop", s1, s2, gold).unwrap()
        },
    )
}

// ── Loader sort invariant ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn split_pairs_are_sorted(split in arb_split()) {
        let (s1, s2, gold) = split.parts();
        for i in 1..split.len() {
            let prev = (&s1[i - 1], &s2[i - 1], gold[i - 1]);
            let next = (&s1[i], &s2[i], gold[i]);
            prop_assert_ne!(pair_order(prev, next), std::cmp::Ordering::Greater);
        }
    }
}

// ── Batch order preservation ──────────────────────────────────────────────

proptest! {
    #[test]
    fn batch_size_never_changes_scores(split in arb_split(), batch_size in 1usize..50) {
        let reference: Vec<f64> = split
            .sentences1()
            .iter()
            .zip(split.sentences2())
            .map(|(x, y)| {
                // Scorer replaces empty sentences with the placeholder token.
                let x = if x.is_empty() { vec![".".to_string()] } else { x.clone() };
                let y = if y.is_empty() { vec![".".to_string()] } else { y.clone() };
                Fingerprint.similarity(&x, &y).unwrap()
            })
            .collect();
        let scores = BatchScorer::new(batch_size)
            .unwrap()
            .score(&split, &TokenEncoder, &Fingerprint, None)
            .unwrap();
        prop_assert_eq!(scores.system, reference);
    }
}

// ── Ranks and correlation ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn ranks_sum_to_triangular_number(values in prop::collection::vec(-10i32..10, 1..30)) {
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        let n = values.len() as f64;
        let sum: f64 = rank_average(&values).iter().sum();
        prop_assert!((sum - n * (n + 1.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn pearson_is_bounded_and_symmetric(
        pairs in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 2..30)
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let r = pearson_r(&x, &y);
        let r_rev = pearson_r(&y, &x);
        if r.is_nan() {
            prop_assert!(r_rev.is_nan());
        } else {
            prop_assert!((-1.0..=1.0).contains(&r));
            prop_assert!((r - r_rev).abs() < 1e-12);
        }
    }
}
