use fbow_core::types::{EmbeddingBag, Universe};
use fbow_similarity::fuzzy::{dynamax_dice, dynamax_jaccard, dynamax_otsuka};
use fbow_similarity::{fuzzify, SimilarityKind, SimilarityMeasure};
use proptest::prelude::*;

fn arb_bag(dim: usize) -> impl Strategy<Value = EmbeddingBag> {
    prop::collection::vec(prop::collection::vec(-1.0f64..1.0, dim), 1..6)
        .prop_map(|rows| EmbeddingBag::from_rows(&rows).unwrap())
}

fn arb_pair() -> impl Strategy<Value = (EmbeddingBag, EmbeddingBag)> {
    (1usize..8).prop_flat_map(|d| (arb_bag(d), arb_bag(d)))
}

fn arb_pair_with_universe() -> impl Strategy<Value = (EmbeddingBag, EmbeddingBag, Universe)> {
    (1usize..8).prop_flat_map(|d| {
        (
            arb_bag(d),
            arb_bag(d),
            prop::collection::vec(prop::collection::vec(-1.0f64..1.0, d), 1..10)
                .prop_map(|rows| Universe::from_rows(&rows).unwrap()),
        )
    })
}

fn close(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

fn is_nonzero(bag: &EmbeddingBag) -> bool {
    bag.rows().any(|r| r.iter().any(|&v| v != 0.0))
}

// ── Symmetry ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_operator_is_symmetric((x, y) in arb_pair()) {
        for kind in SimilarityKind::ALL.into_iter().filter(|k| !k.requires_universe()) {
            let m = SimilarityMeasure::new(kind).unwrap();
            let xy = m.score(&x, &y).unwrap();
            let yx = m.score(&y, &x).unwrap();
            prop_assert!(close(xy, yx), "{}: {} vs {}", kind, xy, yx);
        }
    }

    #[test]
    fn fbow_jaccard_is_symmetric((x, y, u) in arb_pair_with_universe()) {
        let m = SimilarityMeasure::fbow_jaccard(u);
        let xy = m.score(&x, &y).unwrap();
        let yx = m.score(&y, &x).unwrap();
        prop_assert!(close(xy, yx), "{} vs {}", xy, yx);
    }
}

// ── Range ─────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn dynamax_scores_lie_in_unit_interval((x, y) in arb_pair()) {
        for score in [
            dynamax_jaccard(&x, &y).unwrap(),
            dynamax_otsuka(&x, &y).unwrap(),
            dynamax_dice(&x, &y).unwrap(),
        ] {
            if score.is_finite() {
                prop_assert!((0.0..=1.0 + 1e-12).contains(&score), "out of range: {}", score);
            }
        }
    }

    #[test]
    fn dynamax_jaccard_self_similarity_is_one((x, _) in arb_pair()) {
        prop_assume!(is_nonzero(&x));
        prop_assert_eq!(dynamax_jaccard(&x, &x).unwrap(), 1.0);
    }
}

// ── Fuzzifier ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn fuzzify_is_clipped_max_of_affinities((x, _, u) in arb_pair_with_universe()) {
        let m = fuzzify(&x, &u).unwrap();
        prop_assert_eq!(m.len(), u.n_concepts());
        for (k, concept) in u.rows().enumerate() {
            let pre_clip = x
                .rows()
                .map(|w| w.iter().zip(concept).map(|(a, b)| a * b).sum::<f64>())
                .fold(f64::NEG_INFINITY, f64::max);
            let value = m.as_slice()[k];
            prop_assert!(value >= 0.0);
            prop_assert_eq!(value, pre_clip.max(0.0));
        }
    }
}
