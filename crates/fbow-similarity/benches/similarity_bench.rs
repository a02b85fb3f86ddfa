//! Micro-benchmarks for the similarity operators on sentence-sized bags.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fbow_core::types::EmbeddingBag;
use fbow_similarity::universe::random_normal;
use fbow_similarity::{SimilarityKind, SimilarityMeasure};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DIM: usize = 300;

fn random_bag(n_words: usize, rng: &mut ChaCha8Rng) -> EmbeddingBag {
    let u = random_normal(n_words, DIM, rng).unwrap();
    EmbeddingBag::from_matrix(u.as_matrix().clone())
}

fn bench_operators(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(1111);
    let x = random_bag(12, &mut rng);
    let y = random_bag(15, &mut rng);

    let mut group = c.benchmark_group("similarity");
    for kind in SimilarityKind::ALL.into_iter().filter(|k| !k.requires_universe()) {
        let measure = SimilarityMeasure::new(kind).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(kind), &measure, |b, m| {
            b.iter(|| m.score(black_box(&x), black_box(&y)))
        });
    }
    let fbow = SimilarityMeasure::fbow_jaccard(random_normal(DIM, DIM, &mut rng).unwrap());
    group.bench_function("fbow_jaccard_300", |b| {
        b.iter(|| fbow.score(black_box(&x), black_box(&y)))
    });
    group.finish();
}

criterion_group!(benches, bench_operators);
criterion_main!(benches);
