mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ring_scatter::prelude::*;

fn filled_registry(count: usize, seed: u64) -> OccupancyRegistry {
    let config = common::bench_config(count);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut registry = OccupancyRegistry::with_capacity(count);
    for _ in 0..count {
        if let Some(p) = place_one(
            &config.region,
            &registry,
            &config.tokens,
            Scope::TokensOnly,
            &AnnulusSampling,
            &mut rng,
        ) {
            registry.record(PlacedPoint::new(p, Category::Token));
        }
    }
    registry
}

fn min_distance_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/min_distance_squared");

    for &count in &common::TOKEN_COUNTS {
        let registry = filled_registry(count, 0xA11CE ^ count as u64);
        group.throughput(common::elements_throughput(registry.len()));

        let mut rng = StdRng::seed_from_u64(0xBEEF);
        let region = SpawnRegion::new(4.0, 20.0);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let candidate = sample_annulus_point(&region, &mut rng);
                black_box(registry.min_distance_squared(candidate, Scope::All));
            });
        });
    }

    group.finish();
}

fn place_one_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/place_one");

    for &count in &common::TOKEN_COUNTS {
        let config = common::bench_config(count);
        let registry = filled_registry(count, 0xC0FFEE ^ count as u64);
        group.throughput(common::elements_throughput(1));

        let mut rng = StdRng::seed_from_u64(0xE57 ^ count as u64);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let p = place_one(
                    &config.region,
                    &registry,
                    &config.obstacles,
                    Scope::All,
                    &AnnulusSampling,
                    &mut rng,
                );
                black_box(p);
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = min_distance_benches, place_one_benches
}
criterion_main!(benches);
