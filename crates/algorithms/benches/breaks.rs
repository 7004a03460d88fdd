//! Benchmarks for natural breaks classification

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use natbreaks_algorithms::classification::{
    exact_partition, quantile, refine, RefineParams,
};
use natbreaks_core::SortedSampleSet;

fn create_samples(size: usize) -> SortedSampleSet {
    // Terrain-like mix of bands and a deterministic ripple
    let values: Vec<f64> = (0..size)
        .map(|i| {
            let band = (i % 5) as f64 * 400.0;
            let ripple = ((i * 7 + 13) % 100) as f64 / 10.0;
            1500.0 + band + ripple
        })
        .collect();
    SortedSampleSet::new(values).unwrap()
}

fn bench_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("jenks_exact");

    for size in [256, 1024, 4096].iter() {
        let samples = create_samples(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| exact_partition(black_box(&samples), 7).unwrap())
        });
    }

    group.finish();
}

fn bench_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("jenks_local_search");

    for size in [256, 1024, 4096, 65536].iter() {
        let samples = create_samples(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let initial = quantile(black_box(&samples), 7).unwrap();
                refine(&initial, &RefineParams::default()).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_exact, bench_local_search);
criterion_main!(benches);
