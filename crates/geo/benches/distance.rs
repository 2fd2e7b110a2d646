//! Benchmarks for the distance kernel.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use profinder_geo::{annotate, distance_km, format_distance, sort_by_distance, Coordinate, Location};

fn create_test_items(count: usize) -> Vec<Location> {
    (0..count)
        .map(|i| {
            // Every tenth record has no location
            if i % 10 == 0 {
                return Location::NoLocation;
            }
            // Generate points in a grid around Berlin
            let lat = 52.0 + (i as f64 * 0.01) % 2.0;
            let lng = 13.0 + (i as f64 * 0.01) % 2.0;
            Location::At(Coordinate::new(lat, lng))
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let berlin = Coordinate::new(52.5200, 13.4050);
    let paris = Coordinate::new(48.8566, 2.3522);

    c.bench_function("haversine_single", |b| {
        b.iter(|| distance_km(black_box(&berlin), black_box(&paris)))
    });

    c.bench_function("format_distance", |b| b.iter(|| format_distance(black_box(12.34))));
}

fn bench_annotate_and_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate_and_sort");
    let origin = Coordinate::new(52.5, 13.4);

    for size in [10, 100, 1000, 10000].iter() {
        let items = create_test_items(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut annotated = annotate(black_box(&origin), items.clone());
                sort_by_distance(&mut annotated, |(_, d)| *d);
                annotated
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_annotate_and_sort);
criterion_main!(benches);
