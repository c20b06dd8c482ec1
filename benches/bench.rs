// Criterion benchmarks for Branch Locator

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use branch_locator::core::{haversine_distance, ProximityResolver, StatsAggregator};
use branch_locator::models::{Branch, DistanceAlert, GeoPoint};
use branch_locator::services::{NotificationSink, NotifyError};
use chrono::Utc;
use std::sync::Arc;

struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _alert: &DistanceAlert) -> Result<(), NotifyError> {
        Ok(())
    }
}

fn create_branch(id: usize, lat: f64, lon: f64) -> Branch {
    Branch {
        id: id as i64,
        name: format!("Branch {}", id),
        address: format!("Calle {} # 10-20", id),
        location: GeoPoint::new(lat, lon),
        rating: if id % 4 == 0 { None } else { Some((id % 50) as f64 / 10.0) },
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn create_registry(count: usize) -> Vec<Branch> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.013) % 8.0;
            let lon_offset = (i as f64 * 0.017) % 6.0;
            create_branch(i, 1.0 + lat_offset, -78.0 + lon_offset)
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(4.7110),
                black_box(-74.0721),
                black_box(6.2442),
                black_box(-75.5812),
            )
        });
    });
}

fn bench_resolve(c: &mut Criterion) {
    let resolver = ProximityResolver::with_sink(Arc::new(NullSink));

    let mut group = c.benchmark_group("resolve");

    for branch_count in [10, 100, 1000, 10000].iter() {
        let branches = create_registry(*branch_count);

        group.bench_with_input(
            BenchmarkId::new("nearest", branch_count),
            branch_count,
            |b, _| {
                b.iter(|| {
                    resolver.resolve(
                        black_box(Some(4.7110)),
                        black_box(Some(-74.0721)),
                        black_box(Some(10.0)),
                        black_box(&branches),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let aggregator = StatsAggregator::new();
    let branches = create_registry(1000);

    c.bench_function("stats_1000_branches", |b| {
        b.iter(|| aggregator.compute(black_box(&branches)));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_resolve,
    bench_stats
);

criterion_main!(benches);
