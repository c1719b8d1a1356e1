//! Criterion benchmarks for the hull builder.
//! Focus sizes: n in {3, 10, 100, 1000, 10000}.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use geozone::compute_hull;
use geozone::sample::{scatter, PointCount, ReplayToken, ScatterCfg};

fn cloud(n: usize, seed: u64) -> Vec<geozone::Coordinate> {
    let cfg = ScatterCfg {
        count: PointCount::Fixed(n),
        ..ScatterCfg::default()
    };
    scatter(cfg, ReplayToken { seed, index: 0 })
}

fn bench_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull");
    for &n in &[3usize, 10, 100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("disk", n), &n, |b, &n| {
            b.iter_batched(
                || cloud(n, 43),
                |pts| {
                    let _h = compute_hull(&pts);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("snapped", n), &n, |b, &n| {
            let cfg = ScatterCfg {
                count: PointCount::Fixed(n),
                snap_deg: Some(0.001),
                ..ScatterCfg::default()
            };
            b.iter_batched(
                || scatter(cfg, ReplayToken { seed: 44, index: 0 }),
                |pts| {
                    let _h = compute_hull(&pts);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hull);
criterion_main!(benches);
