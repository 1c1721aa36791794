use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use cartographer::board::{MapGraph, Province, ProvinceType};
use cartographer::geometry::Point;
use cartographer::parser::AdjacencyDetector;
use cartographer::svg::path::interpret_path;

const CELL: f64 = 100.0;
const VERTICES_PER_SIDE: usize = 8;

/// An `n` x `n` grid of provinces whose shared corners are jittered, so
/// neighbors still share borders but no two maps look alike.
fn jittered_grid(n: usize, seed: u64) -> MapGraph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let corners: Vec<Vec<Point>> = (0..=n)
        .map(|row| {
            (0..=n)
                .map(|col| {
                    Point::new(
                        col as f64 * CELL + rng.gen_range(-20.0..20.0),
                        row as f64 * CELL + rng.gen_range(-20.0..20.0),
                    )
                })
                .collect()
        })
        .collect();

    let mut map = MapGraph::new();
    for row in 0..n {
        for col in 0..n {
            let ring = [
                corners[row][col],
                corners[row][col + 1],
                corners[row + 1][col + 1],
                corners[row + 1][col],
            ];
            let mut boundary = Vec::with_capacity(4 * VERTICES_PER_SIDE + 1);
            for k in 0..4 {
                let (a, b) = (ring[k], ring[(k + 1) % 4]);
                for s in 0..VERTICES_PER_SIDE {
                    let t = s as f64 / VERTICES_PER_SIDE as f64;
                    boundary.push(Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
                }
            }
            boundary.push(ring[0]);
            map.add_province(Province::new(
                format!("P{:03}_{:03}", row, col),
                ProvinceType::Land,
                boundary,
            ));
        }
    }
    map
}

fn bench_adjacency(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjacency");
    for n in [8, 16, 24] {
        let map = jittered_grid(n, 7);
        let parallel = AdjacencyDetector::new(3.0);
        let sequential = AdjacencyDetector {
            parallel: false,
            ..parallel
        };
        group.bench_with_input(BenchmarkId::new("parallel", n * n), &map, |b, map| {
            b.iter(|| parallel.detect(black_box(map)))
        });
        group.bench_with_input(BenchmarkId::new("sequential", n * n), &map, |b, map| {
            b.iter(|| sequential.detect(black_box(map)))
        });
    }
    group.finish();
}

fn bench_interpret_path(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut d = String::from("m 1000,1000");
    for _ in 0..2000 {
        d.push_str(&format!(
            " {:.4},{:.4}",
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0)
        ));
    }
    d.push_str(" z");

    c.bench_function("interpret_path_2000_points", |b| {
        b.iter(|| interpret_path(black_box(&d), Point::new(0.0, 0.0)))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5));
    targets = bench_adjacency, bench_interpret_path
}
criterion_main!(benches);
