use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use planar_graphlib::Graph;
use std::hint::black_box;
use std::time::Duration;

/// Triangulated grid: maximal-ish planar, so the density shortcut never fires.
fn triangulated_grid(side: usize) -> Graph<usize> {
    let mut g = Graph::with_capacity(side * side, 3 * side * side);
    for y in 0..side {
        for x in 0..side {
            let v = y * side + x;
            if x + 1 < side {
                g.add_edge(v, v + 1);
            }
            if y + 1 < side {
                g.add_edge(v, v + side);
                if x + 1 < side {
                    g.add_edge(v, v + side + 1);
                }
            }
        }
    }
    g
}

/// Grid plus one long chord per row, which makes larger instances non-planar late in the test.
fn chorded_grid(side: usize) -> Graph<usize> {
    let mut g = triangulated_grid(side);
    for y in 1..side.saturating_sub(1) {
        g.add_edge(y * side, (side - 1 - y) * side + side - 1);
    }
    g
}

fn bench_lr_planarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("lr_planarity");
    group.measurement_time(Duration::from_secs(10));

    for side in [10usize, 30, 60] {
        let planar = triangulated_grid(side);
        group.bench_with_input(
            BenchmarkId::new("check/triangulated_grid", side),
            &planar,
            |b, g| b.iter(|| black_box(planarity::check(black_box(g)).ok())),
        );

        let chorded = chorded_grid(side);
        group.bench_with_input(
            BenchmarkId::new("is_planar/chorded_grid", side),
            &chorded,
            |b, g| b.iter(|| black_box(planarity::is_planar(black_box(g)).ok())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_lr_planarity);
criterion_main!(benches);
