use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use planar_graphlib::Graph;
use planar_layout::{LayoutOptions, layout};
use std::hint::black_box;
use std::time::Duration;

fn ring_with_chords(n: usize) -> Graph<usize> {
    let mut g = Graph::with_capacity(n, 2 * n);
    for v in 0..n {
        g.add_edge(v, (v + 1) % n);
        if v % 5 == 0 {
            g.add_edge(v, (v + n / 2) % n);
        }
    }
    g
}

fn bench_fruchterman_reingold(c: &mut Criterion) {
    let mut group = c.benchmark_group("fruchterman_reingold");
    group.measurement_time(Duration::from_secs(10));

    // Disable early convergence so every case runs the full iteration budget.
    let opts = LayoutOptions {
        threshold: 0.0,
        ..Default::default()
    };
    for n in [25usize, 100, 250] {
        let g = ring_with_chords(n);
        group.bench_with_input(BenchmarkId::new("layout/ring_with_chords", n), &g, |b, g| {
            b.iter(|| black_box(layout(black_box(g), &opts).ok()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fruchterman_reingold);
criterion_main!(benches);
