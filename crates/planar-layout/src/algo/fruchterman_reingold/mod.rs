//! Fruchterman-Reingold force-directed relaxation.
//!
//! Every pair of nodes repels with force `k² / d`, every edge attracts its endpoints with force
//! `d² / k`. Each step moves a node along its net force by at most the current temperature,
//! which cools linearly to zero over the configured number of iterations.

use crate::algo::LayoutOptions;
use crate::error::{Error, Result};
use crate::graph::{LayoutResult, LayoutStats, Point};
use indexmap::IndexMap;
use nalgebra as na;
use planar_graphlib::Graph;
use std::hash::Hash;

/// Distances below this are clamped so coincident nodes still push each other apart.
const MIN_DISTANCE: f64 = 0.01;

type Vec2 = na::Vector2<f64>;

pub fn layout<K>(graph: &Graph<K>, opts: &LayoutOptions) -> Result<(LayoutResult<K>, LayoutStats)>
where
    K: Clone + Eq + Hash,
{
    opts.validate()?;

    let n = graph.node_count();
    let (pos, stats) = match n {
        0 => (Vec::new(), LayoutStats::default()),
        1 => (vec![Vec2::from(opts.center)], LayoutStats::default()),
        _ => {
            let mut sim = Simulation::new(graph, opts);
            let stats = sim.run(opts);
            (sim.finish(opts)?, stats)
        }
    };

    let positions: IndexMap<K, Point> = graph
        .nodes()
        .cloned()
        .zip(pos.into_iter().map(Point::from))
        .collect();

    tracing::debug!(
        nodes = n,
        edges = graph.edge_count(),
        iterations = stats.iterations,
        converged = stats.converged,
        "fruchterman-reingold layout"
    );
    Ok((LayoutResult { positions }, stats))
}

struct Simulation {
    pos: Vec<Vec2>,
    disp: Vec<Vec2>,
    edges: Vec<(usize, usize)>,
    k: f64,
}

impl Simulation {
    fn new<K>(graph: &Graph<K>, opts: &LayoutOptions) -> Self
    where
        K: Clone + Eq + Hash,
    {
        let n = graph.node_count();
        let mut rng = XorShift64Star::new(opts.seed);
        let pos: Vec<Vec2> = (0..n)
            .map(|_| {
                let x = rng.next_f64_unit();
                let y = rng.next_f64_unit();
                Vec2::new(x, y)
            })
            .collect();
        let edges: Vec<(usize, usize)> = (0..graph.edge_count())
            .filter_map(|e| graph.edge_ixs(e))
            .collect();
        let k = opts
            .optimal_distance
            .unwrap_or_else(|| (1.0 / n as f64).sqrt());
        Self {
            pos,
            disp: vec![Vec2::zeros(); n],
            edges,
            k,
        }
    }

    fn extent(&self) -> f64 {
        let mut min = Vec2::repeat(f64::INFINITY);
        let mut max = Vec2::repeat(f64::NEG_INFINITY);
        for p in &self.pos {
            min = min.inf(p);
            max = max.sup(p);
        }
        (max - min).max()
    }

    fn run(&mut self, opts: &LayoutOptions) -> LayoutStats {
        let n = self.pos.len() as f64;
        let mut t = 0.1 * self.extent();
        let dt = t / (opts.iterations as f64 + 1.0);
        let mut stats = LayoutStats::default();

        for _ in 0..opts.iterations {
            self.accumulate_forces();
            let moved = self.step(t);
            stats.iterations += 1;
            t -= dt;
            if moved / n < opts.threshold {
                stats.converged = true;
                break;
            }
        }
        stats
    }

    fn accumulate_forces(&mut self) {
        let k2 = self.k * self.k;
        self.disp.fill(Vec2::zeros());

        for i in 0..self.pos.len() {
            for j in i + 1..self.pos.len() {
                let delta = self.pos[i] - self.pos[j];
                let d = delta.norm().max(MIN_DISTANCE);
                let f = delta * (k2 / (d * d));
                self.disp[i] += f;
                self.disp[j] -= f;
            }
        }

        for &(u, v) in &self.edges {
            let delta = self.pos[u] - self.pos[v];
            let d = delta.norm().max(MIN_DISTANCE);
            let f = delta * (d / self.k);
            self.disp[u] -= f;
            self.disp[v] += f;
        }
    }

    /// Moves every node by at most `t`; returns the norm of the combined movement.
    fn step(&mut self, t: f64) -> f64 {
        let mut moved_sq = 0.0;
        for (p, d) in self.pos.iter_mut().zip(&self.disp) {
            let mut length = d.norm();
            if length < MIN_DISTANCE {
                length = 0.1;
            }
            let delta = d * (t / length);
            moved_sq += delta.norm_squared();
            *p += delta;
        }
        moved_sq.sqrt()
    }

    /// Centres on the mean, rescales to `opts.scale` and translates to `opts.center`.
    fn finish(mut self, opts: &LayoutOptions) -> Result<Vec<Vec2>> {
        if let Some(node_ix) = self.pos.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
            tracing::error!(node_ix, "non-finite position after relaxation");
            return Err(Error::NonFinitePosition { node_ix });
        }

        let mean = self.pos.iter().sum::<Vec2>() / self.pos.len() as f64;
        let mut lim: f64 = 0.0;
        for p in &mut self.pos {
            *p -= mean;
            lim = lim.max(p.amax());
        }
        let factor = if lim > 0.0 { opts.scale / lim } else { 1.0 };
        let center = Vec2::from(opts.center);
        for p in &mut self.pos {
            *p = *p * factor + center;
        }
        Ok(self.pos)
    }
}

/// Small deterministic PRNG for initial placement.
#[derive(Debug, Clone)]
struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    fn new(seed: u64) -> Self {
        // The all-zero state is a fixed point, so the seed is mixed before use.
        Self {
            state: (seed ^ 0x9E3779B97F4A7C15_u64).max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::{Simulation, XorShift64Star};
    use crate::algo::LayoutOptions;
    use planar_graphlib::Graph;

    #[test]
    fn xorshift64star_unit_samples_stay_in_range() {
        let mut rng = XorShift64Star::new(0);
        for _ in 0..10_000 {
            let v = rng.next_f64_unit();
            assert!((0.0..1.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn xorshift64star_is_seeded() {
        let a: Vec<u64> = {
            let mut rng = XorShift64Star::new(7);
            (0..4).map(|_| rng.next_u64()).collect()
        };
        let b: Vec<u64> = {
            let mut rng = XorShift64Star::new(7);
            (0..4).map(|_| rng.next_u64()).collect()
        };
        let c: Vec<u64> = {
            let mut rng = XorShift64Star::new(8);
            (0..4).map(|_| rng.next_u64()).collect()
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn initial_positions_sit_in_the_unit_square() {
        let g = Graph::from_edges((0..30u32).map(|v| (v, v + 1)));
        let sim = Simulation::new(&g, &LayoutOptions::default());
        assert_eq!(sim.pos.len(), 31);
        for p in &sim.pos {
            assert!((0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y));
        }
        assert!(sim.extent() > 0.0 && sim.extent() < 1.0);
        assert!((sim.k - (1.0f64 / 31.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn an_edge_pulls_distant_endpoints_together() {
        let g = Graph::from_edges([(0u32, 1)]);
        let mut sim = Simulation::new(&g, &LayoutOptions::default());
        sim.pos[0] = nalgebra::Vector2::new(0.0, 0.0);
        sim.pos[1] = nalgebra::Vector2::new(10.0, 0.0);
        sim.accumulate_forces();
        assert!(sim.disp[0].x > 0.0);
        assert!(sim.disp[1].x < 0.0);
    }

    #[test]
    fn step_never_exceeds_the_temperature() {
        let g = Graph::from_edges([(0u32, 1), (1, 2), (2, 0)]);
        let mut sim = Simulation::new(&g, &LayoutOptions::default());
        let before = sim.pos.clone();
        sim.accumulate_forces();
        sim.step(0.05);
        for (a, b) in before.iter().zip(&sim.pos) {
            assert!((a - b).norm() <= 0.05 + 1e-12);
        }
    }
}
