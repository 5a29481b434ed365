//! Left-right planarity test.
//!
//! Three depth-first passes over the graph:
//!
//! 1. orientation: turns every edge into a tree edge or a back edge and computes heights,
//!    `lowpt` / `lowpt2` and the nesting depth used to order each node's outgoing edges;
//! 2. testing: walks the oriented edges in nesting order, keeping a stack of conflict pairs
//!    (left/right intervals of return edges). A return edge that fits on neither side proves the
//!    graph non-planar and stops the test;
//! 3. embedding: resolves every edge's side through its `ref` chain and assembles a rotation
//!    system.
//!
//! All per-edge state is kept in flat arrays indexed by the graph's edge index, so intervals and
//! `ref` links are plain indices. Every pass uses an explicit frame stack instead of recursion.
//! Sorting outgoing edges by nesting depth makes the whole test O(E log E).

use crate::embedding::RotationBuilder;
use crate::error::{Error, Result};
use planar_graphlib::Graph;
use std::hash::Hash;

const UNSEEN: usize = usize::MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Interval {
    low: Option<usize>,
    high: Option<usize>,
}

impl Interval {
    fn single(e: usize) -> Self {
        Self {
            low: Some(e),
            high: Some(e),
        }
    }

    fn is_empty(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    fn conflicting(&self, b: usize, lowpt: &[usize]) -> bool {
        self.high.is_some_and(|h| lowpt[h] > lowpt[b])
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ConflictPair {
    left: Interval,
    right: Interval,
}

impl ConflictPair {
    fn swap(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    fn lowest(&self, lowpt: &[usize]) -> Option<usize> {
        let l = self.left.low.map(|e| lowpt[e]);
        let r = self.right.low.map(|e| lowpt[e]);
        if self.left.is_empty() {
            return r;
        }
        if self.right.is_empty() {
            return l;
        }
        match (l, r) {
            (Some(l), Some(r)) => Some(l.min(r)),
            (l, r) => l.or(r),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DfsFrame {
    v_ix: usize,
    next_edge: usize,
    descended: bool,
}

impl DfsFrame {
    fn new(v_ix: usize) -> Self {
        Self {
            v_ix,
            next_edge: 0,
            descended: false,
        }
    }
}

pub(crate) enum Outcome {
    NotPlanar,
    Planar(Vec<Vec<usize>>),
}

pub(crate) struct LrPlanarity<'g, K>
where
    K: Clone + Eq + Hash,
{
    g: &'g Graph<K>,

    height: Vec<usize>,
    parent_edge: Vec<Option<usize>>,
    roots: Vec<usize>,

    oriented: Vec<bool>,
    source: Vec<usize>,
    target: Vec<usize>,
    /// Outgoing oriented edges per node; sorted by nesting depth before testing.
    out_edges: Vec<Vec<usize>>,

    lowpt: Vec<usize>,
    lowpt2: Vec<usize>,
    nesting_depth: Vec<i64>,

    ref_: Vec<Option<usize>>,
    side: Vec<i8>,
    lowpt_edge: Vec<Option<usize>>,
    stack: Vec<ConflictPair>,
    stack_bottom: Vec<Option<ConflictPair>>,
}

impl<'g, K> LrPlanarity<'g, K>
where
    K: Clone + Eq + Hash,
{
    pub(crate) fn new(g: &'g Graph<K>) -> Self {
        let n = g.node_count();
        let m = g.edge_count();
        Self {
            g,
            height: vec![UNSEEN; n],
            parent_edge: vec![None; n],
            roots: Vec::new(),
            oriented: vec![false; m],
            source: vec![0; m],
            target: vec![0; m],
            out_edges: vec![Vec::new(); n],
            lowpt: vec![0; m],
            lowpt2: vec![0; m],
            nesting_depth: vec![0; m],
            ref_: vec![None; m],
            side: vec![1; m],
            lowpt_edge: vec![None; m],
            stack: Vec::new(),
            stack_bottom: vec![None; m],
        }
    }

    /// Runs the test; `Planar` carries clockwise neighbour indices per node.
    pub(crate) fn run(mut self, with_embedding: bool) -> Result<Outcome> {
        let n = self.g.node_count();
        let m = self.g.edge_count();
        if n > 2 && m > 3 * n - 6 {
            tracing::trace!(nodes = n, edges = m, "edge count exceeds 3V-6");
            return Ok(Outcome::NotPlanar);
        }

        self.orient();
        for v in 0..n {
            let mut out = std::mem::take(&mut self.out_edges[v]);
            out.sort_by_key(|&e| self.nesting_depth[e]);
            self.out_edges[v] = out;
        }

        let roots = self.roots.clone();
        for &root in &roots {
            if !self.test_from(root)? {
                return Ok(Outcome::NotPlanar);
            }
        }

        if !with_embedding {
            return Ok(Outcome::Planar(Vec::new()));
        }
        Ok(Outcome::Planar(self.embed()?))
    }

    fn orient(&mut self) {
        let mut stack: Vec<DfsFrame> = Vec::new();
        for root in 0..self.g.node_count() {
            if self.height[root] != UNSEEN {
                continue;
            }
            self.height[root] = 0;
            self.roots.push(root);
            stack.push(DfsFrame::new(root));

            while let Some(frame) = stack.last_mut() {
                let v = frame.v_ix;
                let Some(inc) = self.g.incident(v).get(frame.next_edge).copied() else {
                    stack.pop();
                    if let Some(e) = self.parent_edge[v] {
                        self.finish_orientation(e);
                    }
                    continue;
                };
                frame.next_edge += 1;

                let e = inc.edge_ix;
                if self.oriented[e] {
                    continue;
                }
                let w = inc.neighbor_ix;
                self.oriented[e] = true;
                self.source[e] = v;
                self.target[e] = w;
                self.out_edges[v].push(e);

                let hv = self.height[v];
                self.lowpt[e] = hv;
                self.lowpt2[e] = hv;
                if self.height[w] == UNSEEN {
                    // Tree edge: finished once `w` is exhausted.
                    self.parent_edge[w] = Some(e);
                    self.height[w] = hv + 1;
                    stack.push(DfsFrame::new(w));
                } else {
                    self.lowpt[e] = self.height[w];
                    self.finish_orientation(e);
                }
            }
        }
    }

    /// Sets the nesting depth of `e` and folds its lowpoints into the parent edge of its source.
    fn finish_orientation(&mut self, e: usize) {
        let v = self.source[e];
        let chordal = self.lowpt2[e] < self.height[v];
        self.nesting_depth[e] = 2 * self.lowpt[e] as i64 + i64::from(chordal);

        let Some(pe) = self.parent_edge[v] else {
            return;
        };
        if self.lowpt[e] < self.lowpt[pe] {
            self.lowpt2[pe] = self.lowpt[pe].min(self.lowpt2[e]);
            self.lowpt[pe] = self.lowpt[e];
        } else if self.lowpt[e] > self.lowpt[pe] {
            self.lowpt2[pe] = self.lowpt2[pe].min(self.lowpt[e]);
        } else {
            self.lowpt2[pe] = self.lowpt2[pe].min(self.lowpt2[e]);
        }
    }

    fn is_tree_edge(&self, e: usize) -> bool {
        self.parent_edge[self.target[e]] == Some(e)
    }

    fn test_from(&mut self, root: usize) -> Result<bool> {
        let mut stack: Vec<DfsFrame> = vec![DfsFrame::new(root)];
        while let Some(frame) = stack.last_mut() {
            let v = frame.v_ix;
            let Some(&ei) = self.out_edges[v].get(frame.next_edge) else {
                stack.pop();
                if let Some(e) = self.parent_edge[v] {
                    self.remove_back_edges(e)?;
                }
                continue;
            };
            let first = frame.next_edge == 0;

            if !frame.descended {
                self.stack_bottom[ei] = self.stack.last().copied();
                if self.is_tree_edge(ei) {
                    frame.descended = true;
                    stack.push(DfsFrame::new(self.target[ei]));
                    continue;
                }
                self.lowpt_edge[ei] = Some(ei);
                self.stack.push(ConflictPair {
                    left: Interval::default(),
                    right: Interval::single(ei),
                });
            }
            frame.descended = false;
            frame.next_edge += 1;

            // Integrate the return edges of `ei`.
            if self.lowpt[ei] < self.height[v] {
                let e = self.parent_edge[v].ok_or_else(|| {
                    Error::invariant("return edge below the height of a DFS root")
                })?;
                if first {
                    self.lowpt_edge[e] = self.lowpt_edge[ei];
                } else if !self.add_constraints(ei, e)? {
                    tracing::trace!(edge = ei, "conflicting return edges");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn add_constraints(&mut self, ei: usize, e: usize) -> Result<bool> {
        let mut p = ConflictPair::default();

        // Merge the return edges of `ei` into `p.right`.
        loop {
            let mut q = self
                .stack
                .pop()
                .ok_or_else(|| Error::invariant("conflict stack drained below its bottom"))?;
            if !q.left.is_empty() {
                q.swap();
            }
            if !q.left.is_empty() {
                return Ok(false);
            }
            let q_low = q
                .right
                .low
                .ok_or_else(|| Error::invariant("right interval without a low edge"))?;
            if self.lowpt[q_low] > self.lowpt[e] {
                if p.right.is_empty() {
                    p.right = q.right;
                } else if let Some(p_low) = p.right.low {
                    self.ref_[p_low] = q.right.high;
                }
                p.right.low = q.right.low;
            } else {
                self.ref_[q_low] = self.lowpt_edge[e];
            }
            if self.stack.last().copied() == self.stack_bottom[ei] {
                break;
            }
        }

        // Merge the conflicting return edges of earlier siblings into `p.left`.
        while let Some(top) = self.stack.last() {
            if !(top.left.conflicting(ei, &self.lowpt) || top.right.conflicting(ei, &self.lowpt)) {
                break;
            }
            let Some(mut q) = self.stack.pop() else {
                break;
            };
            if q.right.conflicting(ei, &self.lowpt) {
                q.swap();
            }
            if q.right.conflicting(ei, &self.lowpt) {
                return Ok(false);
            }
            if let Some(p_low) = p.right.low {
                self.ref_[p_low] = q.right.high;
            }
            if q.right.low.is_some() {
                p.right.low = q.right.low;
            }
            if p.left.is_empty() {
                p.left = q.left;
            } else if let Some(p_low) = p.left.low {
                self.ref_[p_low] = q.left.high;
            }
            p.left.low = q.left.low;
        }

        if !(p.left.is_empty() && p.right.is_empty()) {
            self.stack.push(p);
        }
        Ok(true)
    }

    /// Drops return edges ending at the source of tree edge `e` and fixes the side of `e`.
    fn remove_back_edges(&mut self, e: usize) -> Result<()> {
        let u = self.source[e];
        let hu = self.height[u];

        while self
            .stack
            .last()
            .is_some_and(|p| p.lowest(&self.lowpt) == Some(hu))
        {
            if let Some(p) = self.stack.pop() {
                if let Some(low) = p.left.low {
                    self.side[low] = -1;
                }
            }
        }

        if let Some(mut p) = self.stack.pop() {
            while let Some(h) = p.left.high {
                if self.target[h] != u {
                    break;
                }
                p.left.high = self.ref_[h];
            }
            if p.left.high.is_none() {
                if let Some(low) = p.left.low.take() {
                    self.ref_[low] = p.right.low;
                    self.side[low] = -1;
                }
            }

            while let Some(h) = p.right.high {
                if self.target[h] != u {
                    break;
                }
                p.right.high = self.ref_[h];
            }
            if p.right.high.is_none() {
                if let Some(low) = p.right.low.take() {
                    self.ref_[low] = p.left.low;
                    self.side[low] = -1;
                }
            }
            self.stack.push(p);
        }

        if self.lowpt[e] < hu {
            let top = self
                .stack
                .last()
                .ok_or_else(|| Error::invariant("edge with a return edge but empty conflict stack"))?;
            self.ref_[e] = match (top.left.high, top.right.high) {
                (Some(hl), Some(hr)) if self.lowpt[hl] > self.lowpt[hr] => Some(hl),
                (Some(hl), None) => Some(hl),
                (_, hr) => hr,
            };
        }
        Ok(())
    }

    /// Resolves the side of `e` relative to the edge at the end of its `ref` chain.
    fn sign(&mut self, e: usize) -> i8 {
        let mut chain: Vec<usize> = vec![e];
        let mut cur = e;
        while let Some(r) = self.ref_[cur].take() {
            chain.push(r);
            cur = r;
        }
        for i in (0..chain.len() - 1).rev() {
            self.side[chain[i]] *= self.side[chain[i + 1]];
        }
        self.side[e]
    }

    fn embed(&mut self) -> Result<Vec<Vec<usize>>> {
        let n = self.g.node_count();
        let m = self.g.edge_count();
        for e in 0..m {
            let s = self.sign(e);
            self.nesting_depth[e] *= i64::from(s);
        }
        for v in 0..n {
            let mut out = std::mem::take(&mut self.out_edges[v]);
            out.sort_by_key(|&e| self.nesting_depth[e]);
            self.out_edges[v] = out;
        }

        let mut rot = RotationBuilder::new(n, m);
        for v in 0..n {
            let mut previous: Option<usize> = None;
            for &e in &self.out_edges[v] {
                let w = self.target[e];
                rot.add_cw(v, w, previous)?;
                previous = Some(w);
            }
        }

        let mut left_ref: Vec<Option<usize>> = vec![None; n];
        let mut right_ref: Vec<Option<usize>> = vec![None; n];
        let mut stack: Vec<DfsFrame> = Vec::new();
        for &root in &self.roots {
            stack.push(DfsFrame::new(root));
            while let Some(frame) = stack.last_mut() {
                let v = frame.v_ix;
                let Some(&ei) = self.out_edges[v].get(frame.next_edge) else {
                    stack.pop();
                    continue;
                };
                frame.next_edge += 1;

                let w = self.target[ei];
                if self.is_tree_edge(ei) {
                    rot.add_first(w, v)?;
                    left_ref[v] = Some(w);
                    right_ref[v] = Some(w);
                    stack.push(DfsFrame::new(w));
                } else if self.side[ei] == 1 {
                    let reference = right_ref[w]
                        .ok_or_else(|| Error::invariant("back edge to a node without a right ref"))?;
                    rot.add_cw(w, v, Some(reference))?;
                } else {
                    let reference = left_ref[w]
                        .ok_or_else(|| Error::invariant("back edge to a node without a left ref"))?;
                    rot.add_ccw(w, v, Some(reference))?;
                    left_ref[w] = Some(v);
                }
            }
        }

        rot.finish()
    }
}
