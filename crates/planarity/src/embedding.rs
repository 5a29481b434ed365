//! Rotation systems (combinatorial embeddings).
//!
//! A rotation system lists, for every node, the clockwise cyclic order of its neighbours in a
//! crossing-free drawing. Only the cyclic order is meaningful; which neighbour is listed first
//! is arbitrary.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// Half-edge arena used while the embedding is assembled.
///
/// Each half-edge `(from, to)` sits in a cyclic doubly linked list around `from`; `cw` / `ccw`
/// hold half-edge indices, never references.
#[derive(Debug, Clone)]
pub(crate) struct RotationBuilder {
    half_to: Vec<usize>,
    cw: Vec<usize>,
    ccw: Vec<usize>,
    half_ix: FxHashMap<(usize, usize), usize>,
    first: Vec<Option<usize>>,
}

impl RotationBuilder {
    pub(crate) fn new(node_count: usize, edge_count: usize) -> Self {
        let halves = edge_count.saturating_mul(2);
        let mut half_ix = FxHashMap::default();
        half_ix.reserve(halves);
        Self {
            half_to: Vec::with_capacity(halves),
            cw: Vec::with_capacity(halves),
            ccw: Vec::with_capacity(halves),
            half_ix,
            first: vec![None; node_count],
        }
    }

    fn alloc(&mut self, from: usize, to: usize) -> Result<usize> {
        let h = self.half_to.len();
        if self.half_ix.insert((from, to), h).is_some() {
            return Err(Error::invariant(format!(
                "half-edge ({from}, {to}) inserted twice"
            )));
        }
        self.half_to.push(to);
        self.cw.push(h);
        self.ccw.push(h);
        Ok(h)
    }

    fn half(&self, from: usize, to: usize) -> Result<usize> {
        self.half_ix
            .get(&(from, to))
            .copied()
            .ok_or_else(|| Error::invariant(format!("missing reference half-edge ({from}, {to})")))
    }

    fn insert_cw_of(&mut self, reference: usize, h: usize) {
        let after = self.cw[reference];
        self.cw[reference] = h;
        self.ccw[h] = reference;
        self.cw[h] = after;
        self.ccw[after] = h;
    }

    /// Inserts `from -> to` directly clockwise of `from -> reference`.
    pub(crate) fn add_cw(&mut self, from: usize, to: usize, reference: Option<usize>) -> Result<()> {
        let h = self.alloc(from, to)?;
        match reference {
            None => self.first[from] = Some(h),
            Some(r) => {
                let r = self.half(from, r)?;
                self.insert_cw_of(r, h);
            }
        }
        Ok(())
    }

    /// Inserts `from -> to` directly counter-clockwise of `from -> reference`.
    pub(crate) fn add_ccw(
        &mut self,
        from: usize,
        to: usize,
        reference: Option<usize>,
    ) -> Result<()> {
        let h = self.alloc(from, to)?;
        match reference {
            None => self.first[from] = Some(h),
            Some(r) => {
                let r = self.half(from, r)?;
                let before = self.ccw[r];
                self.insert_cw_of(before, h);
                if self.first[from] == Some(r) {
                    self.first[from] = Some(h);
                }
            }
        }
        Ok(())
    }

    /// Inserts `from -> to` as the new first half-edge around `from`.
    pub(crate) fn add_first(&mut self, from: usize, to: usize) -> Result<()> {
        let reference = self.first[from].map(|h| self.half_to[h]);
        self.add_ccw(from, to, reference)
    }

    /// Walks every node's list clockwise from its first half-edge.
    pub(crate) fn finish(self) -> Result<Vec<Vec<usize>>> {
        let total = self.half_to.len();
        let mut out: Vec<Vec<usize>> = Vec::with_capacity(self.first.len());
        for first in &self.first {
            let mut order: Vec<usize> = Vec::new();
            if let Some(start) = *first {
                let mut h = start;
                loop {
                    order.push(self.half_to[h]);
                    h = self.cw[h];
                    if h == start {
                        break;
                    }
                    if order.len() > total {
                        return Err(Error::invariant("rotation list does not close"));
                    }
                }
            }
            out.push(order);
        }
        Ok(out)
    }
}

/// Clockwise neighbour order per node, in graph node order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationSystem<K>
where
    K: Clone + Eq + Hash,
{
    rotation: IndexMap<K, Vec<usize>>,
}

impl<K> RotationSystem<K>
where
    K: Clone + Eq + Hash,
{
    /// `ids[i]` owns `cw[i]`, whose entries index back into `ids`.
    pub(crate) fn from_parts(ids: impl IntoIterator<Item = K>, cw: Vec<Vec<usize>>) -> Self {
        Self {
            rotation: ids.into_iter().zip(cw).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rotation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotation.is_empty()
    }

    /// Number of half-edges, i.e. twice the number of embedded edges.
    pub fn half_edge_count(&self) -> usize {
        self.rotation.values().map(Vec::len).sum()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.rotation.contains_key(id)
    }

    /// Neighbours of `id` in clockwise order, or `None` for unknown ids.
    pub fn neighbors_cw(&self, id: &K) -> Option<Vec<&K>> {
        let order = self.rotation.get(id)?;
        Some(order.iter().filter_map(|&ix| self.id(ix)).collect())
    }

    /// `(id, clockwise neighbours)` for every node, in graph node order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, Vec<&K>)> {
        self.rotation
            .iter()
            .map(|(id, order)| (id, order.iter().filter_map(|&ix| self.id(ix)).collect()))
    }

    fn id(&self, ix: usize) -> Option<&K> {
        self.rotation.get_index(ix).map(|(id, _)| id)
    }

    /// Traces the faces of the embedding as index half-edge cycles.
    ///
    /// The successor of half-edge `(v, w)` is `(w, u)` where `u` is the neighbour of `w` directly
    /// counter-clockwise of `v`. Isolated nodes contribute no face.
    fn face_cycles(&self) -> Vec<Vec<(usize, usize)>> {
        let mut pos: FxHashMap<(usize, usize), usize> = FxHashMap::default();
        pos.reserve(self.half_edge_count());
        for (v, (_, order)) in self.rotation.iter().enumerate() {
            for (i, &w) in order.iter().enumerate() {
                pos.insert((v, w), i);
            }
        }

        let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
        seen.reserve(pos.len());
        let mut faces: Vec<Vec<(usize, usize)>> = Vec::new();
        for (v, (_, order)) in self.rotation.iter().enumerate() {
            for &w in order {
                if seen.contains(&(v, w)) {
                    continue;
                }
                let mut face: Vec<(usize, usize)> = Vec::new();
                let (mut a, mut b) = (v, w);
                while seen.insert((a, b)) {
                    face.push((a, b));
                    let Some((_, around_b)) = self.rotation.get_index(b) else {
                        break;
                    };
                    let Some(&i) = pos.get(&(b, a)) else {
                        break;
                    };
                    let len = around_b.len();
                    let next = around_b[(i + len - 1) % len];
                    (a, b) = (b, next);
                }
                faces.push(face);
            }
        }
        faces
    }

    /// Faces as lists of `(from, to)` half-edges.
    pub fn faces(&self) -> Vec<Vec<(&K, &K)>> {
        self.face_cycles()
            .into_iter()
            .map(|face| {
                face.into_iter()
                    .filter_map(|(a, b)| Some((self.id(a)?, self.id(b)?)))
                    .collect()
            })
            .collect()
    }

    /// Number of traced faces, counted per component: a graph with `k` components that have
    /// edges reports `k` outer faces here, one per component.
    pub fn face_count(&self) -> usize {
        self.face_cycles().len()
    }

    /// Number of connected components that contain at least one edge.
    pub fn components_with_edges(&self) -> usize {
        let mut visited = vec![false; self.rotation.len()];
        let mut stack: Vec<usize> = Vec::new();
        let mut count = 0;
        for (start, (_, order)) in self.rotation.iter().enumerate() {
            if visited[start] || order.is_empty() {
                continue;
            }
            count += 1;
            visited[start] = true;
            stack.push(start);
            while let Some(v) = stack.pop() {
                let Some((_, around)) = self.rotation.get_index(v) else {
                    continue;
                };
                for &w in around {
                    if let Some(seen) = visited.get_mut(w) {
                        if !*seen {
                            *seen = true;
                            stack.push(w);
                        }
                    }
                }
            }
        }
        count
    }
}
