//! Traversal helpers over [`Graph`].

use super::Graph;
use std::collections::VecDeque;
use std::hash::Hash;

/// Partitions the node indices into connected components.
///
/// Components are discovered breadth-first, seeded in node insertion order, so the output is
/// deterministic for a given graph. Isolated nodes form singleton components.
pub fn component_ixs<K>(g: &Graph<K>) -> Vec<Vec<usize>>
where
    K: Clone + Eq + Hash,
{
    let n = g.node_count();
    let mut seen: Vec<bool> = vec![false; n];
    let mut out: Vec<Vec<usize>> = Vec::new();
    let mut q: VecDeque<usize> = VecDeque::new();

    for start in 0..n {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut comp: Vec<usize> = Vec::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for w in g.neighbor_ixs(v) {
                if !seen[w] {
                    seen[w] = true;
                    q.push_back(w);
                }
            }
        }
        out.push(comp);
    }

    out
}

/// Partitions the node ids into connected components (see [`component_ixs`]).
pub fn components<K>(g: &Graph<K>) -> Vec<Vec<K>>
where
    K: Clone + Eq + Hash,
{
    component_ixs(g)
        .into_iter()
        .map(|comp| {
            comp.into_iter()
                .filter_map(|ix| g.node(ix).cloned())
                .collect()
        })
        .collect()
}

pub fn component_count<K>(g: &Graph<K>) -> usize
where
    K: Clone + Eq + Hash,
{
    component_ixs(g).len()
}
