//! Undirected simple graph container.
//!
//! This module contains the core `Graph` container plus the traversal helpers re-exported as
//! `planar_graphlib::alg`.

use hashbrown::Equivalent;
use rustc_hash::FxBuildHasher;
use std::hash::Hash;

pub mod alg;
mod edge_key;
mod entries;

pub(crate) use edge_key::EdgeKey;
use entries::{EdgeEntry, NodeEntry};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Outcome of [`Graph::add_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    /// A new edge was stored at this edge index.
    Inserted(usize),
    /// The pair was already connected; the existing edge index is returned.
    Duplicate(usize),
    /// Both endpoints were equal. Nothing was stored, not even the endpoint.
    SelfLoop,
}

impl EdgeInsert {
    pub fn edge_ix(self) -> Option<usize> {
        match self {
            EdgeInsert::Inserted(ix) | EdgeInsert::Duplicate(ix) => Some(ix),
            EdgeInsert::SelfLoop => None,
        }
    }
}

/// One entry of a node's incidence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Incident {
    pub neighbor_ix: usize,
    pub edge_ix: usize,
}

#[derive(Debug, Clone)]
pub struct Graph<K>
where
    K: Clone + Eq + Hash,
{
    nodes: Vec<NodeEntry<K>>,
    node_index: HashMap<K, usize>,

    edges: Vec<EdgeEntry>,
    edge_index: HashMap<EdgeKey, usize>,
}

impl<K> Default for Graph<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Graph<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut node_index = HashMap::default();
        node_index.reserve(nodes);
        let mut edge_index = HashMap::default();
        edge_index.reserve(edges);
        Self {
            nodes: Vec::with_capacity(nodes),
            node_index,
            edges: Vec::with_capacity(edges),
            edge_index,
        }
    }

    /// Builds a graph from `(a, b)` pairs, dropping self-loops and duplicate pairs.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (K, K)>,
    {
        let mut g = Self::new();
        for (a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    /// Registers `id` if it is unknown and returns its node index.
    pub fn add_node(&mut self, id: K) -> usize {
        if let Some(&ix) = self.node_index.get(&id) {
            return ix;
        }
        let ix = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            incident: Vec::new(),
        });
        self.node_index.insert(id, ix);
        ix
    }

    /// Connects `a` and `b`, registering unknown endpoints.
    ///
    /// Edges are unordered: `(a, b)` and `(b, a)` name the same edge, and the orientation of the
    /// first insertion is the one reported by [`Graph::edges`].
    pub fn add_edge(&mut self, a: K, b: K) -> EdgeInsert {
        if a == b {
            return EdgeInsert::SelfLoop;
        }
        let v_ix = self.add_node(a);
        let w_ix = self.add_node(b);
        let key = EdgeKey::new(v_ix, w_ix);
        if let Some(&edge_ix) = self.edge_index.get(&key) {
            return EdgeInsert::Duplicate(edge_ix);
        }

        let edge_ix = self.edges.len();
        self.edges.push(EdgeEntry { v_ix, w_ix });
        self.edge_index.insert(key, edge_ix);
        self.nodes[v_ix].incident.push(Incident {
            neighbor_ix: w_ix,
            edge_ix,
        });
        self.nodes[w_ix].incident.push(Incident {
            neighbor_ix: v_ix,
            edge_ix,
        });
        EdgeInsert::Inserted(edge_ix)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn has_node<Q>(&self, id: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.node_index.contains_key(id)
    }

    pub fn node_ix<Q>(&self, id: &Q) -> Option<usize>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.node_index.get(id).copied()
    }

    pub fn node(&self, ix: usize) -> Option<&K> {
        self.nodes.get(ix).map(|n| &n.id)
    }

    pub fn has_edge<Q>(&self, a: &Q, b: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.edge_ix(a, b).is_some()
    }

    pub fn edge_ix<Q>(&self, a: &Q, b: &Q) -> Option<usize>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let v_ix = self.node_ix(a)?;
        let w_ix = self.node_ix(b)?;
        if v_ix == w_ix {
            return None;
        }
        self.edge_index.get(&EdgeKey::new(v_ix, w_ix)).copied()
    }

    /// Node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &K> {
        self.nodes.iter().map(|n| &n.id)
    }

    /// Edges in insertion order, using the orientation of their first insertion.
    pub fn edges(&self) -> impl Iterator<Item = (&K, &K)> {
        self.edges
            .iter()
            .map(|e| (&self.nodes[e.v_ix].id, &self.nodes[e.w_ix].id))
    }

    /// Endpoint node indices of edge `edge_ix`.
    pub fn edge_ixs(&self, edge_ix: usize) -> Option<(usize, usize)> {
        self.edges.get(edge_ix).map(|e| (e.v_ix, e.w_ix))
    }

    /// Neighbours of `id` in the order their edges were inserted.
    pub fn neighbors<Q>(&self, id: &Q) -> Vec<&K>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let Some(ix) = self.node_ix(id) else {
            return Vec::new();
        };
        self.nodes[ix]
            .incident
            .iter()
            .map(|inc| &self.nodes[inc.neighbor_ix].id)
            .collect()
    }

    pub fn degree<Q>(&self, id: &Q) -> usize
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.node_ix(id)
            .map(|ix| self.nodes[ix].incident.len())
            .unwrap_or(0)
    }

    /// Incidence list of node `ix`; empty for unknown indices.
    pub fn incident(&self, ix: usize) -> &[Incident] {
        self.nodes
            .get(ix)
            .map(|n| n.incident.as_slice())
            .unwrap_or(&[])
    }

    pub fn neighbor_ixs(&self, ix: usize) -> impl Iterator<Item = usize> + '_ {
        self.incident(ix).iter().map(|inc| inc.neighbor_ix)
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeInsert, Graph};

    #[test]
    fn add_node_is_idempotent() {
        let mut g: Graph<String> = Graph::new();
        assert_eq!(g.add_node("a".to_string()), 0);
        assert_eq!(g.add_node("b".to_string()), 1);
        assert_eq!(g.add_node("a".to_string()), 0);
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn add_edge_reports_duplicates_in_either_orientation() {
        let mut g: Graph<&str> = Graph::new();
        assert_eq!(g.add_edge("a", "b"), EdgeInsert::Inserted(0));
        assert_eq!(g.add_edge("a", "b"), EdgeInsert::Duplicate(0));
        assert_eq!(g.add_edge("b", "a"), EdgeInsert::Duplicate(0));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(&"a"), 1);
        assert_eq!(g.degree(&"b"), 1);
    }

    #[test]
    fn self_loops_are_not_stored() {
        let mut g: Graph<&str> = Graph::new();
        assert_eq!(g.add_edge("a", "a"), EdgeInsert::SelfLoop);
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(EdgeInsert::SelfLoop.edge_ix(), None);
    }

    #[test]
    fn edges_keep_first_orientation() {
        let mut g: Graph<&str> = Graph::new();
        g.add_edge("b", "a");
        g.add_edge("a", "b");
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(&"b", &"a")]);
        assert_eq!(g.edge_ixs(0), Some((0, 1)));
        assert_eq!(g.edge_ixs(1), None);
    }

    #[test]
    fn string_graphs_accept_str_lookups() {
        let mut g: Graph<String> = Graph::new();
        g.add_edge("a".to_string(), "b".to_string());
        assert!(g.has_node("a"));
        assert!(g.has_edge("b", "a"));
        assert!(!g.has_edge("a", "a"));
        assert_eq!(g.edge_ix("a", "b"), Some(0));
    }
}
