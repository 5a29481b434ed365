//! Internal storage entries for [`Graph`](super::Graph).

use super::Incident;

#[derive(Debug, Clone)]
pub(in crate::graph) struct NodeEntry<K> {
    pub(in crate::graph) id: K,
    pub(in crate::graph) incident: Vec<Incident>,
}

#[derive(Debug, Clone, Copy)]
pub(in crate::graph) struct EdgeEntry {
    pub(in crate::graph) v_ix: usize,
    pub(in crate::graph) w_ix: usize,
}
