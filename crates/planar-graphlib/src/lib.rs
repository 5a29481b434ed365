#![forbid(unsafe_code)]

//! Simple undirected graph container.
//!
//! Nodes are identified by any `Clone + Eq + Hash` key and keep their insertion order, as do
//! edges and per-node incidence lists. Parallel edges collapse into one edge and self-loops are
//! never stored; [`Graph::add_edge`] reports both cases so callers can apply their own policy.

pub mod graph;

pub use graph::{EdgeInsert, Graph, Incident, alg};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
