#![forbid(unsafe_code)]

//! Headless force-directed layout for [`planar_graphlib::Graph`].
//!
//! Layouts are fully determined by the graph's node/edge insertion order and
//! [`LayoutOptions`]: the same inputs always produce bit-identical coordinates.

pub mod algo;
pub mod error;
pub mod graph;

pub use algo::{LayoutOptions, OPTIMAL_DISTANCE_RANGE};
pub use error::{Error, Result};
pub use graph::{Bounds, LayoutResult, LayoutStats, Point};

use planar_graphlib::Graph;
use std::hash::Hash;

/// Headless layout entry point.
pub fn layout<K>(graph: &Graph<K>, opts: &LayoutOptions) -> Result<LayoutResult<K>>
where
    K: Clone + Eq + Hash,
{
    layout_with_stats(graph, opts).map(|(result, _)| result)
}

/// Like [`layout`], also reporting how the relaxation ended.
pub fn layout_with_stats<K>(
    graph: &Graph<K>,
    opts: &LayoutOptions,
) -> Result<(LayoutResult<K>, LayoutStats)>
where
    K: Clone + Eq + Hash,
{
    algo::fruchterman_reingold::layout(graph, opts)
}
