#![forbid(unsafe_code)]

//! Planarity testing for [`planar_graphlib::Graph`].
//!
//! [`check`] decides whether a graph can be drawn in the plane without crossings and, when it
//! can, returns a [`RotationSystem`] describing one such drawing. The embedding is valid but not
//! canonical: it depends on node and edge insertion order, the verdict does not.

pub mod embedding;
pub mod error;
mod lr;

pub use embedding::RotationSystem;
pub use error::{Error, Result};

use planar_graphlib::Graph;
use std::hash::Hash;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Planarity verdict. `embedding` is `Some` exactly when `is_planar` holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planarity<K>
where
    K: Clone + Eq + Hash,
{
    pub is_planar: bool,
    pub embedding: Option<RotationSystem<K>>,
}

impl<K> Planarity<K>
where
    K: Clone + Eq + Hash,
{
    fn not_planar() -> Self {
        Self {
            is_planar: false,
            embedding: None,
        }
    }
}

/// Tests `g` for planarity and embeds it when planar.
pub fn check<K>(g: &Graph<K>) -> Result<Planarity<K>>
where
    K: Clone + Eq + Hash,
{
    let outcome = lr::LrPlanarity::new(g).run(true)?;
    let planarity = match outcome {
        lr::Outcome::NotPlanar => Planarity::not_planar(),
        lr::Outcome::Planar(cw) => Planarity {
            is_planar: true,
            embedding: Some(RotationSystem::from_parts(g.nodes().cloned(), cw)),
        },
    };
    tracing::debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        is_planar = planarity.is_planar,
        "planarity check"
    );
    Ok(planarity)
}

/// Verdict only; skips building the embedding.
pub fn is_planar<K>(g: &Graph<K>) -> Result<bool>
where
    K: Clone + Eq + Hash,
{
    Ok(matches!(
        lr::LrPlanarity::new(g).run(false)?,
        lr::Outcome::Planar(_)
    ))
}
