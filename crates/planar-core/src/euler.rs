//! Euler counts for planar graphs.
//!
//! For a planar graph with `C` connected components the face count is `F = E - V + 1 + C`
//! (the outer face is shared by all components). The formula is cross-checked against the
//! faces traced from the embedding whenever one is available.

use crate::error::{Error, Result, Stage};
use planar_graphlib::{Graph, alg};
use planarity::RotationSystem;
use serde::Serialize;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EulerReport {
    pub vertex_count: usize,
    pub edge_count: usize,
    /// `None` for non-planar graphs and for the empty graph.
    pub face_count: Option<usize>,
    pub component_count: usize,
}

impl EulerReport {
    /// `V - E + F == 1 + C`. Always `false` when there is no face count.
    pub fn characteristic_holds(&self) -> bool {
        self.face_count.is_some_and(|f| {
            self.vertex_count + f == self.edge_count + 1 + self.component_count
        })
    }
}

/// Computes the Euler counts of `g`.
///
/// `embedding` is optional; when given, the traced faces must agree with the formula.
pub fn euler_report<K>(
    g: &Graph<K>,
    is_planar: bool,
    embedding: Option<&RotationSystem<K>>,
) -> Result<EulerReport>
where
    K: Clone + Eq + Hash,
{
    let v = g.node_count();
    let e = g.edge_count();
    let c = alg::component_count(g);

    let face_count = if is_planar && v > 0 {
        Some(e + 1 + c - v)
    } else {
        None
    };

    if let (Some(f), Some(rotation)) = (face_count, embedding) {
        let with_edges = rotation.components_with_edges();
        // Each component with edges traces its own outer face; they all coincide in the plane.
        let folded = (1 + rotation.face_count()).saturating_sub(with_edges);
        if folded != f {
            tracing::error!(expected = f, traced = folded, "embedding face count mismatch");
            return Err(Error::AlgorithmInvariant {
                stage: Stage::Euler,
                message: format!("embedding traces {folded} faces but Euler's formula gives {f}"),
            });
        }
    }

    Ok(EulerReport {
        vertex_count: v,
        edge_count: e,
        face_count,
        component_count: c,
    })
}

#[cfg(test)]
mod tests {
    use super::{EulerReport, euler_report};
    use crate::error::ErrorKind;
    use planar_graphlib::Graph;

    #[test]
    fn non_planar_graphs_have_no_face_count() {
        let g = Graph::from_edges([(0u32, 1), (1, 2)]);
        let report = euler_report(&g, false, None).unwrap();
        assert_eq!(report.face_count, None);
        assert!(!report.characteristic_holds());
    }

    #[test]
    fn empty_graph_has_no_components_and_no_faces() {
        let g: Graph<u32> = Graph::new();
        let report = euler_report(&g, true, None).unwrap();
        assert_eq!(
            report,
            EulerReport {
                vertex_count: 0,
                edge_count: 0,
                face_count: None,
                component_count: 0,
            }
        );
    }

    #[test]
    fn isolated_node_has_one_face() {
        let mut g: Graph<u32> = Graph::new();
        g.add_node(1);
        let report = euler_report(&g, true, None).unwrap();
        assert_eq!(report.face_count, Some(1));
        assert_eq!(report.component_count, 1);
        assert!(report.characteristic_holds());
    }

    #[test]
    fn disconnected_triangles_share_the_outer_face() {
        let g = Graph::from_edges([(0u32, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        let planarity = planarity::check(&g).unwrap();
        let report = euler_report(&g, true, planarity.embedding.as_ref()).unwrap();
        assert_eq!(report.face_count, Some(3));
        assert_eq!(report.component_count, 2);
        assert!(report.characteristic_holds());
    }

    #[test]
    fn mismatched_embedding_is_an_invariant_violation() {
        // The embedding of a path traces one face; claiming it for a triangle must fail.
        let path = Graph::from_edges([(0u32, 1), (1, 2)]);
        let path_embedding = planarity::check(&path).unwrap().embedding.unwrap();
        let triangle = Graph::from_edges([(0u32, 1), (1, 2), (2, 0)]);

        let err = euler_report(&triangle, true, Some(&path_embedding)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlgorithmInvariant);
        assert!(err.is_defect());
    }
}
