use planar_core::{AnalysisOptions, Engine, NodeId};
use proptest::prelude::*;

fn engine_without_layout() -> Engine {
    Engine::new().with_options(AnalysisOptions {
        compute_layout: false,
        ..Default::default()
    })
}

fn simple_edges(max_node: u8, max_edges: usize) -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0..max_node, 0..max_node), 0..max_edges).prop_map(|edges| {
        edges
            .into_iter()
            .filter(|(a, b)| a != b)
            .map(|(a, b)| (i64::from(a), i64::from(b)))
            .collect()
    })
}

proptest! {
    #[test]
    fn planar_results_satisfy_euler(edges in simple_edges(10, 30)) {
        let res = engine_without_layout().analyze_edges(edges).unwrap();
        if res.is_planar && res.euler.vertex_count > 0 {
            prop_assert!(res.euler.characteristic_holds());
        } else {
            prop_assert_eq!(res.euler.face_count, None);
        }
    }

    #[test]
    fn small_graphs_are_always_planar(edges in simple_edges(4, 16)) {
        let res = engine_without_layout().analyze_edges(edges).unwrap();
        prop_assert!(res.is_planar);
    }

    #[test]
    fn shuffling_edges_keeps_the_verdict_and_counts(
        edges in simple_edges(9, 28),
        rotate in 0usize..28,
        flip in any::<bool>(),
    ) {
        let engine = engine_without_layout();
        let mut shuffled = edges.clone();
        if !shuffled.is_empty() {
            let k = rotate % shuffled.len();
            shuffled.rotate_left(k);
        }
        shuffled.reverse();
        if flip {
            for e in &mut shuffled {
                *e = (e.1, e.0);
            }
        }

        let a = engine.analyze_edges(edges).unwrap();
        let b = engine.analyze_edges(shuffled).unwrap();
        prop_assert_eq!(a.is_planar, b.is_planar);
        prop_assert_eq!(a.euler, b.euler);
    }

    #[test]
    fn layouts_cover_every_endpoint(edges in simple_edges(12, 30)) {
        let res = Engine::new().analyze_edges(edges.clone()).unwrap();
        let layout = res.layout.unwrap();
        prop_assert_eq!(layout.len(), res.euler.vertex_count);
        for (a, b) in edges {
            prop_assert!(layout.get(&NodeId::Int(a)).is_some());
            prop_assert!(layout.get(&NodeId::Int(b)).is_some());
        }
    }
}

#[test]
fn subdivided_k33_is_not_planar() {
    let mut edges: Vec<(String, String)> = Vec::new();
    for a in ["a1", "a2", "a3"] {
        for b in ["b1", "b2", "b3"] {
            let mid = format!("{a}-{b}");
            edges.push((a.to_string(), mid.clone()));
            edges.push((mid, b.to_string()));
        }
    }
    let res = engine_without_layout().analyze_edges(edges).unwrap();
    assert!(!res.is_planar);
    assert_eq!(res.euler.vertex_count, 15);
    assert_eq!(res.euler.edge_count, 18);
    assert_eq!(res.euler.face_count, None);
}
