use crate::euler::EulerReport;
use crate::input::Diagnostic;
use crate::node_id::NodeId;
use planar_layout::LayoutResult;
use planarity::RotationSystem;
use serde::{Serialize, Serializer};

/// Everything computed for one graph.
///
/// Layout and embedding serialize as lists of `{ "id": ..., ... }` records in node order, so
/// text and integer ids never collide as JSON object keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub is_planar: bool,
    pub euler: EulerReport,
    #[serde(serialize_with = "serialize_layout")]
    pub layout: Option<LayoutResult<NodeId>>,
    #[serde(serialize_with = "serialize_embedding")]
    pub embedding: Option<RotationSystem<NodeId>>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Serialize)]
struct PositionRecord<'a> {
    id: &'a NodeId,
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct RotationRecord<'a> {
    id: &'a NodeId,
    clockwise: Vec<&'a NodeId>,
}

fn serialize_layout<S>(layout: &Option<LayoutResult<NodeId>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match layout {
        None => s.serialize_none(),
        Some(layout) => s.collect_seq(layout.iter().map(|(id, p)| PositionRecord {
            id,
            x: p.x,
            y: p.y,
        })),
    }
}

fn serialize_embedding<S>(
    embedding: &Option<RotationSystem<NodeId>>,
    s: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match embedding {
        None => s.serialize_none(),
        Some(rotation) => s.collect_seq(
            rotation
                .iter()
                .map(|(id, clockwise)| RotationRecord { id, clockwise }),
        ),
    }
}
