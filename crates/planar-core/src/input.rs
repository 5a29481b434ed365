//! Edge-list input parsing and graph construction.
//!
//! Accepted shapes:
//!
//! - a JSON array of edges;
//! - an object `{ "edges": [...], "nodes": [...] }` where `nodes` is optional and declares
//!   extra (possibly isolated) nodes.
//!
//! Each edge is either a `{"source": a, "target": b}` record or an `[a, b]` pair. Endpoints are
//! strings or integers that fit in `i64`.

use crate::error::{Error, Result};
use crate::node_id::NodeId;
use planar_graphlib::{EdgeInsert, Graph};
use serde::Serialize;
use serde_json::Value;

/// Structurally valid input, not yet checked for self-loops or duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    pub edges: Vec<(NodeId, NodeId)>,
    pub nodes: Vec<NodeId>,
}

/// Non-fatal notices collected while building the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Edge `index` repeats the pair first seen at `first_index` and was collapsed into it.
    DuplicateEdge {
        index: usize,
        first_index: usize,
        source: NodeId,
        target: NodeId,
    },
}

impl Diagnostic {
    pub fn message(&self) -> String {
        match self {
            Diagnostic::DuplicateEdge {
                index,
                first_index,
                source,
                target,
            } => format!(
                "edge {index} ({source}, {target}) duplicates edge {first_index} and was ignored"
            ),
        }
    }
}

/// A validated graph plus the diagnostics produced while building it.
#[derive(Debug, Clone)]
pub struct InputGraph {
    pub graph: Graph<NodeId>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn parse_str(text: &str) -> Result<ParsedInput> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::malformed(format!("invalid JSON: {e}")))?;
    parse_value(&value)
}

pub fn parse_value(value: &Value) -> Result<ParsedInput> {
    let (edges, nodes) = match value {
        Value::Array(edges) => (edges, None),
        Value::Object(map) => {
            let edges = match map.get("edges") {
                Some(Value::Array(edges)) => edges,
                Some(other) => {
                    return Err(Error::malformed(format!(
                        "`edges` must be an array, got {}",
                        kind_of(other)
                    )));
                }
                None => return Err(Error::malformed("object input has no `edges` member")),
            };
            let nodes = match map.get("nodes") {
                None | Some(Value::Null) => None,
                Some(Value::Array(nodes)) => Some(nodes),
                Some(other) => {
                    return Err(Error::malformed(format!(
                        "`nodes` must be an array, got {}",
                        kind_of(other)
                    )));
                }
            };
            (edges, nodes)
        }
        other => {
            return Err(Error::malformed(format!(
                "expected an array of edges, got {}",
                kind_of(other)
            )));
        }
    };

    let mut parsed = ParsedInput {
        edges: Vec::with_capacity(edges.len()),
        nodes: Vec::new(),
    };
    for (index, edge) in edges.iter().enumerate() {
        parsed.edges.push(parse_edge(index, edge)?);
    }
    if let Some(nodes) = nodes {
        parsed.nodes.reserve(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            let id = endpoint(node).ok_or_else(|| {
                Error::malformed(format!(
                    "node {index} must be a string or an integer, got {}",
                    kind_of(node)
                ))
            })?;
            parsed.nodes.push(id);
        }
    }
    Ok(parsed)
}

fn parse_edge(index: usize, edge: &Value) -> Result<(NodeId, NodeId)> {
    match edge {
        Value::Object(record) => {
            match (record.get("source"), record.get("target")) {
                (Some(source), Some(target)) => Ok((
                    required_endpoint(index, "source", source)?,
                    required_endpoint(index, "target", target)?,
                )),
                (Some(_), None) => Err(Error::invalid_edge(index, "missing `target`")),
                (None, Some(_)) => Err(Error::invalid_edge(index, "missing `source`")),
                (None, None) => Err(Error::malformed(format!(
                    "edge {index} is an object without `source` or `target`"
                ))),
            }
        }
        Value::Array(pair) => match pair.as_slice() {
            [source, target] => Ok((
                required_endpoint(index, "source", source)?,
                required_endpoint(index, "target", target)?,
            )),
            other => Err(Error::invalid_edge(
                index,
                format!("expected a pair of endpoints, got {} elements", other.len()),
            )),
        },
        other => Err(Error::malformed(format!(
            "edge {index} must be a record or a pair, got {}",
            kind_of(other)
        ))),
    }
}

fn required_endpoint(index: usize, field: &str, value: &Value) -> Result<NodeId> {
    endpoint(value).ok_or_else(|| {
        Error::invalid_edge(
            index,
            format!(
                "`{field}` must be a string or an integer, got {}",
                kind_of(value)
            ),
        )
    })
}

fn endpoint(value: &Value) -> Option<NodeId> {
    match value {
        Value::String(s) => Some(NodeId::Text(s.clone())),
        Value::Number(n) => n.as_i64().map(NodeId::Int),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a non-integer number",
        Value::Number(n) if n.as_i64().is_none() => "an out-of-range integer",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builds the graph: edges first (in order), then declared nodes.
///
/// Self-loops fail the whole request; duplicate pairs are collapsed and reported.
pub fn build_graph(input: ParsedInput) -> Result<InputGraph> {
    let mut graph = Graph::with_capacity(input.edges.len() + input.nodes.len(), input.edges.len());
    let mut diagnostics = Vec::new();

    for (index, (source, target)) in input.edges.into_iter().enumerate() {
        match graph.add_edge(source.clone(), target.clone()) {
            EdgeInsert::Inserted(_) => {}
            EdgeInsert::Duplicate(first_index) => {
                tracing::debug!(index, first_index, "collapsed duplicate edge");
                diagnostics.push(Diagnostic::DuplicateEdge {
                    index,
                    first_index,
                    source,
                    target,
                });
            }
            EdgeInsert::SelfLoop => {
                return Err(Error::SelfLoopRejected {
                    index,
                    node: source,
                });
            }
        }
    }
    for id in input.nodes {
        graph.add_node(id);
    }

    Ok(InputGraph { graph, diagnostics })
}
