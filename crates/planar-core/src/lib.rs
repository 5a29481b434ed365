#![forbid(unsafe_code)]

//! Edge-list validation, planarity testing, Euler counts and layout (headless).
//!
//! [`Engine`] is the request boundary: it validates an edge list, builds the graph and runs
//! the planarity, Euler and layout stages over it. It holds no mutable state and can be shared
//! freely across threads.

pub mod analysis;
pub mod config;
pub mod error;
pub mod euler;
pub mod input;
pub mod node_id;

pub use analysis::AnalysisResult;
pub use config::{AnalysisOptions, LayoutConfig};
pub use error::{Error, ErrorKind, Result, Stage};
pub use euler::EulerReport;
pub use input::{Diagnostic, InputGraph, ParsedInput};
pub use node_id::NodeId;

use planar_graphlib::Graph;
use planar_layout::LayoutResult;
use serde_json::Value;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: AnalysisOptions,
}

/// Planarity verdict plus Euler counts; the part of the pipeline that never needs layout.
#[derive(Debug)]
struct Structure {
    is_planar: bool,
    euler: EulerReport,
    embedding: Option<planarity::RotationSystem<NodeId>>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Parses `text` as JSON and analyzes it.
    pub fn analyze_json(&self, text: &str) -> Result<AnalysisResult> {
        let parsed = input::parse_str(text)?;
        self.analyze_parsed(parsed)
    }

    pub fn analyze_value(&self, value: &Value) -> Result<AnalysisResult> {
        let parsed = input::parse_value(value)?;
        self.analyze_parsed(parsed)
    }

    /// Analyzes typed edges. Endpoints are converted with `Into<NodeId>`.
    pub fn analyze_edges<I, A, B>(&self, edges: I) -> Result<AnalysisResult>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<NodeId>,
        B: Into<NodeId>,
    {
        let parsed = ParsedInput {
            edges: edges
                .into_iter()
                .map(|(a, b)| (a.into(), b.into()))
                .collect(),
            nodes: Vec::new(),
        };
        self.analyze_parsed(parsed)
    }

    /// Analyzes an already built graph. No diagnostics are produced.
    pub fn analyze_graph(&self, graph: &Graph<NodeId>) -> Result<AnalysisResult> {
        self.run(graph, Vec::new())
    }

    /// Validates `input` and builds its graph without running any algorithm.
    pub fn build_graph(&self, input: ParsedInput) -> Result<InputGraph> {
        input::build_graph(input)
    }

    fn analyze_parsed(&self, parsed: ParsedInput) -> Result<AnalysisResult> {
        let InputGraph { graph, diagnostics } = self.build_graph(parsed)?;
        self.run(&graph, diagnostics)
    }

    fn run(&self, graph: &Graph<NodeId>, diagnostics: Vec<Diagnostic>) -> Result<AnalysisResult> {
        self.options.validate()?;
        let result = if self.options.compute_layout && self.options.concurrent_layout {
            self.run_concurrent(graph)
        } else {
            self.run_sequential(graph)
        };
        let (structure, layout) = match result {
            Ok(parts) => parts,
            Err(err) => {
                if err.is_defect() {
                    tracing::error!(error = %err, "analysis failed");
                }
                return Err(err);
            }
        };

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            is_planar = structure.is_planar,
            faces = ?structure.euler.face_count,
            components = structure.euler.component_count,
            diagnostics = diagnostics.len(),
            "analysis complete"
        );
        Ok(AnalysisResult {
            is_planar: structure.is_planar,
            euler: structure.euler,
            layout,
            embedding: structure.embedding,
            diagnostics,
        })
    }

    fn run_sequential(
        &self,
        graph: &Graph<NodeId>,
    ) -> Result<(Structure, Option<LayoutResult<NodeId>>)> {
        let structure = structure(graph)?;
        let layout = if self.options.compute_layout {
            Some(planar_layout::layout(graph, &self.options.layout.to_options())?)
        } else {
            None
        };
        Ok((structure, layout))
    }

    fn run_concurrent(
        &self,
        graph: &Graph<NodeId>,
    ) -> Result<(Structure, Option<LayoutResult<NodeId>>)> {
        let layout_options = self.options.layout.to_options();
        std::thread::scope(|scope| {
            let worker = scope.spawn(|| planar_layout::layout(graph, &layout_options));
            let structure = structure(graph);
            join_stages(structure, worker.join())
        })
    }
}

/// Structural errors take precedence over layout errors, as in sequential mode.
fn join_stages(
    structure: Result<Structure>,
    layout: std::thread::Result<planar_layout::Result<LayoutResult<NodeId>>>,
) -> Result<(Structure, Option<LayoutResult<NodeId>>)> {
    let structure = structure?;
    let layout = layout.map_err(|_| Error::AlgorithmInvariant {
        stage: Stage::Layout,
        message: "layout worker panicked".to_string(),
    })??;
    Ok((structure, Some(layout)))
}

fn structure(graph: &Graph<NodeId>) -> Result<Structure> {
    let planarity = planarity::check(graph)?;
    let euler = euler::euler_report(graph, planarity.is_planar, planarity.embedding.as_ref())?;
    Ok(Structure {
        is_planar: planarity.is_planar,
        euler,
        embedding: planarity.embedding,
    })
}
