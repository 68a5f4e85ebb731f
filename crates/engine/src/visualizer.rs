//! The binary tree visualizer.

use crate::builtin::BuiltinEngine;
use crate::error::{EngineError, Stage, VisualizeError};
use crate::graphviz::GraphvizEngine;
use crate::{GraphOptions, LayoutEngine, DEFAULT_LAYOUT};
use std::path::{Path, PathBuf};
use tracing::{debug, debug_span, info};
use treeviz_graph::{GraphDescription, TreeGraphBuilder, TreeNode, DEFAULT_GRAPH_NAME};

/// Output format used when the caller does not name one.
pub const DEFAULT_FORMAT: &str = "svg";

/// Output file used when the caller does not name one.
pub const DEFAULT_OUTPUT: &str = "binary_tree.svg";

/// Options for one `visualize` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizeOptions {
    /// Output format name, passed to the engine unvalidated
    pub format: String,
    /// Path of the file to write
    pub output: PathBuf,
    /// Layout strategy name
    pub layout: String,
    /// Graph name
    pub graph_name: String,
    /// Label edges with the child side they lead to
    pub label_edges: bool,
}

impl Default for VisualizeOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            layout: DEFAULT_LAYOUT.to_string(),
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            label_edges: false,
        }
    }
}

impl VisualizeOptions {
    /// Options writing `output` in `format`, defaults otherwise.
    pub fn new(format: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            format: format.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    /// Use a different layout strategy.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Use a different graph name.
    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    /// Label edges with `L` / `R`.
    pub fn with_edge_labels(mut self, label_edges: bool) -> Self {
        self.label_edges = label_edges;
        self
    }
}

/// Outcome of a successful `visualize` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// Distinct tree nodes rendered
    pub nodes: usize,
    /// File written
    pub output: PathBuf,
    /// Format it was written in
    pub format: String,
}

/// Renders binary trees through a layout engine.
///
/// The visualizer owns one engine context for its whole lifetime and reuses it
/// across calls; only the graph is created per call. Methods take `&mut self`,
/// so one visualizer cannot be driven from two threads at once; give each
/// thread its own.
#[derive(Debug)]
pub struct TreeVisualizer<E: LayoutEngine = BuiltinEngine> {
    engine: E,
}

impl TreeVisualizer<BuiltinEngine> {
    /// Create a visualizer on the built-in engine.
    pub fn new() -> Self {
        Self::with_engine(BuiltinEngine::new())
    }
}

impl Default for TreeVisualizer<BuiltinEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeVisualizer<GraphvizEngine> {
    /// Create a visualizer on the Graphviz engine.
    pub fn graphviz() -> Result<Self, EngineError> {
        GraphvizEngine::new().map(Self::with_engine)
    }
}

impl<E: LayoutEngine> TreeVisualizer<E> {
    /// Create a visualizer on a given engine.
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Get the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Convert a tree to a graph description without rendering it.
    pub fn describe<N: TreeNode>(&self, root: Option<&N>) -> GraphDescription {
        GraphDescription::from_tree(root)
    }

    /// Render the tree at `root` to `filename` in `format`.
    ///
    /// An absent root renders an empty graph. See [`visualize_with`] for the
    /// full set of options.
    ///
    /// [`visualize_with`]: TreeVisualizer::visualize_with
    pub fn visualize<N: TreeNode>(
        &mut self,
        root: Option<&N>,
        format: &str,
        filename: impl AsRef<Path>,
    ) -> Result<RenderReport, VisualizeError> {
        let options = VisualizeOptions::new(format, filename.as_ref());
        self.visualize_with(root, &options)
    }

    /// Render the tree at `root` with explicit options.
    ///
    /// The graph opened for this call is closed before returning, and its
    /// layout freed if one was computed, whether or not a later step failed.
    pub fn visualize_with<N: TreeNode>(
        &mut self,
        root: Option<&N>,
        options: &VisualizeOptions,
    ) -> Result<RenderReport, VisualizeError> {
        let span = debug_span!(
            "visualize",
            format = %options.format,
            output = %options.output.display(),
            layout = %options.layout,
        );
        let _enter = span.enter();

        let graph_options = GraphOptions {
            name: options.graph_name.clone(),
            label_edges: options.label_edges,
        };
        let mut graph = self
            .engine
            .open(&graph_options)
            .map_err(|e| VisualizeError::new(Stage::Open, e))?;

        let identity = TreeGraphBuilder::new().populate(&mut graph, root);
        debug!(nodes = identity.len(), "graph built");

        let outcome = self.lay_out_and_render(&mut graph, options);
        self.engine.close(graph);
        outcome?;

        info!(
            nodes = identity.len(),
            output = %options.output.display(),
            "tree rendered"
        );
        Ok(RenderReport {
            nodes: identity.len(),
            output: options.output.clone(),
            format: options.format.clone(),
        })
    }

    fn lay_out_and_render(
        &mut self,
        graph: &mut E::Graph,
        options: &VisualizeOptions,
    ) -> Result<(), VisualizeError> {
        self.engine
            .layout(graph, &options.layout)
            .map_err(|e| VisualizeError::new(Stage::Layout, e))?;

        let rendered = self
            .engine
            .render(graph, &options.format, &options.output)
            .map_err(|e| VisualizeError::new(Stage::Render, e));
        self.engine.free_layout(graph);
        rendered
    }
}
