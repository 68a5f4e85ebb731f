//! # treeviz-engine
//!
//! Layout engines and the binary tree visualizer.
//!
//! A [`LayoutEngine`] is the narrow capability the visualizer needs from a
//! graph-layout backend: open a graph, receive nodes and edges, lay the graph
//! out with a named strategy, render it to a file, and release per-graph
//! resources. Two backends ship with the crate:
//!
//! - [`BuiltinEngine`]: pure Rust hierarchical layout, writes SVG, DOT,
//!   GraphML, JSON, and plain-text trees
//! - [`GraphvizEngine`]: drives the Graphviz `dot` binary and supports every
//!   format the local Graphviz installation does
//!
//! ## Example
//!
//! ```no_run
//! use treeviz_engine::TreeVisualizer;
//! use treeviz_graph::sample_tree;
//!
//! let tree = sample_tree();
//! let mut visualizer = TreeVisualizer::new();
//! visualizer.visualize(Some(&tree), "svg", "binary_tree.svg")?;
//! # Ok::<(), treeviz_engine::VisualizeError>(())
//! ```

mod builtin;
mod error;
pub mod format;
mod graphviz;
pub mod layout;
pub mod svg;
mod visualizer;

pub use builtin::{BuiltinEngine, BuiltinGraph};
pub use error::{EngineError, Stage, VisualizeError};
pub use format::OutputFormat;
pub use graphviz::{GraphvizEngine, GraphvizGraph};
pub use layout::{Layout, LayoutSettings, LayoutStrategy};
pub use visualizer::{RenderReport, TreeVisualizer, VisualizeOptions};

use std::path::Path;
use treeviz_graph::GraphSink;

/// Layout strategy used when the caller does not name one.
pub const DEFAULT_LAYOUT: &str = "dot";

/// Attributes fixed when a graph is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    /// Graph name, shown as the document title
    pub name: String,
    /// Render each edge with an `L` / `R` label
    pub label_edges: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            name: treeviz_graph::DEFAULT_GRAPH_NAME.to_string(),
            label_edges: false,
        }
    }
}

/// A graph-layout backend.
///
/// The engine value itself is the runtime context: it is acquired when the
/// engine is constructed and released when it is dropped. Graph handles are
/// per call; the visualizer closes every handle it opens.
pub trait LayoutEngine {
    /// Per-graph handle the traversal writes nodes and edges into.
    type Graph: GraphSink;

    /// Open a new, empty directed graph.
    fn open(&mut self, options: &GraphOptions) -> Result<Self::Graph, EngineError>;

    /// Compute a layout for the graph using the named strategy.
    fn layout(&mut self, graph: &mut Self::Graph, strategy: &str) -> Result<(), EngineError>;

    /// Render a laid-out graph to `path` in the named format.
    fn render(&mut self, graph: &Self::Graph, format: &str, path: &Path)
        -> Result<(), EngineError>;

    /// Release the resources of a computed layout.
    fn free_layout(&mut self, graph: &mut Self::Graph);

    /// Release the graph itself.
    fn close(&mut self, graph: Self::Graph);
}
