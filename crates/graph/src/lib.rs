//! # treeviz-graph
//!
//! Conversion of in-memory binary trees into directed-graph descriptions.
//!
//! This crate walks any type implementing [`TreeNode`], gives every distinct
//! node a stable identifier, and records one labelled graph node per tree node
//! plus one directed edge per parent → child link. The resulting
//! [`GraphDescription`] is what layout engines consume.
//!
//! ## Features
//!
//! - **Iterative traversal**: pre-order, left before right, no recursion depth limit
//! - **Idempotent identity**: a node shared by two parents becomes one graph node
//! - **Queries**: roots, children, parents, leaves, depth
//! - **Text exports**: DOT, GraphML, JSON, and an ASCII tree view
//!
//! ## Example
//!
//! ```
//! use treeviz_graph::{render_dot, BinaryNode, DotStyle, GraphDescription};
//!
//! let tree = BinaryNode::leaf("root")
//!     .with_left(BinaryNode::leaf("left"))
//!     .with_right(BinaryNode::leaf("right"));
//!
//! let graph = GraphDescription::from_tree(Some(&tree));
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 2);
//!
//! let dot = render_dot(&graph, &DotStyle::default());
//! assert!(dot.contains("n0 -> n1"));
//! ```

mod builder;
mod edges;
pub mod export;
mod identity;
mod nodes;
mod queries;
pub mod render;
mod tree;

pub use builder::{GraphSink, TreeGraphBuilder};
pub use edges::{ChildSide, TreeEdge};
pub use export::{EdgeRepr, GraphRepr, NodeRepr};
pub use identity::{NodeIdentity, Resolved};
pub use nodes::GraphNode;
pub use queries::QueryResult;
pub use render::{render_ascii_tree, render_dot, render_graphml, render_json, DotStyle};
pub use tree::{sample_tree, BinaryNode, TreeNode};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Name given to graphs when the caller does not choose one.
pub const DEFAULT_GRAPH_NAME: &str = "G";

/// A directed-graph description built from a binary tree.
///
/// Nodes and edges keep insertion order, which for trees built by
/// [`TreeGraphBuilder`] is the deterministic pre-order, left-before-right
/// traversal order.
#[derive(Debug, Clone)]
pub struct GraphDescription {
    /// Graph name used by exporters
    name: String,

    /// The underlying directed graph
    graph: DiGraph<GraphNode, TreeEdge>,

    /// Index of nodes by identifier
    ids: HashMap<String, NodeIndex>,
}

impl Default for GraphDescription {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphDescription {
    /// Create an empty graph named `G`.
    pub fn new() -> Self {
        Self::named(DEFAULT_GRAPH_NAME)
    }

    /// Create an empty graph with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: DiGraph::new(),
            ids: HashMap::new(),
        }
    }

    /// Convert the tree at `root` into a new graph description.
    ///
    /// An absent root yields an empty graph.
    pub fn from_tree<N: TreeNode>(root: Option<&N>) -> Self {
        TreeGraphBuilder::new().build(root)
    }

    /// Get the graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the underlying petgraph for advanced operations.
    pub fn inner(&self) -> &DiGraph<GraphNode, TreeEdge> {
        &self.graph
    }

    /// Get a node by its index.
    pub fn get_node(&self, index: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(index)
    }

    /// Look up a node index by identifier.
    pub fn get_index(&self, id: &str) -> Option<NodeIndex> {
        self.ids.get(id).copied()
    }

    /// Look up a node by identifier.
    pub fn get_by_id(&self, id: &str) -> Option<&GraphNode> {
        self.get_index(id).and_then(|idx| self.get_node(idx))
    }

    /// Iterate over nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Iterate over edges in insertion order as `(source, target, edge)`.
    pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode, &TreeEdge)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()], e.weight()))
    }

    /// Labels of all nodes in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.nodes().map(GraphNode::label).collect()
    }

    /// Get the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    fn index_or_insert(&mut self, id: &str, label: &str) -> NodeIndex {
        if let Some(&idx) = self.ids.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode::new(id, label));
        self.ids.insert(id.to_string(), idx);
        idx
    }
}

impl GraphSink for GraphDescription {
    fn ensure_node(&mut self, id: &str, label: &str) {
        let idx = self.index_or_insert(id, label);
        let node = &mut self.graph[idx];
        if node.label != label {
            node.label = label.to_string();
        }
    }

    /// Endpoints that do not exist yet are created labelled with their id.
    fn add_edge(&mut self, from: &str, to: &str, side: ChildSide) {
        let source = self.index_or_insert(from, from);
        let target = self.index_or_insert(to, to);
        self.graph.add_edge(source, target, TreeEdge::from(side));
    }
}
