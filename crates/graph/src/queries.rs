//! Query operations on the graph description.

use crate::edges::{ChildSide, TreeEdge};
use crate::GraphDescription;
use petgraph::graph::{EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Result of a query operation.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// The nodes matching the query
    pub nodes: Vec<NodeIndex>,
}

impl QueryResult {
    /// Check if the query returned any results.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the number of results.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl GraphDescription {
    /// Find all nodes without incoming edges, in insertion order.
    pub fn roots(&self) -> QueryResult {
        let nodes = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect();

        QueryResult { nodes }
    }

    /// Find all nodes without outgoing edges, in insertion order.
    pub fn leaves(&self) -> QueryResult {
        let nodes = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .collect();

        QueryResult { nodes }
    }

    /// Find the children of a node, in the order their edges were added.
    pub fn children(&self, parent: NodeIndex) -> QueryResult {
        let nodes = self
            .ordered_edges(parent, Direction::Outgoing)
            .into_iter()
            .map(|e| e.target())
            .collect();

        QueryResult { nodes }
    }

    /// Find the parents of a node, in the order their edges were added.
    ///
    /// More than one parent means the node is shared between subtrees.
    pub fn parents(&self, child: NodeIndex) -> QueryResult {
        let nodes = self
            .ordered_edges(child, Direction::Incoming)
            .into_iter()
            .map(|e| e.source())
            .collect();

        QueryResult { nodes }
    }

    /// Children of a node together with the side each hangs from.
    pub fn children_with_sides(&self, parent: NodeIndex) -> Vec<(NodeIndex, ChildSide)> {
        self.ordered_edges(parent, Direction::Outgoing)
            .into_iter()
            .map(|e| (e.target(), e.weight().side))
            .collect()
    }

    /// Find the child hanging from a given side of a node.
    pub fn child_on(&self, parent: NodeIndex, side: ChildSide) -> Option<NodeIndex> {
        self.children_with_sides(parent)
            .into_iter()
            .find(|(_, s)| *s == side)
            .map(|(idx, _)| idx)
    }

    /// Find nodes reachable through more than one parent.
    pub fn shared_nodes(&self) -> QueryResult {
        let nodes = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .nth(1)
                    .is_some()
            })
            .collect();

        QueryResult { nodes }
    }

    /// Length of the longest root → leaf path, counted in nodes.
    ///
    /// Returns `None` for an empty graph or a graph containing a cycle.
    pub fn depth(&self) -> Option<usize> {
        let order = petgraph::algo::toposort(&self.graph, None).ok()?;
        let mut levels: HashMap<NodeIndex, usize> = HashMap::new();
        for idx in &order {
            let level = self
                .graph
                .edges_directed(*idx, Direction::Incoming)
                .filter_map(|e| levels.get(&e.source()))
                .map(|l| l + 1)
                .max()
                .unwrap_or(1);
            levels.insert(*idx, level);
        }
        levels.values().copied().max()
    }

    /// Edges touching a node, sorted by insertion order.
    ///
    /// petgraph yields adjacent edges newest first.
    fn ordered_edges(
        &self,
        node: NodeIndex,
        direction: Direction,
    ) -> Vec<EdgeReference<'_, TreeEdge>> {
        let mut edges: Vec<_> = self.graph.edges_directed(node, direction).collect();
        edges.sort_by_key(|e| e.id());
        edges
    }
}
