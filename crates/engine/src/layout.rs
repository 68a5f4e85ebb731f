//! Built-in hierarchical layout.
//!
//! Ranks come from the longest path from a root, so every edge points to a
//! lower rank. Horizontal order is the in-order position of each node over the
//! first-visit spanning tree: left children take columns before their parent,
//! right children after. Every node owns one column, so boxes never overlap.

use crate::error::EngineError;
use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashSet;
use std::str::FromStr;
use treeviz_graph::{ChildSide, GraphDescription};

/// Layout strategies understood by the built-in engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStrategy {
    /// Ranked top-down layout for trees and DAGs (`"dot"`)
    Hierarchical,
}

impl LayoutStrategy {
    /// Names accepted by [`FromStr`].
    pub const NAMES: &'static [&'static str] = &["dot"];
}

impl FromStr for LayoutStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" => Ok(LayoutStrategy::Hierarchical),
            other => Err(EngineError::UnknownLayout {
                strategy: other.to_string(),
            }),
        }
    }
}

/// Geometry settings for the built-in layout, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    pub font_size: f64,
    pub font_family: String,
    /// Approximate advance of one label character
    pub char_width: f64,
    /// Extra height per additional label line
    pub line_height: f64,
    pub min_node_width: f64,
    pub node_height: f64,
    /// Horizontal padding inside a node on each side of the label
    pub label_padding: f64,
    /// Horizontal gap between neighbouring columns
    pub node_sep: f64,
    /// Vertical gap between ranks
    pub rank_sep: f64,
    pub margin: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            font_family: "Helvetica,Arial,sans-serif".to_string(),
            char_width: 8.0,
            line_height: 17.0,
            min_node_width: 54.0,
            node_height: 36.0,
            label_padding: 12.0,
            node_sep: 18.0,
            rank_sep: 54.0,
            margin: 8.0,
        }
    }
}

/// Position and size of one node, centre-based, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rank: usize,
    pub column: usize,
}

/// A straight edge from the bottom of the parent to the top of the child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRoute {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub side: ChildSide,
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// A computed layout. `nodes` is indexed by node index.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub nodes: Vec<NodePlacement>,
    pub edges: Vec<EdgeRoute>,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    /// Get the placement of a node.
    pub fn placement(&self, index: NodeIndex) -> Option<&NodePlacement> {
        self.nodes.get(index.index())
    }

    /// Node centres in Graphviz convention (y grows upwards), indexed by node index.
    pub fn positions(&self) -> Vec<(f64, f64)> {
        self.nodes
            .iter()
            .map(|p| (p.x, self.height - p.y))
            .collect()
    }

    /// Number of ranks used.
    pub fn rank_count(&self) -> usize {
        self.nodes.iter().map(|p| p.rank + 1).max().unwrap_or(0)
    }
}

/// Lay out a graph description with the given strategy.
pub fn compute_layout(
    graph: &GraphDescription,
    strategy: LayoutStrategy,
    settings: &LayoutSettings,
) -> Result<Layout, EngineError> {
    match strategy {
        LayoutStrategy::Hierarchical => hierarchical(graph, settings),
    }
}

fn hierarchical(graph: &GraphDescription, settings: &LayoutSettings) -> Result<Layout, EngineError> {
    let ranks = assign_ranks(graph)?;
    let columns = assign_columns(graph);

    let count = graph.node_count();
    let mut nodes = vec![
        NodePlacement {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rank: 0,
            column: 0,
        };
        count
    ];

    let mut order: Vec<(usize, NodeIndex)> = columns
        .iter()
        .enumerate()
        .map(|(i, &column)| (column, NodeIndex::new(i)))
        .collect();
    order.sort_unstable();

    let row_height = graph
        .nodes()
        .map(|n| node_size(&n.label, settings).1)
        .fold(settings.node_height, f64::max);

    let mut cursor = settings.margin;
    for (column, idx) in order {
        let label = graph.get_node(idx).map(|n| n.label.as_str()).unwrap_or_default();
        let (width, height) = node_size(label, settings);
        let rank = ranks[idx.index()];
        nodes[idx.index()] = NodePlacement {
            x: cursor + width / 2.0,
            y: settings.margin + rank as f64 * (row_height + settings.rank_sep) + row_height / 2.0,
            width,
            height,
            rank,
            column,
        };
        cursor += width + settings.node_sep;
    }

    let width = if count == 0 {
        2.0 * settings.margin
    } else {
        cursor - settings.node_sep + settings.margin
    };
    let rank_count = ranks.iter().map(|r| r + 1).max().unwrap_or(0);
    let height = if rank_count == 0 {
        2.0 * settings.margin
    } else {
        2.0 * settings.margin
            + rank_count as f64 * row_height
            + (rank_count - 1) as f64 * settings.rank_sep
    };

    let edges = graph
        .inner()
        .edge_references()
        .map(|e| {
            let parent = &nodes[e.source().index()];
            let child = &nodes[e.target().index()];
            EdgeRoute {
                source: e.source(),
                target: e.target(),
                side: e.weight().side,
                from: (parent.x, parent.y + parent.height / 2.0),
                to: (child.x, child.y - child.height / 2.0),
            }
        })
        .collect();

    Ok(Layout {
        nodes,
        edges,
        width,
        height,
    })
}

/// Longest path from any root, indexed by node index.
fn assign_ranks(graph: &GraphDescription) -> Result<Vec<usize>, EngineError> {
    let inner = graph.inner();
    let order = toposort(inner, None).map_err(|cycle| EngineError::Layout {
        reason: format!(
            "graph contains a cycle through node '{}'",
            graph
                .get_node(cycle.node_id())
                .map(|n| n.id.as_str())
                .unwrap_or("?")
        ),
    })?;

    let mut ranks = vec![0usize; inner.node_count()];
    for idx in order {
        let rank = inner
            .edges_directed(idx, Direction::Incoming)
            .map(|e| ranks[e.source().index()] + 1)
            .max()
            .unwrap_or(0);
        ranks[idx.index()] = rank;
    }
    Ok(ranks)
}

/// In-order column of every node, indexed by node index.
fn assign_columns(graph: &GraphDescription) -> Vec<usize> {
    let mut columns = vec![0usize; graph.node_count()];
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut next = 0;

    // (node, expanded): expanded entries take their column when popped
    let mut stack: Vec<(NodeIndex, bool)> = Vec::new();
    for root in graph.roots().nodes {
        stack.push((root, false));
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                columns[node.index()] = next;
                next += 1;
                continue;
            }
            if !visited.insert(node) {
                continue;
            }
            let children = graph.children_with_sides(node);
            for (child, _) in children.iter().rev().filter(|(_, s)| *s == ChildSide::Right) {
                stack.push((*child, false));
            }
            stack.push((node, true));
            for (child, _) in children.iter().rev().filter(|(_, s)| *s == ChildSide::Left) {
                stack.push((*child, false));
            }
        }
    }
    columns
}

fn node_size(label: &str, settings: &LayoutSettings) -> (f64, f64) {
    let longest = label.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let lines = label.lines().count().max(1);
    let width = (longest as f64 * settings.char_width + 2.0 * settings.label_padding)
        .max(settings.min_node_width);
    let height = settings.node_height + (lines - 1) as f64 * settings.line_height;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use treeviz_graph::{sample_tree, BinaryNode, GraphSink};

    fn layout_of(graph: &GraphDescription) -> Layout {
        compute_layout(graph, LayoutStrategy::Hierarchical, &LayoutSettings::default()).unwrap()
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!("dot".parse::<LayoutStrategy>().unwrap(), LayoutStrategy::Hierarchical);
        let err = "spiral".parse::<LayoutStrategy>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownLayout { strategy } if strategy == "spiral"));
    }

    #[test]
    fn test_empty_graph_layout() {
        let layout = layout_of(&GraphDescription::new());
        assert!(layout.nodes.is_empty());
        assert_eq!(layout.rank_count(), 0);
        assert!(layout.width > 0.0 && layout.height > 0.0);
    }

    #[test]
    fn test_children_straddle_parent() {
        let tree = sample_tree();
        let graph = GraphDescription::from_tree(Some(&tree));
        let layout = layout_of(&graph);

        for (parent, _, _) in graph.edges() {
            let p = graph.get_index(&parent.id).unwrap();
            let pp = layout.placement(p).unwrap();
            if let Some(l) = graph.child_on(p, ChildSide::Left) {
                assert!(layout.placement(l).unwrap().x < pp.x);
            }
            if let Some(r) = graph.child_on(p, ChildSide::Right) {
                assert!(layout.placement(r).unwrap().x > pp.x);
            }
        }
        assert_eq!(layout.rank_count(), 3);
    }

    #[test]
    fn test_ranks_increase_along_edges() {
        let tree = sample_tree();
        let graph = GraphDescription::from_tree(Some(&tree));
        let layout = layout_of(&graph);

        for route in &layout.edges {
            let parent = layout.placement(route.source).unwrap();
            let child = layout.placement(route.target).unwrap();
            assert!(child.rank > parent.rank);
            assert!(route.to.1 > route.from.1);
        }
    }

    #[test]
    fn test_columns_follow_in_order() {
        let tree = BinaryNode::leaf(2)
            .with_left(BinaryNode::leaf(1))
            .with_right(BinaryNode::leaf(3).with_right(BinaryNode::leaf(4)));
        let graph = GraphDescription::from_tree(Some(&tree));
        let layout = layout_of(&graph);

        let mut by_column: Vec<(usize, String)> = graph
            .inner()
            .node_indices()
            .map(|i| (layout.placement(i).unwrap().column, graph.get_node(i).unwrap().label.clone()))
            .collect();
        by_column.sort();
        let labels: Vec<&str> = by_column.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_cycle_is_layout_error() {
        let mut graph = GraphDescription::new();
        graph.ensure_node("a", "a");
        graph.ensure_node("b", "b");
        graph.add_edge("a", "b", ChildSide::Left);
        graph.add_edge("b", "a", ChildSide::Left);

        let err = compute_layout(&graph, LayoutStrategy::Hierarchical, &LayoutSettings::default())
            .unwrap_err();
        assert!(err.is_layout());
    }

    #[test]
    fn test_wide_labels_do_not_overlap() {
        let tree = BinaryNode::leaf("a fairly long root label")
            .with_left(BinaryNode::leaf("another long label on the left"))
            .with_right(BinaryNode::leaf("x"));
        let graph = GraphDescription::from_tree(Some(&tree));
        let layout = layout_of(&graph);

        let mut boxes: Vec<&NodePlacement> = layout.nodes.iter().collect();
        boxes.sort_by_key(|p| p.column);
        for pair in boxes.windows(2) {
            assert!(pair[0].x + pair[0].width / 2.0 <= pair[1].x - pair[1].width / 2.0);
        }
    }
}
