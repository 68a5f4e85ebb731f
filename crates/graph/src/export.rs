//! Serialization types for graph export.
//!
//! This module contains the data structures used to serialize a
//! [`GraphDescription`] for external consumption (JSON output, inspection).

use crate::edges::ChildSide;
use crate::nodes::GraphNode;
use crate::GraphDescription;
use serde::{Deserialize, Serialize};

/// Serializable representation of a graph description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRepr {
    pub name: String,
    pub nodes: Vec<NodeRepr>,
    pub edges: Vec<EdgeRepr>,
}

impl From<&GraphDescription> for GraphRepr {
    fn from(graph: &GraphDescription) -> Self {
        let nodes = graph.nodes().map(NodeRepr::from).collect();

        let edges = graph
            .edges()
            .map(|(source, target, edge)| EdgeRepr {
                source: source.id.clone(),
                target: target.id.clone(),
                side: edge.side,
            })
            .collect();

        Self {
            name: graph.name().to_string(),
            nodes,
            edges,
        }
    }
}

/// Serializable representation of a graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRepr {
    pub id: String,
    pub label: String,
}

impl From<&GraphNode> for NodeRepr {
    fn from(node: &GraphNode) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
        }
    }
}

/// Serializable representation of a parent → child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRepr {
    pub source: String,
    pub target: String,
    pub side: ChildSide,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BinaryNode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_repr_from_graph() {
        let tree = BinaryNode::leaf("p").with_right(BinaryNode::leaf("c"));
        let graph = GraphDescription::from_tree(Some(&tree));
        let repr = GraphRepr::from(&graph);

        assert_eq!(repr.name, "G");
        assert_eq!(
            repr.nodes,
            vec![
                NodeRepr { id: "n0".into(), label: "p".into() },
                NodeRepr { id: "n1".into(), label: "c".into() },
            ]
        );
        assert_eq!(
            repr.edges,
            vec![EdgeRepr { source: "n0".into(), target: "n1".into(), side: ChildSide::Right }]
        );
    }

    #[test]
    fn test_side_serializes_snake_case() {
        let edge = EdgeRepr {
            source: "n0".into(),
            target: "n1".into(),
            side: ChildSide::Left,
        };
        let json = serde_json::to_string(&edge).unwrap();
        assert_eq!(json, r#"{"source":"n0","target":"n1","side":"left"}"#);
    }
}
