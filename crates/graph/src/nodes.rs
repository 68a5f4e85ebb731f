//! Node types for the graph description.

use serde::{Deserialize, Serialize};

/// A rendered node in the graph description.
///
/// One `GraphNode` exists per distinct tree node reachable from the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphNode {
    /// Identifier unique within one conversion (`n0`, `n1`, ...)
    pub id: String,
    /// Text displayed inside the node
    pub label: String,
}

impl GraphNode {
    /// Create a graph node.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Get the label shown for this node.
    pub fn label(&self) -> &str {
        &self.label
    }
}
