//! Edge types for the graph description.

use serde::{Deserialize, Serialize};

/// Which child slot of the parent an edge leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildSide {
    /// The parent's left child
    Left,
    /// The parent's right child
    Right,
}

impl ChildSide {
    /// Get a human-readable label for this side.
    pub fn label(&self) -> &'static str {
        match self {
            ChildSide::Left => "left",
            ChildSide::Right => "right",
        }
    }

    /// Single-letter marker used when edges are labelled in rendered output.
    pub fn short_label(&self) -> &'static str {
        match self {
            ChildSide::Left => "L",
            ChildSide::Right => "R",
        }
    }
}

/// A directed parent → child edge in the graph description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeEdge {
    /// The child slot this edge came from
    pub side: ChildSide,
}

impl From<ChildSide> for TreeEdge {
    fn from(side: ChildSide) -> Self {
        Self { side }
    }
}
