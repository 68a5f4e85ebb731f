//! Graph rendering utilities.
//!
//! This module provides text output formats for a [`GraphDescription`]:
//! - DOT source for Graphviz and compatible tools
//! - GraphML export for external visualization tools
//! - JSON export of the description itself
//! - ASCII tree rendering for terminal display
//!
//! [`GraphDescription`]: crate::GraphDescription

mod ascii;
mod dot;
mod graphml;

pub use ascii::{render_ascii_tree, MAX_INDENT_DEPTH};
pub use dot::{escape_dot, render_dot, DotStyle};
pub use graphml::{escape_xml, render_graphml};

use crate::{GraphDescription, GraphRepr};

/// Render the graph description as pretty-printed JSON.
pub fn render_json(graph: &GraphDescription) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&GraphRepr::from(graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sample_tree, GraphRepr};

    #[test]
    fn test_json_roundtrips_through_repr() {
        let tree = sample_tree();
        let graph = GraphDescription::from_tree(Some(&tree));
        let json = render_json(&graph).unwrap();
        let repr: GraphRepr = serde_json::from_str(&json).unwrap();
        assert_eq!(repr.nodes.len(), 7);
        assert_eq!(repr.edges.len(), 6);
    }
}
