//! ASCII rendering for graph visualization.
//!
//! Provides a terminal-friendly tree view of a graph description.

use crate::GraphDescription;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;

/// Deepest level that still gets its own indentation step.
pub const MAX_INDENT_DEPTH: usize = 32;

/// Render the graph description as an ASCII tree.
///
/// Each root starts a new block. Children are listed in edge order and tagged
/// with the side they hang from. A node that was already printed through
/// another parent is shown once more with a `↩` marker instead of repeating
/// its subtree.
///
/// Indentation stops growing after [`MAX_INDENT_DEPTH`] levels; deeper nodes
/// are drawn at that indentation so output size stays linear in the node count.
pub fn render_ascii_tree(graph: &GraphDescription) -> String {
    let mut output = String::new();
    let mut visited: HashSet<NodeIndex> = HashSet::new();

    let roots = graph.roots().nodes;

    // Every node has a parent only if the graph is cyclic; start from the first node then
    let start_nodes: Vec<NodeIndex> = if roots.is_empty() {
        graph.inner().node_indices().take(1).collect()
    } else {
        roots
    };

    for (i, &root) in start_nodes.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        render_block(&mut output, graph, root, &mut visited);
    }

    output
}

struct Line {
    node: NodeIndex,
    prefix: String,
    tag: String,
    is_last: bool,
    depth: usize,
}

fn render_block(
    output: &mut String,
    graph: &GraphDescription,
    root: NodeIndex,
    visited: &mut HashSet<NodeIndex>,
) {
    let mut stack = vec![Line {
        node: root,
        prefix: String::new(),
        tag: String::new(),
        is_last: true,
        depth: 0,
    }];

    while let Some(line) = stack.pop() {
        let connector = if line.prefix.is_empty() && line.tag.is_empty() {
            ""
        } else if line.is_last {
            "└── "
        } else {
            "├── "
        };

        let label = graph.get_node(line.node).map(|n| n.label.as_str()).unwrap_or("?");

        output.push_str(&line.prefix);
        output.push_str(connector);
        output.push_str(&line.tag);
        output.push_str(label);

        // Already printed through another parent
        if !visited.insert(line.node) {
            output.push_str(" ↩\n");
            continue;
        }
        output.push('\n');

        let children = graph.children_with_sides(line.node);
        let child_prefix = if connector.is_empty() {
            String::new()
        } else if line.depth >= MAX_INDENT_DEPTH {
            line.prefix.clone()
        } else if line.is_last {
            format!("{}    ", line.prefix)
        } else {
            format!("{}│   ", line.prefix)
        };

        // Reversed so the first child is printed first
        let last = children.len().saturating_sub(1);
        for (i, (child, side)) in children.into_iter().enumerate().rev() {
            stack.push(Line {
                node: child,
                prefix: child_prefix.clone(),
                tag: format!("{}: ", side.short_label()),
                is_last: i == last,
                depth: line.depth + 1,
            });
        }
    }
}
