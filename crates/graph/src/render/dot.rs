//! DOT source generation.
//!
//! The output is plain Graphviz DOT: one statement per node carrying its
//! `label`, one `->` statement per edge. `ordering="out"` keeps each node's
//! left child before its right child when Graphviz lays the graph out.

use crate::GraphDescription;
use std::fmt::Write;

/// Options for DOT output.
#[derive(Debug, Clone, Default)]
pub struct DotStyle<'a> {
    /// Emit `label="L"` / `label="R"` on edges
    pub label_edges: bool,
    /// Node positions in points, indexed by node index; emitted as `pos`
    pub positions: Option<&'a [(f64, f64)]>,
}

/// Render a graph description as DOT source.
pub fn render_dot(graph: &GraphDescription, style: &DotStyle<'_>) -> String {
    let mut output = String::new();

    writeln!(output, "digraph \"{}\" {{", escape_dot(graph.name())).unwrap();
    writeln!(output, "  ordering=\"out\";").unwrap();

    for idx in graph.inner().node_indices() {
        let Some(node) = graph.get_node(idx) else {
            continue;
        };
        write!(output, "  {} [label=\"{}\"", node.id, escape_dot(&node.label)).unwrap();
        if let Some((x, y)) = style.positions.and_then(|p| p.get(idx.index())) {
            write!(output, ", pos=\"{:.2},{:.2}\"", x, y).unwrap();
        }
        writeln!(output, "];").unwrap();
    }

    for (source, target, edge) in graph.edges() {
        if style.label_edges {
            writeln!(
                output,
                "  {} -> {} [label=\"{}\"];",
                source.id,
                target.id,
                edge.side.short_label()
            )
            .unwrap();
        } else {
            writeln!(output, "  {} -> {};", source.id, target.id).unwrap();
        }
    }

    writeln!(output, "}}").unwrap();
    output
}

/// Escape a string for use inside a double-quoted DOT string.
pub fn escape_dot(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}
