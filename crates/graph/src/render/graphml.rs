//! GraphML export for graph visualization.
//!
//! GraphML is an XML-based format for graph exchange that is widely supported
//! by graph visualization tools like yEd, Gephi, Cytoscape, etc.

use crate::GraphDescription;
use std::fmt::Write;

/// Render a graph description as GraphML XML.
///
/// The output includes:
/// - Node attributes: label
/// - Edge attributes: side (`left` / `right`)
pub fn render_graphml(graph: &GraphDescription) -> String {
    let mut output = String::new();

    // XML header and GraphML schema
    writeln!(output, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
    writeln!(output, r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns""#).unwrap();
    writeln!(output, r#"         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#).unwrap();
    writeln!(output, r#"         xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns"#)
        .unwrap();
    writeln!(output, r#"         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">"#)
        .unwrap();

    writeln!(output, r#"  <key id="label" for="node" attr.name="label" attr.type="string"/>"#)
        .unwrap();
    writeln!(output, r#"  <key id="side" for="edge" attr.name="side" attr.type="string"/>"#)
        .unwrap();

    writeln!(
        output,
        r#"  <graph id="{}" edgedefault="directed">"#,
        escape_xml(graph.name())
    )
    .unwrap();

    for node in graph.nodes() {
        writeln!(output, r#"    <node id="{}">"#, escape_xml(&node.id)).unwrap();
        writeln!(output, r#"      <data key="label">{}</data>"#, escape_xml(&node.label)).unwrap();
        writeln!(output, r#"    </node>"#).unwrap();
    }

    for (edge_id, (source, target, edge)) in graph.edges().enumerate() {
        writeln!(
            output,
            r#"    <edge id="e{}" source="{}" target="{}">"#,
            edge_id,
            escape_xml(&source.id),
            escape_xml(&target.id)
        )
        .unwrap();
        writeln!(output, r#"      <data key="side">{}</data>"#, edge.side.label()).unwrap();
        writeln!(output, r#"    </edge>"#).unwrap();
    }

    writeln!(output, r#"  </graph>"#).unwrap();
    writeln!(output, r#"</graphml>"#).unwrap();

    output
}

/// Escape special XML characters.
///
/// Characters XML 1.0 cannot carry at all (control characters other than tab,
/// newline and carriage return, and U+FFFE / U+FFFF) become U+FFFD.
pub fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => escaped.push(char::REPLACEMENT_CHARACTER),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sample_tree, BinaryNode};

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hello""#), "say &quot;hello&quot;");
    }

    #[test]
    fn test_escape_xml_replaces_forbidden_characters() {
        assert_eq!(escape_xml("a\u{1}b\u{1f}c"), "a\u{fffd}b\u{fffd}c");
        assert_eq!(escape_xml("x\u{ffff}"), "x\u{fffd}");
        assert_eq!(escape_xml("tab\tline\n"), "tab\tline\n");
    }

    #[test]
    fn test_render_graphml_counts() {
        let tree = sample_tree();
        let graph = GraphDescription::from_tree(Some(&tree));
        let xml = render_graphml(&graph);

        assert_eq!(xml.matches("<node ").count(), 7);
        assert_eq!(xml.matches("<edge ").count(), 6);
        assert!(xml.contains(r#"<data key="label">left.right</data>"#));
        assert_eq!(xml.matches(r#"<data key="side">left</data>"#).count(), 3);
        assert_eq!(xml.matches(r#"<data key="side">right</data>"#).count(), 3);
        assert!(xml.trim_end().ends_with("</graphml>"));
    }

    #[test]
    fn test_render_graphml_escapes_labels() {
        let tree = BinaryNode::leaf("a<b");
        let xml = render_graphml(&GraphDescription::from_tree(Some(&tree)));
        assert!(xml.contains("a&lt;b"));
    }
}
