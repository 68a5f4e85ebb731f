//! SVG writer for laid-out graphs.
//!
//! Nodes are drawn as ellipses with centred labels, edges as straight lines
//! ending in an arrowhead. Group ids and titles follow Graphviz's SVG output
//! (`graph0`, `node1`, `edge1`, ...) so tooling that post-processes Graphviz
//! SVG also works here.

use crate::layout::{Layout, LayoutSettings};
use std::fmt::Write;
use treeviz_graph::render::escape_xml;
use treeviz_graph::GraphDescription;

const STROKE: &str = r#"fill="none" stroke="black""#;
const ARROW_ID: &str = "arrowhead";

/// Render a laid-out graph as an SVG document.
pub fn render_svg(
    graph: &GraphDescription,
    layout: &Layout,
    settings: &LayoutSettings,
    label_edges: bool,
) -> String {
    let mut out = String::new();
    let (w, h) = (layout.width, layout.height);
    let font = format!(
        r#"font-family="{}" font-size="{:.2}""#,
        escape_xml(&settings.font_family),
        settings.font_size
    );

    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#).unwrap();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}pt" height="{h:.0}pt" viewBox="0.00 0.00 {w:.2} {h:.2}">"#
    )
    .unwrap();
    writeln!(out, "<defs>").unwrap();
    writeln!(
        out,
        r#"<marker id="{ARROW_ID}" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="7" markerHeight="7" orient="auto"><path d="M 0 0 L 10 5 L 0 10 z" fill="black"/></marker>"#
    )
    .unwrap();
    writeln!(out, "</defs>").unwrap();
    writeln!(out, r#"<g id="graph0" class="graph">"#).unwrap();
    writeln!(out, "<title>{}</title>", escape_xml(graph.name())).unwrap();
    writeln!(out, r#"<rect x="0" y="0" width="{w:.2}" height="{h:.2}" fill="white"/>"#).unwrap();

    for (i, route) in layout.edges.iter().enumerate() {
        let source = graph.get_node(route.source).map(|n| n.id.as_str()).unwrap_or("?");
        let target = graph.get_node(route.target).map(|n| n.id.as_str()).unwrap_or("?");
        let (x1, y1) = route.from;
        let (x2, y2) = route.to;

        writeln!(out, r#"<g id="edge{}" class="edge">"#, i + 1).unwrap();
        writeln!(out, "<title>{}&#45;&gt;{}</title>", escape_xml(source), escape_xml(target)).unwrap();
        writeln!(
            out,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" {STROKE} marker-end="url(#{ARROW_ID})"/>"#
        )
        .unwrap();
        if label_edges {
            let mx = (x1 + x2) / 2.0;
            let my = (y1 + y2) / 2.0;
            let anchor = if x2 < x1 { "end" } else { "start" };
            writeln!(
                out,
                r#"<text x="{mx:.2}" y="{my:.2}" text-anchor="{anchor}" {font}>{}</text>"#,
                route.side.short_label()
            )
            .unwrap();
        }
        writeln!(out, "</g>").unwrap();
    }

    for (i, idx) in graph.inner().node_indices().enumerate() {
        let (Some(node), Some(p)) = (graph.get_node(idx), layout.placement(idx)) else {
            continue;
        };
        let (cx, cy) = (p.x, p.y);
        let (rx, ry) = (p.width / 2.0, p.height / 2.0);

        writeln!(out, r#"<g id="node{}" class="node">"#, i + 1).unwrap();
        writeln!(out, "<title>{}</title>", escape_xml(&node.id)).unwrap();
        writeln!(
            out,
            r#"<ellipse cx="{cx:.2}" cy="{cy:.2}" rx="{rx:.2}" ry="{ry:.2}" {STROKE}/>"#
        )
        .unwrap();
        out.push_str(&label_text(&node.label, cx, cy, settings, &font));
        writeln!(out, "</g>").unwrap();
    }

    writeln!(out, "</g>").unwrap();
    writeln!(out, "</svg>").unwrap();
    out
}

fn label_text(label: &str, cx: f64, cy: f64, settings: &LayoutSettings, font: &str) -> String {
    let lines: Vec<&str> = label.lines().collect();
    if lines.len() <= 1 {
        return format!(
            "<text x=\"{cx:.2}\" y=\"{cy:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" {font}>{}</text>\n",
            escape_xml(label)
        );
    }

    let first = cy - (lines.len() - 1) as f64 * settings.line_height / 2.0;
    let spans: String = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let y = first + i as f64 * settings.line_height;
            format!(r#"<tspan x="{cx:.2}" y="{y:.2}">{}</tspan>"#, escape_xml(line))
        })
        .collect();
    format!(
        "<text text-anchor=\"middle\" dominant-baseline=\"central\" {font}>{spans}</text>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_layout, LayoutStrategy};
    use treeviz_graph::{sample_tree, BinaryNode};

    fn svg_for(graph: &GraphDescription, label_edges: bool) -> String {
        let settings = LayoutSettings::default();
        let layout = compute_layout(graph, LayoutStrategy::Hierarchical, &settings).unwrap();
        render_svg(graph, &layout, &settings, label_edges)
    }

    #[test]
    fn test_sample_tree_svg() {
        let tree = sample_tree();
        let graph = GraphDescription::from_tree(Some(&tree));
        let svg = svg_for(&graph, false);

        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches(r#"class="node""#).count(), 7);
        assert_eq!(svg.matches(r#"class="edge""#).count(), 6);
        assert!(svg.contains(">right.left</text>"));
        assert!(!svg.contains(">L</text>"));
    }

    #[test]
    fn test_edge_labels() {
        let tree = BinaryNode::leaf("p").with_left(BinaryNode::leaf("c"));
        let graph = GraphDescription::from_tree(Some(&tree));
        let svg = svg_for(&graph, true);
        assert!(svg.contains(">L</text>"));
    }

    #[test]
    fn test_empty_graph_is_well_formed() {
        let svg = svg_for(&GraphDescription::new(), false);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert_eq!(svg.matches("<g ").count(), 1);
    }

    #[test]
    fn test_labels_are_escaped() {
        let tree = BinaryNode::leaf("a<b & c");
        let graph = GraphDescription::from_tree(Some(&tree));
        let svg = svg_for(&graph, false);
        assert!(svg.contains("a&lt;b &amp; c"));
    }

    #[test]
    fn test_control_characters_do_not_reach_svg() {
        let tree = BinaryNode::leaf("bell\u{7}key\u{1}");
        let graph = GraphDescription::from_tree(Some(&tree));
        let svg = svg_for(&graph, false);
        assert!(!svg.chars().any(|c| c.is_control() && !matches!(c, '\n' | '\t' | '\r')));
        assert!(svg.contains("bell\u{fffd}key\u{fffd}"));
    }

    #[test]
    fn test_multiline_label_uses_tspans() {
        let tree = BinaryNode::leaf("key: 4\nprio: 9");
        let graph = GraphDescription::from_tree(Some(&tree));
        let svg = svg_for(&graph, false);
        assert_eq!(svg.matches("<tspan").count(), 2);
    }
}
