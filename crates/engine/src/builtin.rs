//! Pure Rust layout engine.

use crate::error::EngineError;
use crate::format::OutputFormat;
use crate::layout::{compute_layout, Layout, LayoutSettings, LayoutStrategy};
use crate::svg::render_svg;
use crate::{GraphOptions, LayoutEngine};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use treeviz_graph::{
    render_ascii_tree, render_dot, render_graphml, render_json, ChildSide, DotStyle,
    GraphDescription, GraphSink,
};

/// Layout engine implemented in this crate.
///
/// Supports the `"dot"` layout strategy and the formats listed in
/// [`OutputFormat::NAMES`].
#[derive(Debug)]
pub struct BuiltinEngine {
    settings: LayoutSettings,
    open_graphs: usize,
}

/// Graph handle of the [`BuiltinEngine`].
#[derive(Debug)]
pub struct BuiltinGraph {
    description: GraphDescription,
    label_edges: bool,
    layout: Option<Layout>,
}

impl BuiltinGraph {
    /// The graph description collected so far.
    pub fn description(&self) -> &GraphDescription {
        &self.description
    }

    /// The computed layout, if the graph has been laid out.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }
}

impl GraphSink for BuiltinGraph {
    fn ensure_node(&mut self, id: &str, label: &str) {
        self.description.ensure_node(id, label);
    }

    fn add_edge(&mut self, from: &str, to: &str, side: ChildSide) {
        self.description.add_edge(from, to, side);
    }
}

impl Default for BuiltinEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinEngine {
    /// Create an engine with default geometry.
    pub fn new() -> Self {
        Self::with_settings(LayoutSettings::default())
    }

    /// Create an engine with custom geometry.
    pub fn with_settings(settings: LayoutSettings) -> Self {
        debug!("builtin layout engine ready");
        Self {
            settings,
            open_graphs: 0,
        }
    }

    /// Get the geometry settings.
    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Number of graphs opened and not yet closed.
    pub fn open_graphs(&self) -> usize {
        self.open_graphs
    }

    /// Render a laid-out graph to a string instead of a file.
    pub fn render_to_string(
        &self,
        graph: &BuiltinGraph,
        format: OutputFormat,
    ) -> Result<String, EngineError> {
        let layout = graph.layout.as_ref().ok_or(EngineError::NotLaidOut)?;
        let description = &graph.description;

        let rendered = match format {
            OutputFormat::Svg => render_svg(description, layout, &self.settings, graph.label_edges),
            OutputFormat::Dot => {
                let positions = layout.positions();
                let style = DotStyle {
                    label_edges: graph.label_edges,
                    positions: Some(&positions),
                };
                render_dot(description, &style)
            }
            OutputFormat::GraphMl => render_graphml(description),
            OutputFormat::Json => render_json(description).map_err(|e| EngineError::Render {
                reason: e.to_string(),
            })?,
            OutputFormat::Ascii => render_ascii_tree(description),
        };
        Ok(rendered)
    }
}

impl LayoutEngine for BuiltinEngine {
    type Graph = BuiltinGraph;

    fn open(&mut self, options: &GraphOptions) -> Result<BuiltinGraph, EngineError> {
        self.open_graphs += 1;
        Ok(BuiltinGraph {
            description: GraphDescription::named(options.name.as_str()),
            label_edges: options.label_edges,
            layout: None,
        })
    }

    fn layout(&mut self, graph: &mut BuiltinGraph, strategy: &str) -> Result<(), EngineError> {
        let strategy: LayoutStrategy = strategy.parse()?;
        let layout = compute_layout(&graph.description, strategy, &self.settings)?;
        debug!(
            ranks = layout.rank_count(),
            width = layout.width,
            height = layout.height,
            "computed layout"
        );
        graph.layout = Some(layout);
        Ok(())
    }

    fn render(&mut self, graph: &BuiltinGraph, format: &str, path: &Path) -> Result<(), EngineError> {
        let format: OutputFormat = format.parse()?;
        let rendered = self.render_to_string(graph, format)?;
        fs::write(path, rendered).map_err(|source| EngineError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn free_layout(&mut self, graph: &mut BuiltinGraph) {
        graph.layout = None;
    }

    fn close(&mut self, graph: BuiltinGraph) {
        self.open_graphs = self.open_graphs.saturating_sub(1);
        drop(graph);
    }
}

impl Drop for BuiltinEngine {
    fn drop(&mut self) {
        if self.open_graphs > 0 {
            warn!(open_graphs = self.open_graphs, "builtin engine released with open graphs");
        }
        debug!("builtin layout engine released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use treeviz_graph::{sample_tree, TreeGraphBuilder};

    fn laid_out_sample(engine: &mut BuiltinEngine) -> BuiltinGraph {
        let tree = sample_tree();
        let mut graph = engine.open(&GraphOptions::default()).unwrap();
        TreeGraphBuilder::new().populate(&mut graph, Some(&tree));
        engine.layout(&mut graph, "dot").unwrap();
        graph
    }

    #[test]
    fn test_open_close_tracks_graphs() {
        let mut engine = BuiltinEngine::new();
        let graph = engine.open(&GraphOptions::default()).unwrap();
        assert_eq!(engine.open_graphs(), 1);
        engine.close(graph);
        assert_eq!(engine.open_graphs(), 0);
    }

    #[test]
    fn test_render_before_layout_fails() {
        let mut engine = BuiltinEngine::new();
        let graph = engine.open(&GraphOptions::default()).unwrap();
        let err = engine.render_to_string(&graph, OutputFormat::Svg).unwrap_err();
        assert!(matches!(err, EngineError::NotLaidOut));
        engine.close(graph);
    }

    #[test]
    fn test_free_layout_drops_layout() {
        let mut engine = BuiltinEngine::new();
        let mut graph = laid_out_sample(&mut engine);
        assert!(graph.layout().is_some());
        engine.free_layout(&mut graph);
        assert!(graph.layout().is_none());
        engine.close(graph);
    }

    #[test]
    fn test_every_format_renders() {
        let mut engine = BuiltinEngine::new();
        let graph = laid_out_sample(&mut engine);

        for name in OutputFormat::NAMES {
            let format: OutputFormat = name.parse().unwrap();
            let rendered = engine.render_to_string(&graph, format).unwrap();
            assert!(rendered.contains("left.right"), "{name} output lacks a label");
        }
        engine.close(graph);
    }

    #[test]
    fn test_dot_output_has_positions() {
        let mut engine = BuiltinEngine::new();
        let graph = laid_out_sample(&mut engine);
        let dot = engine.render_to_string(&graph, OutputFormat::Dot).unwrap();
        assert_eq!(dot.matches("pos=").count(), 7);
        engine.close(graph);
    }

    #[test]
    fn test_render_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.svg");
        let mut engine = BuiltinEngine::new();
        let graph = laid_out_sample(&mut engine);

        engine.render(&graph, "svg", &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("</svg>"));
        engine.close(graph);
    }

    #[test]
    fn test_render_into_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("tree.svg");
        let mut engine = BuiltinEngine::new();
        let graph = laid_out_sample(&mut engine);

        let err = engine.render(&graph, "svg", &path).unwrap_err();
        assert!(err.is_write());
        engine.close(graph);
    }

    #[test]
    fn test_unknown_strategy() {
        let mut engine = BuiltinEngine::new();
        let mut graph = engine.open(&GraphOptions::default()).unwrap();
        let err = engine.layout(&mut graph, "circo-ish").unwrap_err();
        assert!(matches!(err, EngineError::UnknownLayout { .. }));
        engine.close(graph);
    }
}
