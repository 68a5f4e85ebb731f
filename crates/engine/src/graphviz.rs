//! Layout engine backed by the Graphviz `dot` binary.
//!
//! Layout runs `dot -K<strategy> -Tdot` and keeps the positioned DOT it
//! prints. Rendering feeds that positioned DOT to `dot -Kneato -n2`, which
//! reuses the computed positions instead of laying the graph out again.

use crate::error::EngineError;
use crate::{GraphOptions, LayoutEngine};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::{debug, warn};
use treeviz_graph::{render_dot, ChildSide, DotStyle, GraphDescription, GraphSink};

/// Graphviz-backed layout engine.
#[derive(Debug)]
pub struct GraphvizEngine {
    binary: PathBuf,
    version: String,
    open_graphs: usize,
}

/// Graph handle of the [`GraphvizEngine`].
#[derive(Debug)]
pub struct GraphvizGraph {
    description: GraphDescription,
    label_edges: bool,
    positioned: Option<String>,
}

impl GraphvizGraph {
    /// The graph description collected so far.
    pub fn description(&self) -> &GraphDescription {
        &self.description
    }

    /// DOT source submitted to Graphviz for layout.
    pub fn source(&self) -> String {
        let style = DotStyle {
            label_edges: self.label_edges,
            positions: None,
        };
        render_dot(&self.description, &style)
    }

    /// Positioned DOT returned by the layout step.
    pub fn positioned(&self) -> Option<&str> {
        self.positioned.as_deref()
    }
}

impl GraphSink for GraphvizGraph {
    fn ensure_node(&mut self, id: &str, label: &str) {
        self.description.ensure_node(id, label);
    }

    fn add_edge(&mut self, from: &str, to: &str, side: ChildSide) {
        self.description.add_edge(from, to, side);
    }
}

impl GraphvizEngine {
    /// Binary used when neither the caller nor the environment names one.
    pub const DEFAULT_BINARY: &'static str = "dot";

    /// Environment variable overriding the Graphviz binary.
    pub const BINARY_ENV: &'static str = "TREEVIZ_DOT";

    /// Acquire a Graphviz context using `$TREEVIZ_DOT` or `dot` from `PATH`.
    pub fn new() -> Result<Self, EngineError> {
        let binary = std::env::var_os(Self::BINARY_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| OsString::from(Self::DEFAULT_BINARY));
        Self::with_binary(binary)
    }

    /// Acquire a Graphviz context using a specific binary.
    ///
    /// Fails with [`EngineError::Initialization`] if `<binary> -V` cannot run.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let binary = binary.into();
        let output = Command::new(&binary)
            .arg("-V")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| EngineError::Initialization {
                reason: format!("cannot run {}: {}", binary.display(), e),
            })?;

        if !output.status.success() {
            return Err(EngineError::Initialization {
                reason: format!(
                    "{} -V exited with {}: {}",
                    binary.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        // `dot -V` reports on stderr
        let version = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!(binary = %binary.display(), %version, "graphviz engine ready");

        Ok(Self {
            binary,
            version,
            open_graphs: 0,
        })
    }

    /// Path of the Graphviz binary in use.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Version banner reported by Graphviz.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of graphs opened and not yet closed.
    pub fn open_graphs(&self) -> usize {
        self.open_graphs
    }

    /// Run the binary with `args`, feeding `input` on stdin.
    fn run(&self, args: &[OsString], input: String) -> Result<Output, EngineError> {
        let program = self.binary.display().to_string();
        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: program.clone(),
                source,
            })?;

        // Feed stdin from another thread so a large stdout cannot deadlock us
        let stdin = child.stdin.take();
        let feeder = std::thread::spawn(move || match stdin {
            Some(mut stdin) => stdin.write_all(input.as_bytes()),
            None => Ok(()),
        });

        let output = child
            .wait_with_output()
            .map_err(|source| EngineError::Spawn { program, source })?;

        if let Ok(Err(e)) = feeder.join() {
            // A broken pipe here means Graphviz exited early; its status says why
            debug!(error = %e, "graphviz closed stdin early");
        }
        Ok(output)
    }
}

impl LayoutEngine for GraphvizEngine {
    type Graph = GraphvizGraph;

    fn open(&mut self, options: &GraphOptions) -> Result<GraphvizGraph, EngineError> {
        self.open_graphs += 1;
        Ok(GraphvizGraph {
            description: GraphDescription::named(options.name.as_str()),
            label_edges: options.label_edges,
            positioned: None,
        })
    }

    fn layout(&mut self, graph: &mut GraphvizGraph, strategy: &str) -> Result<(), EngineError> {
        let args = [OsString::from(format!("-K{}", strategy)), OsString::from("-Tdot")];
        let output = self.run(&args, graph.source())?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_layout_failure(&stderr, strategy));
        }
        graph.positioned = Some(String::from_utf8_lossy(&output.stdout).into_owned());
        Ok(())
    }

    fn render(&mut self, graph: &GraphvizGraph, format: &str, path: &Path) -> Result<(), EngineError> {
        let positioned = graph.positioned.clone().ok_or(EngineError::NotLaidOut)?;
        let args = [
            OsString::from("-Kneato"),
            OsString::from("-n2"),
            OsString::from(format!("-T{}", format)),
            OsString::from("-o"),
            path.as_os_str().to_os_string(),
        ];
        let output = self.run(&args, positioned)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_render_failure(&stderr, format, path));
        }
        Ok(())
    }

    fn free_layout(&mut self, graph: &mut GraphvizGraph) {
        graph.positioned = None;
    }

    fn close(&mut self, graph: GraphvizGraph) {
        self.open_graphs = self.open_graphs.saturating_sub(1);
        drop(graph);
    }
}

impl Drop for GraphvizEngine {
    fn drop(&mut self) {
        if self.open_graphs > 0 {
            warn!(open_graphs = self.open_graphs, "graphviz engine released with open graphs");
        }
        debug!("graphviz engine released");
    }
}

/// Map Graphviz layout stderr to an engine error.
fn classify_layout_failure(stderr: &str, strategy: &str) -> EngineError {
    if stderr.contains("Layout type") && stderr.contains("not recognized") {
        EngineError::UnknownLayout {
            strategy: strategy.to_string(),
        }
    } else {
        EngineError::Layout {
            reason: stderr.trim().to_string(),
        }
    }
}

/// Map Graphviz render stderr to an engine error.
fn classify_render_failure(stderr: &str, format: &str, path: &Path) -> EngineError {
    if stderr.contains("Format:") && stderr.contains("not recognized") {
        EngineError::UnsupportedFormat {
            format: format.to_string(),
            supported: supported_formats(stderr),
        }
    } else if stderr.contains("Could not open") || stderr.contains("could not open") {
        EngineError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::other(stderr.trim().to_string()),
        }
    } else {
        EngineError::Render {
            reason: stderr.trim().to_string(),
        }
    }
}

/// Parse the `Use one of: ...` list Graphviz prints after an unknown format.
fn supported_formats(stderr: &str) -> Vec<String> {
    stderr
        .split_once("Use one of:")
        .map(|(_, list)| list.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
