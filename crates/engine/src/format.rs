//! Output formats produced by the built-in engine.

use crate::error::EngineError;
use std::fmt;
use std::str::FromStr;

/// A render target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Scalable vector graphic
    Svg,
    /// Graphviz DOT source with node positions
    Dot,
    /// GraphML XML
    GraphMl,
    /// JSON dump of the graph description
    Json,
    /// Plain-text tree drawing
    Ascii,
}

impl OutputFormat {
    /// Every format name accepted by [`FromStr`], aliases included.
    pub const NAMES: &'static [&'static str] =
        &["svg", "dot", "gv", "canon", "graphml", "json", "txt", "ascii"];

    /// Canonical name of this format.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Dot => "dot",
            OutputFormat::GraphMl => "graphml",
            OutputFormat::Json => "json",
            OutputFormat::Ascii => "txt",
        }
    }

    /// Guess a format from a file path's extension.
    pub fn from_extension(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl FromStr for OutputFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "dot" | "gv" | "canon" => Ok(OutputFormat::Dot),
            "graphml" => Ok(OutputFormat::GraphMl),
            "json" => Ok(OutputFormat::Json),
            "txt" | "ascii" => Ok(OutputFormat::Ascii),
            _ => Err(EngineError::UnsupportedFormat {
                format: s.to_string(),
                supported: Self::NAMES.iter().map(|n| n.to_string()).collect(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
