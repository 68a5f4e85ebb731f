//! Error types for layout engines and the visualizer.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by a layout engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine's runtime context could not be acquired
    #[error("engine initialization failed: {reason}")]
    Initialization { reason: String },

    /// The requested output format is not known to the engine
    #[error("unsupported output format '{format}' (supported: {})", .supported.join(", "))]
    UnsupportedFormat {
        format: String,
        supported: Vec<String>,
    },

    /// The requested layout strategy is not known to the engine
    #[error("unknown layout strategy '{strategy}'")]
    UnknownLayout { strategy: String },

    /// The engine could not compute a layout
    #[error("layout failed: {reason}")]
    Layout { reason: String },

    /// Rendering was requested for a graph without a layout
    #[error("graph has not been laid out")]
    NotLaidOut,

    /// The render target could not be written
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other render failure reported by the engine
    #[error("render failed: {reason}")]
    Render { reason: String },

    /// An external engine process could not be started
    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl EngineError {
    /// Check if this error reports an unknown output format.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, EngineError::UnsupportedFormat { .. })
    }

    /// Check if this error comes from the layout step.
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownLayout { .. } | EngineError::Layout { .. }
        )
    }

    /// Check if this error reports an unwritable render target.
    pub fn is_write(&self) -> bool {
        matches!(self, EngineError::Write { .. })
    }
}

/// The step of a `visualize` call at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Opening a new graph in the engine
    Open,
    /// Computing the layout
    Layout,
    /// Rendering the layout to the output file
    Render,
}

impl Stage {
    /// Get a human-readable label for this stage.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Open => "graph-open",
            Stage::Layout => "layout",
            Stage::Render => "render",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A failed `visualize` call: the stage that failed and the engine's cause.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct VisualizeError {
    /// Where the failure happened
    pub stage: Stage,
    /// What the engine reported
    #[source]
    pub source: EngineError,
}

impl VisualizeError {
    /// Attach a stage to an engine error.
    pub fn new(stage: Stage, source: EngineError) -> Self {
        Self { stage, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_in_message() {
        let err = VisualizeError::new(
            Stage::Render,
            EngineError::UnsupportedFormat {
                format: "bogus".into(),
                supported: vec!["svg".into(), "dot".into()],
            },
        );
        assert_eq!(
            err.to_string(),
            "render stage failed: unsupported output format 'bogus' (supported: svg, dot)"
        );
        assert!(err.source.is_unsupported_format());
    }

    #[test]
    fn test_write_error_message_names_path() {
        let err = EngineError::Write {
            path: PathBuf::from("/nope/out.svg"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing directory"),
        };
        assert_eq!(err.to_string(), "cannot write /nope/out.svg: missing directory");
        assert!(err.is_write());
    }

    #[test]
    fn test_open_stage_label() {
        assert_eq!(Stage::Open.to_string(), "graph-open");
        assert!(EngineError::UnknownLayout { strategy: "x".into() }.is_layout());
    }
}
