//! CLI argument definitions for `treeviz`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use treeviz_engine::DEFAULT_LAYOUT;

/// Render binary trees as graph drawings.
#[derive(Debug, Parser)]
#[command(name = "treeviz", version, about = "Render binary trees as graph drawings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Layout backend selectable from the command line.
#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum EngineArg {
    /// Pure Rust hierarchical layout
    #[default]
    Builtin,
    /// Graphviz `dot` binary (`$TREEVIZ_DOT` overrides the path)
    Graphviz,
}

impl std::fmt::Display for EngineArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Builtin => "builtin",
            Self::Graphviz => "graphviz",
        };
        write!(f, "{as_str}")
    }
}

/// Options shared by every command that renders a file.
#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
    /// Output format (svg, dot, graphml, json, txt; more with --engine graphviz)
    #[arg(short, long, value_name = "FORMAT", default_value = "svg")]
    pub format: String,

    /// Layout strategy
    #[arg(long, value_name = "NAME", default_value = DEFAULT_LAYOUT)]
    pub layout: String,

    /// Layout backend
    #[arg(long, value_enum, default_value_t = EngineArg::Builtin)]
    pub engine: EngineArg,

    /// Label each edge with the side (L or R) it leaves its parent from
    #[arg(long)]
    pub label_edges: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a tree read from a JSON file.
    ///
    /// The file holds nested `{"value": ..., "left": {...}, "right": {...}}`
    /// objects; `null` stands for an empty tree.
    Render {
        /// Path to the tree JSON file
        #[arg(value_name = "TREE")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "binary_tree.svg")]
        output: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render the built-in seven-node sample tree.
    Demo {
        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "binary_tree_test.svg")]
        output: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Print the graph description of a tree as JSON.
    Inspect {
        /// Path to the tree JSON file
        #[arg(value_name = "TREE")]
        input: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_defaults() {
        let cli = Cli::try_parse_from(["treeviz", "render", "tree.json"]).unwrap();
        match cli.command {
            Command::Render {
                input,
                output,
                render,
            } => {
                assert_eq!(input, PathBuf::from("tree.json"));
                assert_eq!(output, PathBuf::from("binary_tree.svg"));
                assert_eq!(render.format, "svg");
                assert_eq!(render.layout, "dot");
                assert_eq!(render.engine, EngineArg::Builtin);
                assert!(!render.label_edges);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_demo_with_options() {
        let cli = Cli::try_parse_from([
            "treeviz",
            "demo",
            "-f",
            "png",
            "-o",
            "out.png",
            "--engine",
            "graphviz",
            "--label-edges",
        ])
        .unwrap();
        match cli.command {
            Command::Demo { output, render } => {
                assert_eq!(output, PathBuf::from("out.png"));
                assert_eq!(render.format, "png");
                assert_eq!(render.engine, EngineArg::Graphviz);
                assert!(render.label_edges);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_engine_rejected() {
        assert!(Cli::try_parse_from(["treeviz", "demo", "--engine", "cairo"]).is_err());
    }
}
