//! `treeviz` command-line entry point.

mod args;

use anyhow::{Context, Result};
use args::{Cli, Command, EngineArg, RenderArgs};
use clap::Parser;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use treeviz_engine::{LayoutEngine, TreeVisualizer, VisualizeOptions};
use treeviz_graph::{sample_tree, BinaryNode, GraphDescription, GraphRepr, TreeNode};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "TREEVIZ_LOG";

/// A node value read from tree JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

type JsonTree = BinaryNode<Label>;

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parse tree JSON. `null` is the empty tree.
fn parse_tree(source: &str) -> Result<Option<JsonTree>> {
    serde_json::from_str(source).context("invalid tree JSON")
}

fn read_tree(path: &Path) -> Result<Option<JsonTree>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    parse_tree(&source).with_context(|| format!("cannot load tree from '{}'", path.display()))
}

fn visualize_on<E, N>(
    mut visualizer: TreeVisualizer<E>,
    root: Option<&N>,
    options: &VisualizeOptions,
) -> Result<()>
where
    E: LayoutEngine,
    N: TreeNode,
{
    let report = visualizer.visualize_with(root, options)?;
    println!(
        "wrote {} ({} nodes, {})",
        report.output.display(),
        report.nodes,
        report.format
    );
    Ok(())
}

fn render<N: TreeNode>(root: Option<&N>, output: PathBuf, args: &RenderArgs) -> Result<()> {
    let options = VisualizeOptions::new(args.format.as_str(), output)
        .with_layout(args.layout.as_str())
        .with_edge_labels(args.label_edges);
    debug!(engine = %args.engine, ?options, "rendering");

    match args.engine {
        EngineArg::Builtin => visualize_on(TreeVisualizer::new(), root, &options),
        EngineArg::Graphviz => {
            let visualizer =
                TreeVisualizer::graphviz().context("cannot start the Graphviz engine")?;
            visualize_on(visualizer, root, &options)
        }
    }
}

fn inspect(root: Option<&JsonTree>) -> Result<String> {
    let graph = GraphDescription::from_tree(root);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph described"
    );
    serde_json::to_string_pretty(&GraphRepr::from(&graph)).context("cannot serialize graph")
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            input,
            output,
            render: args,
        } => {
            let tree = read_tree(&input)?;
            render(tree.as_ref(), output, &args)
        }
        Command::Demo {
            output,
            render: args,
        } => {
            let tree = sample_tree();
            render(Some(&tree), output, &args)
        }
        Command::Inspect { input } => {
            let tree = read_tree(&input)?;
            println!("{}", inspect(tree.as_ref())?);
            Ok(())
        }
    }
}
