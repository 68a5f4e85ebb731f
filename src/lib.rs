//! # treeviz
//!
//! Render in-memory binary trees as laid-out graph drawings.
//!
//! ## Features
//!
//! | Feature | Crate | Description |
//! |---------|-------|-------------|
//! | `graph`  | [`treeviz-graph`]  | Tree traversal, node identity, DOT/GraphML/JSON/ASCII export |
//! | `engine` | [`treeviz-engine`] | Layout engines (built-in and Graphviz) and `TreeVisualizer` |
//!
//! `default = ["graph", "engine"]` enables both.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! treeviz = "0.1"
//! ```
//!
//! ```rust,no_run
//! use treeviz::{sample_tree, TreeVisualizer};
//!
//! let tree = sample_tree();
//! let mut visualizer = TreeVisualizer::new();
//! visualizer.visualize(Some(&tree), "svg", "binary_tree.svg")?;
//! # Ok::<(), treeviz::VisualizeError>(())
//! ```

#[cfg(feature = "graph")]
pub use treeviz_graph as graph;

#[cfg(feature = "graph")]
pub use treeviz_graph::{sample_tree, BinaryNode, GraphDescription, TreeNode};

#[cfg(feature = "engine")]
pub use treeviz_engine as engine;

#[cfg(feature = "engine")]
pub use treeviz_engine::{
    BuiltinEngine, EngineError, GraphvizEngine, LayoutEngine, Stage, TreeVisualizer,
    VisualizeError, VisualizeOptions,
};
