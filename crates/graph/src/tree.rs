//! The tree-node capability the converter reads, plus a ready-made node type.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A binary tree node as seen by the converter.
///
/// The converter only reads through this trait. It never mutates or owns the
/// tree. Children are returned as plain references, so owned (`Box`) trees
/// and shared (`Rc`/`Arc`) trees both fit:
///
/// ```
/// use std::rc::Rc;
/// use treeviz_graph::TreeNode;
///
/// struct Shared {
///     key: u32,
///     left: Option<Rc<Shared>>,
///     right: Option<Rc<Shared>>,
/// }
///
/// impl TreeNode for Shared {
///     fn left(&self) -> Option<&Self> {
///         self.left.as_deref()
///     }
///     fn right(&self) -> Option<&Self> {
///         self.right.as_deref()
///     }
///     fn label(&self) -> String {
///         self.key.to_string()
///     }
/// }
/// ```
pub trait TreeNode {
    /// The left child, if any.
    fn left(&self) -> Option<&Self>;

    /// The right child, if any.
    fn right(&self) -> Option<&Self>;

    /// Text shown inside this node's rendered box.
    fn label(&self) -> String;
}

/// An owned binary tree node carrying a displayable value.
///
/// Deserializes from JSON of the shape
/// `{"value": "root", "left": {...}, "right": {...}}` where both children are
/// optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryNode<T> {
    /// The value rendered as the node label
    pub value: T,
    /// Left subtree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<BinaryNode<T>>>,
    /// Right subtree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<BinaryNode<T>>>,
}

impl<T> BinaryNode<T> {
    /// Create a node with no children.
    pub fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// Set the left subtree.
    pub fn with_left(mut self, child: BinaryNode<T>) -> Self {
        self.left = Some(Box::new(child));
        self
    }

    /// Set the right subtree.
    pub fn with_right(mut self, child: BinaryNode<T>) -> Self {
        self.right = Some(Box::new(child));
        self
    }

    /// Count the nodes in this subtree.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        count
    }

    /// A node always contains at least itself.
    pub fn is_empty(&self) -> bool {
        false
    }
}

// Unlinks children onto a heap stack so dropping a degenerate tree does not recurse.
impl<T> Drop for BinaryNode<T> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<BinaryNode<T>>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T: Display> TreeNode for BinaryNode<T> {
    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn label(&self) -> String {
        self.value.to_string()
    }
}

/// The seven-node tree used by the demo and the end-to-end tests.
///
/// ```text
///              root
///           /        \
///       left          right
///      /    \        /     \
/// left.left left.right right.left right.right
/// ```
pub fn sample_tree() -> BinaryNode<String> {
    let node = |v: &str| BinaryNode::leaf(v.to_string());
    node("root")
        .with_left(
            node("left")
                .with_left(node("left.left"))
                .with_right(node("left.right")),
        )
        .with_right(
            node("right")
                .with_left(node("right.left"))
                .with_right(node("right.right")),
        )
}
