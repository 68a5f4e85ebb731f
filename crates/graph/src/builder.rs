//! Builder for converting a binary tree into a graph description.

use crate::edges::ChildSide;
use crate::identity::NodeIdentity;
use crate::tree::TreeNode;
use crate::GraphDescription;

/// The narrow interface the traversal writes into.
///
/// [`GraphDescription`] implements it. Layout engines expose their own graph
/// handle through it, and tests substitute a recording sink.
pub trait GraphSink {
    /// Ensure a node with this id exists and carries this label.
    fn ensure_node(&mut self, id: &str, label: &str);

    /// Add a directed edge between two node ids.
    fn add_edge(&mut self, from: &str, to: &str, side: ChildSide);
}

/// Next child slot a frame still has to visit.
#[derive(Debug, Clone, Copy)]
enum Step {
    Left,
    Right,
    Done,
}

struct Frame<'t, N> {
    node: &'t N,
    id: String,
    next: Step,
}

/// Builder for populating a graph from a binary tree.
///
/// Traversal is depth-first pre-order, left before right, on an explicit
/// stack. Edge order matches the recursive formulation exactly: a node's left
/// edge, then the whole left subtree, then its right edge and right subtree.
///
/// A node reached through a second parent gets the extra incoming edge but is
/// not expanded again, so each parent → child link appears once.
#[derive(Debug, Default)]
pub struct TreeGraphBuilder {
    identity: NodeIdentity,
}

impl TreeGraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            identity: NodeIdentity::new(),
        }
    }

    /// Build a fresh graph description named `G` from the tree at `root`.
    pub fn build<N: TreeNode>(self, root: Option<&N>) -> GraphDescription {
        let mut graph = GraphDescription::new();
        self.populate(&mut graph, root);
        graph
    }

    /// Write the tree at `root` into `sink`.
    ///
    /// Returns the identity map, which callers can use to look up the id
    /// assigned to any visited node.
    pub fn populate<N, S>(mut self, sink: &mut S, root: Option<&N>) -> NodeIdentity
    where
        N: TreeNode,
        S: GraphSink + ?Sized,
    {
        let Some(root) = root else {
            return self.identity;
        };

        let root_id = self.identity.resolve(root).id;
        sink.ensure_node(&root_id, &root.label());

        let mut stack = vec![Frame {
            node: root,
            id: root_id,
            next: Step::Left,
        }];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let (child, side) = match frame.next {
                Step::Left => {
                    frame.next = Step::Right;
                    (node.left(), ChildSide::Left)
                }
                Step::Right => {
                    frame.next = Step::Done;
                    (node.right(), ChildSide::Right)
                }
                Step::Done => {
                    stack.pop();
                    continue;
                }
            };

            let Some(child) = child else {
                continue;
            };

            let resolved = self.identity.resolve(child);
            sink.ensure_node(&resolved.id, &child.label());
            sink.add_edge(&frame.id, &resolved.id, side);

            if resolved.first_visit {
                stack.push(Frame {
                    node: child,
                    id: resolved.id,
                    next: Step::Left,
                });
            }
        }

        self.identity
    }
}
