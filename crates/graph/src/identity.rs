//! Stable identifiers for tree nodes within one conversion.

use std::collections::HashMap;

/// Maps tree-node references to graph identifiers.
///
/// Identifiers are `n0`, `n1`, ... in first-visit order. The node's address is
/// only used as a lookup key, so ids do not depend on memory layout. All
/// references handed to one `NodeIdentity` must borrow from the same live tree,
/// which keeps addresses distinct and stable for its lifetime.
#[derive(Debug, Default)]
pub struct NodeIdentity {
    ids: HashMap<usize, usize>,
}

/// Result of resolving a node reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Graph identifier of the node
    pub id: String,
    /// True the first time this node reference was seen
    pub first_visit: bool,
}

impl NodeIdentity {
    /// Create an empty identity map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a node reference, assigning the next id on first sight.
    pub fn resolve<N>(&mut self, node: &N) -> Resolved {
        let next = self.ids.len();
        let mut first_visit = false;
        let ordinal = *self.ids.entry(Self::key(node)).or_insert_with(|| {
            first_visit = true;
            next
        });
        Resolved {
            id: Self::format(ordinal),
            first_visit,
        }
    }

    /// Look up the id of an already-visited node.
    pub fn get<N>(&self, node: &N) -> Option<String> {
        self.ids.get(&Self::key(node)).copied().map(Self::format)
    }

    /// Number of distinct nodes seen so far.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check whether no node has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn key<N>(node: &N) -> usize {
        std::ptr::from_ref(node).addr()
    }

    fn format(ordinal: usize) -> String {
        format!("n{}", ordinal)
    }
}
