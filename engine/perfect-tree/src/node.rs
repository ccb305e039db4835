//! Node identifiers and branch directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node in heap order. The root is always `NodeId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_root(self) -> bool {
        self.0 == 0
    }

    /// Left child index, without bounds checking against any tree.
    #[inline]
    pub(crate) fn left(self) -> NodeId {
        NodeId(2 * self.0 + 1)
    }

    #[inline]
    pub(crate) fn right(self) -> NodeId {
        NodeId(2 * self.0 + 2)
    }

    /// Parent index, `None` for the root.
    #[inline]
    pub(crate) fn parent(self) -> Option<NodeId> {
        if self.is_root() {
            None
        } else {
            Some(NodeId((self.0 - 1) / 2))
        }
    }

    /// Which side of its parent this node hangs off. `None` for the root.
    #[inline]
    pub(crate) fn branch(self) -> Option<Branch> {
        if self.is_root() {
            None
        } else if self.0 % 2 == 1 {
            Some(Branch::Left)
        } else {
            Some(Branch::Right)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One step down the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    Left,
    Right,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Left => f.write_str("left"),
            Branch::Right => f.write_str("right"),
        }
    }
}
