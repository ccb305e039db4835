//! Backdown paths recorded during backup.
//!
//! A backup climbs from a frontier node to the effective root, pushing the
//! branch taken at each step. Popping the stack replays those branches from
//! the effective root back down to the frontier node.

use perfect_tree::{Branch, NodeId, PerfectTree};

/// LIFO stack of branches from an ancestor to one of its descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackdownPath {
    /// Deepest branch first; the top of the stack is nearest the ancestor.
    stack: Vec<Branch>,
}

impl BackdownPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one step up: `branch` is how the parent reaches the child just left.
    #[inline]
    pub fn push(&mut self, branch: Branch) {
        self.stack.push(branch);
    }

    /// Next branch to take on the way down.
    #[inline]
    pub fn pop(&mut self) -> Option<Branch> {
        self.stack.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Branches in the order they are taken going down.
    pub fn iter_root_to_node(&self) -> impl Iterator<Item = Branch> + '_ {
        self.stack.iter().rev().copied()
    }

    /// Consume the path, branches in descent order.
    pub fn into_vec(self) -> Vec<Branch> {
        let mut branches = self.stack;
        branches.reverse();
        branches
    }

    /// Walk back down from `from`, consuming the path.
    ///
    /// Returns `None` if the path runs past a leaf.
    pub fn redescend(mut self, shape: &PerfectTree, from: NodeId) -> Option<NodeId> {
        let mut current = from;
        while let Some(branch) = self.pop() {
            current = shape.child(current, branch)?;
        }
        Some(current)
    }
}
