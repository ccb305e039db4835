//! Search annotations over an immutable perfect tree.
//!
//! [`SearchTree`] pairs a borrowed [`PerfectTree`] with a contiguous array of
//! [`NodeStats`] indexed by [`NodeId`]. The shape is shared read-only; only
//! the annotations are mutated, and only by [`SearchTree::backup`].

use perfect_tree::{NodeId, PerfectTree};
use serde::{Deserialize, Serialize};

use crate::node::NodeStats;
use crate::path::BackdownPath;
use crate::search::SearchError;
use crate::ucb::ucb_score;

/// Annotation store for one search run.
#[derive(Debug, Clone)]
pub struct SearchTree<'t> {
    shape: &'t PerfectTree,

    /// One entry per node, all zero at creation
    stats: Vec<NodeStats>,
}

impl<'t> SearchTree<'t> {
    /// Fresh annotations over `shape`. A new run needs a new `SearchTree`.
    pub fn new(shape: &'t PerfectTree) -> Self {
        Self {
            shape,
            stats: vec![NodeStats::default(); shape.len()],
        }
    }

    #[inline]
    pub fn shape(&self) -> &'t PerfectTree {
        self.shape
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.shape.root()
    }

    /// Annotations of a node.
    #[inline]
    pub fn stats(&self, id: NodeId) -> &NodeStats {
        &self.stats[id.index()]
    }

    #[inline]
    pub(crate) fn stats_mut(&mut self, id: NodeId) -> &mut NodeStats {
        &mut self.stats[id.index()]
    }

    /// Tree policy step: the child of `node` with the higher UCB score.
    ///
    /// Leaves are returned unchanged. The left child wins only on a strictly
    /// greater score, so ties (including two unvisited children) go right.
    pub fn select(&self, node: NodeId, exploration_constant: f64) -> NodeId {
        let Some((left, right)) = self.shape.children(node) else {
            return node;
        };

        let parent_visits = self.stats(node).visit_count;
        let left_score = ucb_score(self, left, parent_visits, exploration_constant);
        let right_score = ucb_score(self, right, parent_visits, exploration_constant);

        if left_score.value > right_score.value {
            left
        } else {
            right
        }
    }

    /// Add `value` and one visit to `node` and each ancestor up to height `horizon`.
    ///
    /// Returns the ancestor at the horizon together with the path back down
    /// to `node`. Nothing is written unless `height(node) <= horizon <= depth`.
    pub fn backup(
        &mut self,
        node: NodeId,
        value: f64,
        horizon: u32,
    ) -> Result<(NodeId, BackdownPath), SearchError> {
        if !self.shape.contains(node) {
            return Err(SearchError::UnknownNode(node));
        }

        let height = self.shape.height(node);
        if horizon < height || horizon > self.shape.depth() {
            return Err(SearchError::HorizonUnreachable {
                node,
                height,
                horizon,
            });
        }

        let mut path = BackdownPath::new();
        let mut current = node;
        loop {
            self.stats_mut(current).record(value);

            if self.shape.height(current) == horizon {
                return Ok((current, path));
            }

            match (self.shape.parent(current), self.shape.branch_of(current)) {
                (Some(parent), Some(branch)) => {
                    path.push(branch);
                    current = parent;
                }
                _ => {
                    return Err(SearchError::HorizonUnreachable {
                        node,
                        height,
                        horizon,
                    })
                }
            }
        }
    }

    /// Get statistics about the annotations for debugging.
    pub fn summary(&self) -> TreeSummary {
        let root = self.stats(self.root());
        let depth = self.shape.depth();

        let mut visited_nodes = 0;
        let mut max_visited_depth = 0;
        for (i, stats) in self.stats.iter().enumerate() {
            if stats.is_visited() {
                visited_nodes += 1;
                let level = depth - self.shape.height(NodeId(i as u32));
                max_visited_depth = max_visited_depth.max(level);
            }
        }

        TreeSummary {
            total_nodes: self.stats.len(),
            visited_nodes,
            root_visits: root.visit_count,
            root_value: root.mean_value(),
            max_visited_depth,
        }
    }
}

/// Statistics about the annotations of a search tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSummary {
    pub total_nodes: usize,
    pub visited_nodes: usize,
    pub root_visits: u64,
    pub root_value: f64,
    pub max_visited_depth: u32,
}
