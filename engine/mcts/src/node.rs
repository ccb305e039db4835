//! Per-node search annotations.
//!
//! The tree shape lives in [`perfect_tree::PerfectTree`] and never changes.
//! Each search run owns a parallel array of [`NodeStats`], indexed by
//! [`perfect_tree::NodeId`], that accumulates rollout results.

use serde::{Deserialize, Serialize};

/// Search statistics for one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStats {
    /// Number of backup passes through this node
    pub visit_count: u64,

    /// Sum of every rollout value backed up through this node
    pub value_sum: f64,
}

impl NodeStats {
    /// Mean rollout value, 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f64
        }
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visit_count > 0
    }

    #[inline]
    pub(crate) fn record(&mut self, value: f64) {
        self.visit_count += 1;
        self.value_sum += value;
    }
}
