//! Upper Confidence Bound tree policy.
//!
//! ```text
//! UCB(n) = Q(n) + c * sqrt(log10(N_parent) / N(n))
//! ```
//!
//! Leaves are scored by their true payoff instead, and unvisited internal
//! nodes score `+inf` so every child is tried before any comparison.

use perfect_tree::NodeId;

use crate::tree::SearchTree;

/// Score of a candidate child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UcbScore {
    pub value: f64,

    /// Set when the child is a leaf and `value` is its payoff.
    pub terminal: bool,
}

/// Score `node` as seen from a parent with `parent_visits` visits.
///
/// `parent_visits` must be at least 1 whenever `node` has been visited,
/// since a backup through a child always passes through its parent.
/// `parent_visits == 1` makes the exploration term vanish.
pub fn ucb_score(
    tree: &SearchTree<'_>,
    node: NodeId,
    parent_visits: u64,
    exploration_constant: f64,
) -> UcbScore {
    if let Some(payoff) = tree.shape().leaf_value(node) {
        return UcbScore {
            value: payoff,
            terminal: true,
        };
    }

    let stats = tree.stats(node);
    if stats.visit_count == 0 {
        return UcbScore {
            value: f64::INFINITY,
            terminal: false,
        };
    }

    let visits = stats.visit_count as f64;
    let exploration = ((parent_visits as f64).log10() / visits).sqrt();
    UcbScore {
        value: stats.value_sum / visits + exploration_constant * exploration,
        terminal: false,
    }
}
