//! Phased ("snowcap") MCTS search driver.
//!
//! The search never runs one global MCTS over the whole tree. Instead it
//! works in phases, one per level:
//! 1. Run a fixed number of MCTS iterations rooted at the effective root,
//!    backing every rollout up to the effective root and no further
//! 2. Commit to the child the tree policy prefers
//! 3. Repeat from that child until a leaf is reached
//!
//! Each iteration selects a frontier node with UCB, then runs several
//! rollouts from it, redescending from the effective root along the
//! recorded backdown path between rollouts.

use perfect_tree::{NodeId, PerfectTree};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::SnowcapConfig;
use crate::rollout::rollout;
use crate::tree::{SearchTree, TreeSummary};

/// Errors that can occur during a snowcap search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Node {0} is not part of the tree")]
    UnknownNode(NodeId),

    #[error("Horizon {horizon} unreachable from node {node} at height {height}")]
    HorizonUnreachable {
        node: NodeId,
        height: u32,
        horizon: u32,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Phases completed, one per committed level
    pub phases: u32,
    /// MCTS iterations across all phases
    pub iterations: u64,
    /// Rollouts (and therefore backups) across all phases
    pub rollouts: u64,
}

/// Result of a snowcap search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Leaf the search settled on
    pub leaf: NodeId,

    /// Payoff of that leaf
    pub value: f64,

    pub stats: SearchStats,

    /// Annotation summary at the end of the run
    pub summary: TreeSummary,
}

/// Search state for one run over one tree.
pub struct SnowcapSearch<'t> {
    tree: SearchTree<'t>,
    config: SnowcapConfig,
    stats: SearchStats,
}

impl<'t> SnowcapSearch<'t> {
    /// Create a search over `shape` with fresh annotations.
    pub fn new(shape: &'t PerfectTree, config: SnowcapConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            tree: SearchTree::new(shape),
            config,
            stats: SearchStats::default(),
        })
    }

    /// Run every phase to completion and return the chosen leaf.
    ///
    /// Annotations are not reset, so a search can only run once.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        if self.stats.phases > 0 {
            return Err(SearchError::InvalidState(
                "search already ran; annotations would be double counted".into(),
            ));
        }

        let shape = self.tree.shape();
        let c = self.config.exploration_constant;
        let mut effective_root = self.tree.root();

        while !shape.is_leaf(effective_root) {
            let horizon = shape.height(effective_root);

            for _ in 0..self.config.iterations_per_horizon {
                effective_root = self.iterate(effective_root, horizon, rng)?;
            }

            let committed = self.tree.select(effective_root, c);
            self.stats.phases += 1;

            debug!(
                phase = self.stats.phases,
                horizon,
                root = effective_root.0,
                root_visits = self.tree.stats(effective_root).visit_count,
                root_value = self.tree.stats(effective_root).mean_value(),
                committed = committed.0,
                "Snowcap phase complete"
            );

            effective_root = committed;
        }

        let leaf = self.tree.select(effective_root, c);
        let value = shape
            .leaf_value(leaf)
            .ok_or_else(|| SearchError::InvalidState(format!("search ended on internal node {leaf}")))?;

        Ok(SearchResult {
            leaf,
            value,
            stats: self.stats,
            summary: self.tree.summary(),
        })
    }

    /// Run one MCTS iteration rooted at `effective_root` (select, roll out, back up).
    ///
    /// Returns the node the last backup stopped at, which is `effective_root`.
    fn iterate(
        &mut self,
        effective_root: NodeId,
        horizon: u32,
        rng: &mut ChaCha20Rng,
    ) -> Result<NodeId, SearchError> {
        let shape = self.tree.shape();
        let c = self.config.exploration_constant;

        // Selection: always leave the effective root, then descend through
        // visited internal nodes until reaching an unvisited node or a leaf.
        let mut current = self.tree.select(effective_root, c);
        while self.tree.stats(current).is_visited() && !shape.is_leaf(current) {
            current = self.tree.select(current, c);
        }
        let frontier = current;

        let rollouts = self.config.rollouts_per_iteration;
        let mut top = effective_root;
        for k in 0..rollouts {
            let value = rollout(shape, current, rng)?;
            let (reached, path) = self.tree.backup(current, value, horizon)?;
            self.stats.rollouts += 1;
            top = reached;

            if k + 1 < rollouts {
                current = path.redescend(shape, reached).ok_or_else(|| {
                    SearchError::InvalidState(format!("backdown path from {reached} left the tree"))
                })?;
            }
        }
        self.stats.iterations += 1;

        trace!(
            horizon,
            frontier = frontier.0,
            frontier_visits = self.tree.stats(frontier).visit_count,
            rollouts,
            "Snowcap iteration complete"
        );

        Ok(top)
    }

    /// Get the annotations (for inspection/debugging).
    pub fn tree(&self) -> &SearchTree<'t> {
        &self.tree
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Convenience function to run a single snowcap search.
pub fn search(
    shape: &PerfectTree,
    config: SnowcapConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let mut search = SnowcapSearch::new(shape, config)?;
    search.run(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfect_tree::LeafDistribution;
    use rand::SeedableRng;

    fn random_tree(depth: u32, seed: u64) -> PerfectTree {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        PerfectTree::random(depth, &LeafDistribution::default(), &mut rng).unwrap()
    }

    #[test]
    fn test_search_returns_a_leaf() {
        for depth in 1..=8 {
            let shape = random_tree(depth, depth as u64);
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let result = search(&shape, SnowcapConfig::default(), &mut rng).unwrap();

            assert!(shape.is_leaf(result.leaf));
            assert_eq!(shape.height(result.leaf), 0);
            assert_eq!(shape.leaf_value(result.leaf), Some(result.value));
            assert_eq!(result.stats.phases, depth);
        }
    }

    #[test]
    fn test_depth_one_finds_better_leaf() {
        let shape = PerfectTree::from_leaf_values(vec![10.0, 90.0]).unwrap();
        let config = SnowcapConfig::default()
            .with_exploration_constant(1.5)
            .with_iterations(20);

        let found_best = (0..100)
            .filter(|&seed| {
                let mut rng = ChaCha20Rng::seed_from_u64(seed);
                search(&shape, config.clone(), &mut rng).unwrap().value == 90.0
            })
            .count();

        assert_eq!(found_best, 100);
    }

    #[test]
    fn test_zero_exploration_abandons_worse_subtree() {
        // Left subtree rolls out to at least 80, right to at most 20.
        let shape = PerfectTree::from_leaf_values(vec![80.0, 90.0, 10.0, 20.0]).unwrap();
        let config = SnowcapConfig::default()
            .with_exploration_constant(0.0)
            .with_iterations(10)
            .with_rollouts(1);

        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut search = SnowcapSearch::new(&shape, config).unwrap();
        let result = search.run(&mut rng).unwrap();

        let tree = search.tree();
        // Ties between unvisited children go right, so the right subtree gets
        // the first iteration and is never revisited after that.
        assert_eq!(tree.stats(NodeId(2)).visit_count, 1);
        // Nine root-phase iterations plus ten second-phase iterations.
        assert_eq!(tree.stats(NodeId(1)).visit_count, 19);
        assert_eq!(result.leaf, NodeId(4));
        assert_eq!(result.value, 90.0);
    }

    #[test]
    fn test_backups_respect_phase_horizon() {
        let shape = random_tree(6, 11);
        let config = SnowcapConfig::default().with_iterations(5).with_rollouts(3);

        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut search = SnowcapSearch::new(&shape, config).unwrap();
        let result = search.run(&mut rng).unwrap();

        // Only the first phase backs up as far as the root.
        assert_eq!(search.tree().stats(shape.root()).visit_count, 15);
        assert_eq!(result.summary.root_visits, 15);
    }

    #[test]
    fn test_budget_accounting() {
        let depth = 5;
        let shape = random_tree(depth, 5);
        let config = SnowcapConfig::default().with_iterations(4).with_rollouts(2);

        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let result = search(&shape, config, &mut rng).unwrap();

        assert_eq!(result.stats.phases, depth);
        assert_eq!(result.stats.iterations, (depth * 4) as u64);
        assert_eq!(result.stats.rollouts, (depth * 4 * 2) as u64);
    }

    #[test]
    fn test_repeated_rollouts_share_frontier() {
        let shape = PerfectTree::from_leaf_values(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let config = SnowcapConfig::default().with_iterations(1).with_rollouts(3);

        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let mut search = SnowcapSearch::new(&shape, config).unwrap();
        search.run(&mut rng).unwrap();

        // The single root-phase iteration picks the right child and rolls out
        // from it three times.
        let tree = search.tree();
        assert_eq!(tree.stats(NodeId(2)).visit_count, 3);
        assert_eq!(tree.stats(shape.root()).visit_count, 3);
    }

    #[test]
    fn test_search_is_seed_deterministic() {
        let shape = random_tree(10, 99);
        let config = SnowcapConfig::default().with_iterations(10);

        let a = search(&shape, config.clone(), &mut ChaCha20Rng::seed_from_u64(1)).unwrap();
        let b = search(&shape, config, &mut ChaCha20Rng::seed_from_u64(1)).unwrap();
        assert_eq!(a.leaf, b.leaf);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn test_rejects_degenerate_config() {
        let shape = random_tree(3, 0);
        assert!(matches!(
            SnowcapSearch::new(&shape, SnowcapConfig::default().with_iterations(0)),
            Err(SearchError::InvalidConfig(_))
        ));
        assert!(matches!(
            SnowcapSearch::new(&shape, SnowcapConfig::default().with_rollouts(0)),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_twice_is_rejected() {
        let shape = random_tree(3, 0);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let mut search = SnowcapSearch::new(&shape, SnowcapConfig::for_testing()).unwrap();

        let result = search.run(&mut rng).unwrap();
        assert_eq!(search.stats(), result.stats);

        assert!(matches!(
            search.run(&mut rng),
            Err(SearchError::InvalidState(_))
        ));
        // The refused run leaves the counters alone.
        assert_eq!(search.stats(), result.stats);
    }
}
