//! Array-backed perfect binary tree.
//!
//! The shape is fully determined by the depth, so only the leaf payoffs are
//! stored. Node `i` has children `2i+1` and `2i+2`; the leaves occupy the
//! last `2^depth` slots of the heap order.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{Branch, NodeId};

/// Deepest tree that can be built. 2^25 - 1 nodes still fit a `u32` index.
pub const MAX_DEPTH: u32 = 24;

/// Errors raised when a tree cannot be built as a perfect binary tree.
#[derive(Debug, Error, PartialEq)]
pub enum TreeError {
    #[error("Tree must have at least two leaves")]
    EmptyTree,

    #[error("Leaf count {0} is not a power of two")]
    NotPowerOfTwo(usize),

    #[error("Depth {depth} out of range (1..={max})")]
    DepthOutOfRange { depth: u32, max: u32 },

    #[error("Leaf {index} has non-finite value {value}")]
    NonFiniteLeaf { index: usize, value: f64 },

    #[error("Invalid leaf distribution: low {low} must be finite and below high {high}")]
    InvalidDistribution { low: f64, high: f64 },
}

/// Continuous uniform distribution the leaf payoffs are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeafDistribution {
    pub low: f64,
    pub high: f64,
}

impl Default for LeafDistribution {
    fn default() -> Self {
        Self {
            low: 0.0,
            high: 100.0,
        }
    }
}

impl LeafDistribution {
    pub fn new(low: f64, high: f64) -> Result<Self, TreeError> {
        let dist = Self { low, high };
        dist.validate()?;
        Ok(dist)
    }

    pub fn validate(&self) -> Result<(), TreeError> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low >= self.high {
            return Err(TreeError::InvalidDistribution {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// Immutable perfect binary tree with payoffs at the leaves.
///
/// Serialized as its leaf list; deserializing goes through
/// [`PerfectTree::from_leaf_values`], so the same checks apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PerfectTree {
    /// Edges from the root to every leaf
    depth: u32,

    /// Leaf payoffs, left to right
    leaf_values: Vec<f64>,
}

impl TryFrom<Vec<f64>> for PerfectTree {
    type Error = TreeError;

    fn try_from(leaf_values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_leaf_values(leaf_values)
    }
}

impl From<PerfectTree> for Vec<f64> {
    fn from(tree: PerfectTree) -> Self {
        tree.leaf_values
    }
}

impl PerfectTree {
    /// Build a tree from its leaf payoffs, listed left to right.
    pub fn from_leaf_values(leaf_values: Vec<f64>) -> Result<Self, TreeError> {
        let n = leaf_values.len();
        if n < 2 {
            return Err(TreeError::EmptyTree);
        }
        if !n.is_power_of_two() {
            return Err(TreeError::NotPowerOfTwo(n));
        }

        let depth = n.trailing_zeros();
        if depth > MAX_DEPTH {
            return Err(TreeError::DepthOutOfRange {
                depth,
                max: MAX_DEPTH,
            });
        }

        if let Some((index, &value)) = leaf_values.iter().enumerate().find(|(_, v)| !v.is_finite())
        {
            return Err(TreeError::NonFiniteLeaf { index, value });
        }

        Ok(Self { depth, leaf_values })
    }

    /// Build a tree of the given depth with i.i.d. uniform leaf payoffs.
    pub fn random<R: Rng + ?Sized>(
        depth: u32,
        distribution: &LeafDistribution,
        rng: &mut R,
    ) -> Result<Self, TreeError> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(TreeError::DepthOutOfRange {
                depth,
                max: MAX_DEPTH,
            });
        }
        distribution.validate()?;

        let uniform = Uniform::new(distribution.low, distribution.high);
        let leaf_values = (0..1usize << depth).map(|_| uniform.sample(rng)).collect();

        Ok(Self { depth, leaf_values })
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Total number of nodes, internal and leaf.
    #[inline]
    pub fn len(&self) -> usize {
        2 * self.leaf_values.len() - 1
    }

    /// Always false; a perfect tree has at least a root and two leaves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.leaf_values.is_empty()
    }

    #[inline]
    pub fn num_leaves(&self) -> usize {
        self.leaf_values.len()
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.len()
    }

    /// Index of the first leaf in heap order.
    #[inline]
    fn first_leaf(&self) -> usize {
        self.leaf_values.len() - 1
    }

    /// Distance in edges from `id` down to the leaves: 0 at leaves, `depth` at the root.
    #[inline]
    pub fn height(&self, id: NodeId) -> u32 {
        debug_assert!(self.contains(id), "node {id} outside tree");
        let level = u32::BITS - 1 - (id.0 + 1).leading_zeros();
        self.depth - level
    }

    #[inline]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        id.index() >= self.first_leaf()
    }

    /// Both children, or `None` at a leaf.
    #[inline]
    pub fn children(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        if self.is_leaf(id) {
            None
        } else {
            Some((id.left(), id.right()))
        }
    }

    #[inline]
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).map(|(left, _)| left)
    }

    #[inline]
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).map(|(_, right)| right)
    }

    /// Child on the given side, or `None` at a leaf.
    #[inline]
    pub fn child(&self, id: NodeId, branch: Branch) -> Option<NodeId> {
        match branch {
            Branch::Left => self.left(id),
            Branch::Right => self.right(id),
        }
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        id.parent()
    }

    /// Branch the parent takes to reach `id`. `None` for the root.
    #[inline]
    pub fn branch_of(&self, id: NodeId) -> Option<Branch> {
        id.branch()
    }

    /// Payoff of a leaf, `None` for internal nodes and ids outside the tree.
    #[inline]
    pub fn leaf_value(&self, id: NodeId) -> Option<f64> {
        id.index()
            .checked_sub(self.first_leaf())
            .and_then(|i| self.leaf_values.get(i).copied())
    }

    pub fn leaf_values(&self) -> &[f64] {
        &self.leaf_values
    }

    /// Leaf ids left to right.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        (self.first_leaf()..self.len()).map(|i| NodeId(i as u32))
    }

    /// Leaf payoffs sorted best first.
    pub fn ranked_leaf_values(&self) -> Vec<f64> {
        let mut values = self.leaf_values.clone();
        values.sort_by(|a, b| b.total_cmp(a));
        values
    }

    pub fn best_leaf_value(&self) -> f64 {
        self.leaf_values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Position of `value` among the leaves sorted best first (0 = the maximum).
    ///
    /// Equal payoffs share the rank of the first occurrence. Returns `None`
    /// if no leaf carries exactly this value.
    pub fn rank_of(&self, value: f64) -> Option<usize> {
        if !self.leaf_values.contains(&value) {
            return None;
        }
        Some(self.leaf_values.iter().filter(|&&v| v > value).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn depth_two() -> PerfectTree {
        PerfectTree::from_leaf_values(vec![10.0, 40.0, 30.0, 20.0]).unwrap()
    }

    #[test]
    fn test_from_leaf_values() {
        let tree = depth_two();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.num_leaves(), 4);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_rejects_non_perfect_trees() {
        assert_eq!(
            PerfectTree::from_leaf_values(vec![1.0]),
            Err(TreeError::EmptyTree)
        );
        assert_eq!(
            PerfectTree::from_leaf_values(vec![1.0, 2.0, 3.0]),
            Err(TreeError::NotPowerOfTwo(3))
        );
    }

    #[test]
    fn test_rejects_non_finite_leaf() {
        let err = PerfectTree::from_leaf_values(vec![1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, TreeError::NonFiniteLeaf { index: 1, .. }));
    }

    #[test]
    fn test_heights() {
        let tree = depth_two();
        assert_eq!(tree.height(NodeId(0)), 2);
        assert_eq!(tree.height(NodeId(1)), 1);
        assert_eq!(tree.height(NodeId(2)), 1);
        for leaf in 3..7 {
            assert_eq!(tree.height(NodeId(leaf)), 0);
        }
    }

    #[test]
    fn test_children_and_parent() {
        let tree = depth_two();
        assert_eq!(tree.children(NodeId(0)), Some((NodeId(1), NodeId(2))));
        assert_eq!(tree.children(NodeId(2)), Some((NodeId(5), NodeId(6))));
        assert!(tree.children(NodeId(4)).is_none());

        assert_eq!(tree.parent(NodeId(4)), Some(NodeId(1)));
        assert_eq!(tree.branch_of(NodeId(4)), Some(Branch::Right));
        assert_eq!(tree.child(NodeId(1), Branch::Right), Some(NodeId(4)));
        assert!(tree.parent(tree.root()).is_none());
    }

    #[test]
    fn test_leaf_values() {
        let tree = depth_two();
        assert_eq!(tree.leaf_value(NodeId(3)), Some(10.0));
        assert_eq!(tree.leaf_value(NodeId(4)), Some(40.0));
        assert_eq!(tree.leaf_value(NodeId(6)), Some(20.0));
        assert!(tree.leaf_value(NodeId(1)).is_none());
        assert!(tree.leaf_value(NodeId(7)).is_none());

        let leaves: Vec<_> = tree.leaves().collect();
        assert_eq!(leaves, vec![NodeId(3), NodeId(4), NodeId(5), NodeId(6)]);
    }

    #[test]
    fn test_ranking() {
        let tree = depth_two();
        assert_eq!(tree.ranked_leaf_values(), vec![40.0, 30.0, 20.0, 10.0]);
        assert!((tree.best_leaf_value() - 40.0).abs() < f64::EPSILON);
        assert_eq!(tree.rank_of(40.0), Some(0));
        assert_eq!(tree.rank_of(10.0), Some(3));
        assert_eq!(tree.rank_of(11.0), None);
    }

    #[test]
    fn test_rank_of_ties_takes_first_position() {
        let tree = PerfectTree::from_leaf_values(vec![5.0, 7.0, 7.0, 1.0]).unwrap();
        assert_eq!(tree.rank_of(7.0), Some(0));
        assert_eq!(tree.rank_of(5.0), Some(2));
    }

    #[test]
    fn test_random_tree() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let dist = LeafDistribution::default();
        let tree = PerfectTree::random(6, &dist, &mut rng).unwrap();

        assert_eq!(tree.num_leaves(), 64);
        assert!(tree
            .leaf_values()
            .iter()
            .all(|v| (0.0..100.0).contains(v)));
    }

    #[test]
    fn test_random_tree_is_seed_deterministic() {
        let dist = LeafDistribution::new(-1.0, 1.0).unwrap();
        let a = PerfectTree::random(5, &dist, &mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        let b = PerfectTree::random(5, &dist, &mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_rejects_bad_arguments() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let dist = LeafDistribution::default();
        assert!(matches!(
            PerfectTree::random(0, &dist, &mut rng),
            Err(TreeError::DepthOutOfRange { depth: 0, .. })
        ));
        assert!(matches!(
            PerfectTree::random(MAX_DEPTH + 1, &dist, &mut rng),
            Err(TreeError::DepthOutOfRange { .. })
        ));
        assert!(LeafDistribution::new(5.0, 5.0).is_err());
        assert!(LeafDistribution::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_serde_goes_through_validation() {
        let tree = depth_two();
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, "[10.0,40.0,30.0,20.0]");
        assert_eq!(serde_json::from_str::<PerfectTree>(&json).unwrap(), tree);

        // Depth and leaf count can no longer disagree.
        let malformed = r#"{"depth":3,"leaf_values":[1.0,2.0]}"#;
        assert!(serde_json::from_str::<PerfectTree>(malformed).is_err());
        assert!(serde_json::from_str::<PerfectTree>("[1.0,2.0,3.0]").is_err());
        assert!(serde_json::from_str::<PerfectTree>("[1.0]").is_err());
    }
}
