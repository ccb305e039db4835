//! Immutable perfect binary trees for search experiments.
//!
//! A [`PerfectTree`] of depth `D` has `2^D` leaves, each carrying a real
//! payoff drawn once at construction. Internal nodes carry no payoff. The
//! tree is stored as a flattened heap-ordered array, so parent and child
//! lookups are index arithmetic:
//!
//! ```text
//!             0            height D
//!          /     \
//!         1       2        height D-1
//!        / \     / \
//!       3   4   5   6      ...
//! ```
//!
//! Search statistics are deliberately not stored here; the tree shape and
//! payoffs can be shared read-only across any number of searches.
//!
//! # Usage
//!
//! ```rust
//! use perfect_tree::{LeafDistribution, PerfectTree};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(7);
//! let tree = PerfectTree::random(4, &LeafDistribution::default(), &mut rng).unwrap();
//!
//! assert_eq!(tree.num_leaves(), 16);
//! assert_eq!(tree.height(tree.root()), 4);
//! ```

pub mod node;
pub mod tree;

pub use node::{Branch, NodeId};
pub use tree::{LeafDistribution, PerfectTree, TreeError, MAX_DEPTH};
