//! Phased Monte Carlo Tree Search over perfect binary trees.
//!
//! This crate searches a [`perfect_tree::PerfectTree`] for a high-payoff
//! leaf without enumerating the leaves. Each MCTS iteration consists of:
//!
//! 1. **Selection**: Descend with UCB (Upper Confidence Bound) until reaching
//!    an unvisited node or a leaf
//! 2. **Rollout**: Coin-flip descent from that node to a leaf, whose payoff
//!    is the rollout value
//! 3. **Backup**: Add the value and a visit to every node on the way back up
//!    to the current effective root, recording the path so further rollouts
//!    can start from the same node
//!
//! Iterations are grouped into phases. After each phase the search commits
//! to one child of the effective root and starts over one level lower, so
//! the candidate set shrinks until a single leaf remains.
//!
//! # Usage
//!
//! ```rust
//! use perfect_tree::{LeafDistribution, PerfectTree};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//! use snowcap::{search, SnowcapConfig};
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let tree = PerfectTree::random(10, &LeafDistribution::default(), &mut rng).unwrap();
//!
//! let config = SnowcapConfig::default()
//!     .with_exploration_constant(1.5)
//!     .with_iterations(10);
//! let result = search(&tree, config, &mut rng).unwrap();
//!
//! println!("Leaf {} with payoff {:.2}", result.leaf, result.value);
//! println!("Rank: {:?}", tree.rank_of(result.value));
//! ```
//!
//! # Configuration
//!
//! The [`SnowcapConfig`] struct controls search behavior:
//!
//! - `exploration_constant`: `c` in the UCB formula (default: 1.0)
//! - `iterations_per_horizon`: MCTS iterations per phase (default: 3)
//! - `rollouts_per_iteration`: rollouts from each selected node (default: 3)
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     SnowcapSearch                      │
//! ├────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  │
//! │  │ PerfectTree  │  │  SearchTree  │  │ ChaCha20Rng  │  │
//! │  │ (shape, imm.)│  │ (NodeStats)  │  │ (rollouts)   │  │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘  │
//! │         ▼                 ▼                 ▼          │
//! │  ┌──────────────────────────────────────────────────┐  │
//! │  │   select → rollout → backup → (redescend) ...    │  │
//! │  │   commit child → next phase                      │  │
//! │  └──────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod node;
pub mod path;
pub mod rollout;
pub mod search;
pub mod tree;
pub mod ucb;

// Re-export main types
pub use config::SnowcapConfig;
pub use node::NodeStats;
pub use path::BackdownPath;
pub use rollout::rollout;
pub use search::{search, SearchError, SearchResult, SearchStats, SnowcapSearch};
pub use tree::{SearchTree, TreeSummary};
pub use ucb::{ucb_score, UcbScore};
