//! Random rollouts.

use perfect_tree::{NodeId, PerfectTree};
use rand::Rng;

use crate::search::SearchError;

/// Descend from `node` to a leaf by fair coin flips and return its payoff.
///
/// Draws `u ~ U[0, 1)` at every internal node and goes left when `u > 0.5`.
/// Search statistics play no part.
pub fn rollout<R: Rng + ?Sized>(
    shape: &PerfectTree,
    node: NodeId,
    rng: &mut R,
) -> Result<f64, SearchError> {
    if !shape.contains(node) {
        return Err(SearchError::UnknownNode(node));
    }

    let mut current = node;
    while let Some((left, right)) = shape.children(current) {
        current = if rng.gen::<f64>() > 0.5 { left } else { right };
    }
    shape
        .leaf_value(current)
        .ok_or(SearchError::UnknownNode(current))
}
