//! Snowcap search configuration parameters.

use serde::{Deserialize, Serialize};

use crate::search::SearchError;

/// Configuration for one phased search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowcapConfig {
    /// Exploration constant `c` in the UCB formula.
    /// 0.0 means pure exploitation once every child has been tried;
    /// larger values favour less-visited subtrees.
    pub exploration_constant: f64,

    /// MCTS iterations run from each effective root before committing to a child.
    pub iterations_per_horizon: u32,

    /// Rollouts run from the selected frontier node in every iteration.
    pub rollouts_per_iteration: u32,
}

impl Default for SnowcapConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.0,
            iterations_per_horizon: 3,
            rollouts_per_iteration: 3,
        }
    }
}

impl SnowcapConfig {
    /// Small budgets for fast tests.
    pub fn for_testing() -> Self {
        Self {
            exploration_constant: 1.0,
            iterations_per_horizon: 2,
            rollouts_per_iteration: 1,
        }
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set iterations per horizon.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations_per_horizon = n;
        self
    }

    /// Builder pattern: set rollouts per iteration.
    pub fn with_rollouts(mut self, n: u32) -> Self {
        self.rollouts_per_iteration = n;
        self
    }

    /// Reject configurations that cannot produce any statistics.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration_constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if self.iterations_per_horizon == 0 {
            return Err(SearchError::InvalidConfig(
                "iterations_per_horizon must be greater than 0".into(),
            ));
        }
        if self.rollouts_per_iteration == 0 {
            return Err(SearchError::InvalidConfig(
                "rollouts_per_iteration must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
