//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_output_dir() -> String {
    defaults::output_dir().into()
}
fn d_depth() -> u32 {
    defaults::depth()
}
fn d_leaf_min() -> f64 {
    defaults::leaf_min()
}
fn d_leaf_max() -> f64 {
    defaults::leaf_max()
}
fn d_exploration_constant() -> f64 {
    defaults::exploration_constant()
}
fn d_iterations() -> u32 {
    defaults::iterations_per_horizon()
}
fn d_rollouts() -> u32 {
    defaults::rollouts_per_iteration()
}
fn d_c_values() -> Vec<f64> {
    defaults::c_values().to_vec()
}
fn d_trials() -> u32 {
    defaults::trials_per_c()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_threads() -> usize {
    defaults::threads()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Directory for CSV/JSON reports
    #[serde(default = "d_output_dir")]
    pub output_dir: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            output_dir: defaults::output_dir().into(),
        }
    }
}

/// Shape and payoff distribution of the generated trees
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TreeConfig {
    /// Edges from root to leaf; the tree has 2^depth leaves
    #[serde(default = "d_depth")]
    pub depth: u32,
    #[serde(default = "d_leaf_min")]
    pub leaf_min: f64,
    #[serde(default = "d_leaf_max")]
    pub leaf_max: f64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            depth: defaults::depth(),
            leaf_min: defaults::leaf_min(),
            leaf_max: defaults::leaf_max(),
        }
    }
}

/// Search budget and exploration constant
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    /// Used when a run does not sweep over c
    #[serde(default = "d_exploration_constant")]
    pub exploration_constant: f64,
    #[serde(default = "d_iterations")]
    pub iterations_per_horizon: u32,
    #[serde(default = "d_rollouts")]
    pub rollouts_per_iteration: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: defaults::exploration_constant(),
            iterations_per_horizon: defaults::iterations_per_horizon(),
            rollouts_per_iteration: defaults::rollouts_per_iteration(),
        }
    }
}

/// Exploration-constant sweep
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SweepConfig {
    #[serde(default = "d_c_values")]
    pub c_values: Vec<f64>,
    /// Independent trees searched per c value
    #[serde(default = "d_trials")]
    pub trials_per_c: u32,
    /// Base seed; every trial derives its own stream from it
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// Worker threads (0 = one per core)
    #[serde(default = "d_threads")]
    pub threads: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            c_values: defaults::c_values().to_vec(),
            trials_per_c: defaults::trials_per_c(),
            seed: defaults::seed(),
            threads: defaults::threads(),
        }
    }
}
