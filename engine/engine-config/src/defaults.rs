//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so every binary agrees on
//! the same values without shipping the file alongside it.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    tree: TreeDefaults,
    mcts: MctsDefaults,
    sweep: SweepDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    output_dir: String,
}

#[derive(Debug, Deserialize)]
struct TreeDefaults {
    depth: u32,
    leaf_min: f64,
    leaf_max: f64,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    exploration_constant: f64,
    iterations_per_horizon: u32,
    rollouts_per_iteration: u32,
}

#[derive(Debug, Deserialize)]
struct SweepDefaults {
    c_values: Vec<f64>,
    trials_per_c: u32,
    seed: u64,
    threads: usize,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn output_dir() -> &'static str {
    &DEFAULTS.common.output_dir
}

// Tree
pub fn depth() -> u32 {
    DEFAULTS.tree.depth
}
pub fn leaf_min() -> f64 {
    DEFAULTS.tree.leaf_min
}
pub fn leaf_max() -> f64 {
    DEFAULTS.tree.leaf_max
}

// MCTS
pub fn exploration_constant() -> f64 {
    DEFAULTS.mcts.exploration_constant
}
pub fn iterations_per_horizon() -> u32 {
    DEFAULTS.mcts.iterations_per_horizon
}
pub fn rollouts_per_iteration() -> u32 {
    DEFAULTS.mcts.rollouts_per_iteration
}

// Sweep
pub fn c_values() -> &'static [f64] {
    &DEFAULTS.sweep.c_values
}
pub fn trials_per_c() -> u32 {
    DEFAULTS.sweep.trials_per_c
}
pub fn seed() -> u64 {
    DEFAULTS.sweep.seed
}
pub fn threads() -> usize {
    DEFAULTS.sweep.threads
}
