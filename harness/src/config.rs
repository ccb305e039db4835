//! Configuration for the sweep harness
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use harness_config::{load_config, CentralConfig};
use once_cell::sync::Lazy;
use perfect_tree::{LeafDistribution, MAX_DEPTH};
use serde::Serialize;
use snowcap::SnowcapConfig;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_output_dir() -> String {
    CENTRAL_CONFIG.common.output_dir.clone()
}

fn default_depth() -> u32 {
    CENTRAL_CONFIG.tree.depth
}

fn default_leaf_min() -> f64 {
    CENTRAL_CONFIG.tree.leaf_min
}

fn default_leaf_max() -> f64 {
    CENTRAL_CONFIG.tree.leaf_max
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations_per_horizon
}

fn default_rollouts() -> u32 {
    CENTRAL_CONFIG.mcts.rollouts_per_iteration
}

// An empty sweep list means "just the configured constant"
fn default_c_values() -> Vec<f64> {
    if CENTRAL_CONFIG.sweep.c_values.is_empty() {
        vec![CENTRAL_CONFIG.mcts.exploration_constant]
    } else {
        CENTRAL_CONFIG.sweep.c_values.clone()
    }
}

fn default_trials() -> u32 {
    CENTRAL_CONFIG.sweep.trials_per_c
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.sweep.seed
}

fn default_threads() -> usize {
    CENTRAL_CONFIG.sweep.threads
}

#[derive(Parser, Debug, Clone, Serialize)]
#[command(name = "snowcap")]
#[command(about = "Snowcap - exploration-constant sweeps for phased MCTS")]
#[command(
    long_about = "Builds random perfect binary trees, searches each with snowcap MCTS
and records how close the chosen leaf is to the true maximum, for every
exploration constant in the sweep.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Directory for sweep.csv and trials.json
    #[arg(long, default_value_t = default_output_dir())]
    pub output_dir: String,

    /// Tree depth in edges; each tree has 2^depth leaves
    #[arg(long, default_value_t = default_depth())]
    pub depth: u32,

    /// Lower bound of the uniform leaf distribution
    #[arg(long, default_value_t = default_leaf_min(), allow_negative_numbers = true)]
    pub leaf_min: f64,

    /// Upper bound (exclusive) of the uniform leaf distribution
    #[arg(long, default_value_t = default_leaf_max(), allow_negative_numbers = true)]
    pub leaf_max: f64,

    /// MCTS iterations per effective root
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// Rollouts per MCTS iteration
    #[arg(long, default_value_t = default_rollouts())]
    pub rollouts: u32,

    /// Exploration constants to sweep, comma separated
    #[arg(long = "c", value_delimiter = ',', default_values_t = default_c_values())]
    pub c_values: Vec<f64>,

    /// Independent trees searched per exploration constant
    #[arg(long, default_value_t = default_trials())]
    pub trials: u32,

    /// Base random seed
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Worker threads (0 = one per core)
    #[arg(long, default_value_t = default_threads())]
    pub threads: usize,

    /// Also write every trial outcome to trials.json
    #[arg(long)]
    pub write_trials: bool,

    /// Only log the summary, write no files
    #[arg(long)]
    pub no_report: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(anyhow!(
                "depth must be between 1 and {}, got {}",
                MAX_DEPTH,
                self.depth
            ));
        }

        if !self.leaf_min.is_finite()
            || !self.leaf_max.is_finite()
            || self.leaf_min >= self.leaf_max
        {
            return Err(anyhow!(
                "leaf_min ({}) must be finite and below leaf_max ({})",
                self.leaf_min,
                self.leaf_max
            ));
        }

        if self.c_values.is_empty() {
            return Err(anyhow!("c_values cannot be empty"));
        }

        for &c in &self.c_values {
            self.snowcap_config(c)
                .validate()
                .map_err(|e| anyhow!("c = {}: {}", c, e))?;
        }

        if self.trials == 0 {
            return Err(anyhow!("trials must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Search configuration for one exploration constant.
    pub fn snowcap_config(&self, c: f64) -> SnowcapConfig {
        SnowcapConfig::default()
            .with_exploration_constant(c)
            .with_iterations(self.iterations)
            .with_rollouts(self.rollouts)
    }

    pub fn leaf_distribution(&self) -> Result<LeafDistribution> {
        Ok(LeafDistribution::new(self.leaf_min, self.leaf_max)?)
    }

    pub fn num_trials(&self) -> u64 {
        self.c_values.len() as u64 * self.trials as u64
    }

    pub fn csv_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join("sweep.csv")
    }

    pub fn trials_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join("trials.json")
    }
}
