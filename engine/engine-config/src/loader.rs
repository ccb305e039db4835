//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Locate the config file [`load_config`] reads, if any.
///
/// Searches in the following order:
/// 1. Path specified by SNOWCAP_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
pub fn find_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SNOWCAP_CONFIG") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Load the central configuration from the file [`find_config_file`] picks.
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var("SNOWCAP_CONFIG") {
        if !Path::new(&path).exists() {
            // Usually runs before any subscriber is installed
            eprintln!("Warning: SNOWCAP_CONFIG={path} not found, searching defaults");
            warn!("SNOWCAP_CONFIG={} not found, searching defaults", path);
        }
    }

    match find_config_file() {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_from_path(&path)
        }
        None => {
            debug!("No config.toml found, using built-in defaults");
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Load configuration from a specific path.
///
/// Unreadable or malformed files fall back to the built-in defaults with a
/// warning on stderr as well as through `tracing`.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                eprintln!("Warning: failed to parse {}: {}, using defaults", path.display(), e);
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            eprintln!("Warning: failed to read {}: {}, using defaults", path.display(), e);
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Parse a comma-separated list such as `0,0.5,1.5`.
fn parse_list<T: std::str::FromStr>(raw: &str) -> Option<Vec<T>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
    // Comma-separated list field
    ($config:expr, $section:ident . $field:ident, $key:expr, list) => {
        if let Ok(raw) = std::env::var($key) {
            match parse_list(&raw) {
                Some(v) => $config.$section.$field = v,
                None => warn!("Ignoring unparseable {}={}", $key, raw),
            }
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: SNOWCAP_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "SNOWCAP_COMMON_LOG_LEVEL");
    env_override!(config, common.output_dir, "SNOWCAP_COMMON_OUTPUT_DIR");

    // Tree
    env_override!(config, tree.depth, "SNOWCAP_TREE_DEPTH", parse);
    env_override!(config, tree.leaf_min, "SNOWCAP_TREE_LEAF_MIN", parse);
    env_override!(config, tree.leaf_max, "SNOWCAP_TREE_LEAF_MAX", parse);

    // MCTS
    env_override!(
        config,
        mcts.exploration_constant,
        "SNOWCAP_MCTS_EXPLORATION_CONSTANT",
        parse
    );
    env_override!(
        config,
        mcts.iterations_per_horizon,
        "SNOWCAP_MCTS_ITERATIONS_PER_HORIZON",
        parse
    );
    env_override!(
        config,
        mcts.rollouts_per_iteration,
        "SNOWCAP_MCTS_ROLLOUTS_PER_ITERATION",
        parse
    );

    // Sweep
    env_override!(config, sweep.c_values, "SNOWCAP_SWEEP_C_VALUES", list);
    env_override!(
        config,
        sweep.trials_per_c,
        "SNOWCAP_SWEEP_TRIALS_PER_C",
        parse
    );
    env_override!(config, sweep.seed, "SNOWCAP_SWEEP_SEED", parse);
    env_override!(config, sweep.threads, "SNOWCAP_SWEEP_THREADS", parse);

    config
}
