//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the experiment harness.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`SNOWCAP_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (`config.defaults.toml`, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! SNOWCAP_<SECTION>_<KEY>=value
//!
//! Examples:
//!     SNOWCAP_COMMON_LOG_LEVEL=debug
//!     SNOWCAP_TREE_DEPTH=12
//!     SNOWCAP_MCTS_ITERATIONS_PER_HORIZON=50
//!     SNOWCAP_SWEEP_C_VALUES=0,0.5,1,2
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, find_config_file, load_config, load_from_path, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
