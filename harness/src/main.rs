//! Snowcap - exploration-constant sweeps for phased MCTS
//!
//! A batch process that:
//! 1. Builds random perfect binary trees with uniform leaf payoffs
//! 2. Searches each tree with snowcap MCTS for every exploration constant
//! 3. Ranks the chosen leaf against the true leaf ordering
//! 4. Logs per-c averages and writes them to `<output_dir>/sweep.csv`

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::{debug, error, info};

mod config;
mod report;
mod stats;
mod sweep;

use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn progress_bar(total: u64) -> Option<ProgressBar> {
    // Only draw when stderr is a TTY
    if !std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        return None;
    }
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} trials ({eta})")
        .ok()?
        .progress_chars("#>-");
    pb.set_style(style);
    Some(pb)
}

fn run(config: &Config) -> Result<()> {
    let start = Instant::now();

    let progress = progress_bar(config.num_trials());
    let outcomes = sweep::run_sweep(config, progress.as_ref())?;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let points = stats::summarize(&config.c_values, &outcomes);
    report::log_summary(&points, 1usize << config.depth);

    if !config.no_report {
        report::write_csv(&config.csv_path(), &points)?;
        if config.write_trials {
            report::write_trials_json(&config.trials_path(), &outcomes)?;
        }
    }

    info!(
        elapsed_secs = format!("{:.2}", start.elapsed().as_secs_f64()),
        trials = outcomes.len(),
        "Sweep finished"
    );
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    // The central config was loaded before tracing existed; report where from
    match harness_config::find_config_file() {
        Some(path) => info!(config_file = %path.display(), "Using config file"),
        None => info!("No config.toml found, using built-in defaults"),
    }
    let resolved = serde_json::to_string(&config)?;
    debug!(config = %resolved, "Resolved configuration");
    info!(
        log_level = %config.log_level,
        depth = config.depth,
        c_values = ?config.c_values,
        trials_per_c = config.trials,
        seed = config.seed,
        "Snowcap sweep starting"
    );

    match run(&config) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Sweep failed: {:#}", e);
            Err(e)
        }
    }
}
