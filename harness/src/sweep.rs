//! Exploration-constant sweep.
//!
//! Every trial builds its own random tree and searches it with its own
//! annotations and RNG stream, so trials are independent and run in
//! parallel. Outcomes are always returned in (c, trial) order.

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use perfect_tree::PerfectTree;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use snowcap::search;
use tracing::{debug, info};

use crate::config::Config;
use crate::stats::TrialOutcome;

/// RNG for one trial: the base seed selects the key, (c index, trial) the stream.
pub fn trial_rng(seed: u64, c_index: usize, trial: u32) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(((c_index as u64) << 32) | trial as u64);
    rng
}

/// Build one tree and search it.
pub fn run_trial(config: &Config, c_index: usize, trial: u32) -> Result<TrialOutcome> {
    let c = config.c_values[c_index];
    let mut rng = trial_rng(config.seed, c_index, trial);

    let tree = PerfectTree::random(config.depth, &config.leaf_distribution()?, &mut rng)
        .context("Failed to build tree")?;
    let result = search(&tree, config.snowcap_config(c), &mut rng)
        .with_context(|| format!("Search failed for c = {c}, trial {trial}"))?;
    let rank = tree
        .rank_of(result.value)
        .context("Search returned a value that is not a leaf payoff")?;

    let outcome = TrialOutcome {
        c_index,
        c,
        trial,
        value: result.value,
        rank,
        best_value: tree.best_leaf_value(),
        num_leaves: tree.num_leaves(),
        rollouts: result.stats.rollouts,
        summary: result.summary,
    };

    debug!(
        c,
        trial,
        value = outcome.value,
        rank,
        percentile = outcome.percentile(),
        visited_nodes = outcome.summary.visited_nodes,
        "Trial complete"
    );

    Ok(outcome)
}

/// Run every trial for every exploration constant.
pub fn run_sweep(config: &Config, progress: Option<&ProgressBar>) -> Result<Vec<TrialOutcome>> {
    let jobs: Vec<(usize, u32)> = (0..config.c_values.len())
        .flat_map(|c_index| (0..config.trials).map(move |trial| (c_index, trial)))
        .collect();

    info!(
        trials = jobs.len(),
        depth = config.depth,
        iterations = config.iterations,
        rollouts = config.rollouts,
        "Starting sweep"
    );

    let run = || {
        jobs.par_iter()
            .map(|&(c_index, trial)| {
                let outcome = run_trial(config, c_index, trial);
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                outcome
            })
            .collect::<Result<Vec<_>>>()
    };

    if config.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .context("Failed to build worker pool")?;
        pool.install(run)
    } else {
        run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::base_config;
    use rand::Rng;

    #[test]
    fn test_trial_rng_streams_differ() {
        let a: u64 = trial_rng(1, 0, 0).gen();
        let b: u64 = trial_rng(1, 0, 1).gen();
        let c: u64 = trial_rng(1, 1, 0).gen();
        let again: u64 = trial_rng(1, 0, 0).gen();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, again);
    }

    #[test]
    fn test_run_trial() {
        let config = base_config();
        let outcome = run_trial(&config, 1, 0).unwrap();

        assert!((outcome.c - 1.0).abs() < 1e-12);
        assert_eq!(outcome.num_leaves, 64);
        assert!(outcome.rank < 64);
        assert!(outcome.value <= outcome.best_value);
        assert_eq!(outcome.rank == 0, outcome.value == outcome.best_value);
        // 6 phases * 3 iterations * 3 rollouts
        assert_eq!(outcome.rollouts, 54);
        assert_eq!(outcome.c_index, 1);
        // Only the first phase backs up to the root
        assert_eq!(outcome.summary.root_visits, 9);
    }

    #[test]
    fn test_run_sweep_order_and_determinism() {
        let config = base_config();
        let first = run_sweep(&config, None).unwrap();
        let second = run_sweep(&config, None).unwrap();

        assert_eq!(first.len(), 8);
        assert_eq!(first, second);
        for (i, outcome) in first.iter().enumerate() {
            assert!((outcome.c - config.c_values[i / 4]).abs() < 1e-12);
            assert_eq!(outcome.trial, (i % 4) as u32);
        }
    }

    #[test]
    fn test_repeated_c_counts_each_trial_once() {
        let mut config = base_config();
        config.c_values = vec![1.0, 1.0];

        let outcomes = run_sweep(&config, None).unwrap();
        let points = crate::stats::summarize(&config.c_values, &outcomes);

        assert_eq!(outcomes.len(), 8);
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.trials == 4));
        assert_eq!(points.iter().map(|p| p.trials).sum::<usize>(), outcomes.len());
        assert!(outcomes[..4].iter().all(|o| o.c_index == 0));
        assert!(outcomes[4..].iter().all(|o| o.c_index == 1));
    }

    #[test]
    fn test_thread_count_does_not_change_results() {
        let mut config = base_config();
        config.threads = 1;
        let single = run_sweep(&config, None).unwrap();
        config.threads = 3;
        let multi = run_sweep(&config, None).unwrap();

        assert_eq!(single, multi);
    }

    #[test]
    fn test_search_beats_median_on_average() {
        let mut config = base_config();
        config.depth = 8;
        config.iterations = 20;
        config.c_values = vec![1.0];
        config.trials = 60;

        let outcomes = run_sweep(&config, None).unwrap();
        let mean_rank =
            outcomes.iter().map(|o| o.rank as f64).sum::<f64>() / outcomes.len() as f64;
        // A uniformly random leaf has mean rank 127.5 out of 256, and even
        // the final phase alone (best of two sibling leaves) averages about 85.
        assert!(mean_rank < 110.0, "mean rank {mean_rank}");
    }
}
