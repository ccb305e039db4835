//! Sweep statistics.
//!
//! One [`TrialOutcome`] per searched tree, folded into one [`SweepPoint`] per
//! exploration constant. The rank of a trial is the position of the chosen
//! leaf among all leaves sorted best first, so 0 means the search found the
//! true maximum.

use serde::{Deserialize, Serialize};
use snowcap::TreeSummary;

/// Result of searching one tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Position of `c` in the sweep list
    pub c_index: usize,
    pub c: f64,
    pub trial: u32,
    /// Payoff of the leaf the search returned
    pub value: f64,
    /// 0 = best leaf
    pub rank: usize,
    pub best_value: f64,
    pub num_leaves: usize,
    pub rollouts: u64,
    /// Annotations left by the search
    pub summary: TreeSummary,
}

impl TrialOutcome {
    /// Percentage of leaves the chosen leaf beats or ties, 100 for the maximum.
    pub fn percentile(&self) -> f64 {
        100.0 - 100.0 * self.rank as f64 / self.num_leaves as f64
    }
}

/// Aggregated outcomes for one exploration constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub c: f64,
    pub trials: usize,
    pub average_rank: f64,
    pub average_value: f64,
    pub average_percentile: f64,
    pub best_rank: usize,
    pub worst_rank: usize,
    /// Trials that returned the true maximum
    pub hits: usize,
}

impl SweepPoint {
    /// Fold the outcomes of one exploration constant.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_outcomes(c: f64, outcomes: &[TrialOutcome]) -> Option<Self> {
        if outcomes.is_empty() {
            return None;
        }

        let n = outcomes.len() as f64;
        let average_rank = outcomes.iter().map(|o| o.rank as f64).sum::<f64>() / n;
        let average_value = outcomes.iter().map(|o| o.value).sum::<f64>() / n;
        let num_leaves = outcomes[0].num_leaves as f64;

        Some(Self {
            c,
            trials: outcomes.len(),
            average_rank,
            average_value,
            average_percentile: 100.0 - average_rank / (num_leaves / 100.0),
            best_rank: outcomes.iter().map(|o| o.rank).min().unwrap_or(0),
            worst_rank: outcomes.iter().map(|o| o.rank).max().unwrap_or(0),
            hits: outcomes.iter().filter(|o| o.rank == 0).count(),
        })
    }
}

/// One point per entry of `c_values`, in order.
///
/// Outcomes are grouped by their sweep position, so a constant listed twice
/// yields two independent points.
pub fn summarize(c_values: &[f64], outcomes: &[TrialOutcome]) -> Vec<SweepPoint> {
    c_values
        .iter()
        .enumerate()
        .filter_map(|(c_index, &c)| {
            let group: Vec<TrialOutcome> = outcomes
                .iter()
                .filter(|o| o.c_index == c_index)
                .cloned()
                .collect();
            SweepPoint::from_outcomes(c, &group)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> TreeSummary {
        TreeSummary {
            total_nodes: 399,
            visited_nodes: 12,
            root_visits: 9,
            root_value: 60.0,
            max_visited_depth: 7,
        }
    }

    fn outcome(c_index: usize, c: f64, trial: u32, value: f64, rank: usize) -> TrialOutcome {
        TrialOutcome {
            c_index,
            c,
            trial,
            value,
            rank,
            best_value: 99.0,
            num_leaves: 200,
            rollouts: 10,
            summary: summary(),
        }
    }

    #[test]
    fn test_percentile() {
        assert!((outcome(0, 1.0, 0, 99.0, 0).percentile() - 100.0).abs() < 1e-12);
        assert!((outcome(0, 1.0, 0, 50.0, 100).percentile() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_outcomes() {
        let outcomes = vec![
            outcome(0, 0.5, 0, 99.0, 0),
            outcome(0, 0.5, 1, 90.0, 10),
            outcome(0, 0.5, 2, 80.0, 20),
        ];
        let point = SweepPoint::from_outcomes(0.5, &outcomes).unwrap();

        assert_eq!(point.trials, 3);
        assert!((point.average_rank - 10.0).abs() < 1e-12);
        assert!((point.average_value - 89.666_666_666_666_67).abs() < 1e-9);
        // 100 - 10 / (200 / 100)
        assert!((point.average_percentile - 95.0).abs() < 1e-12);
        assert_eq!(point.best_rank, 0);
        assert_eq!(point.worst_rank, 20);
        assert_eq!(point.hits, 1);
    }

    #[test]
    fn test_from_empty_outcomes() {
        assert!(SweepPoint::from_outcomes(1.0, &[]).is_none());
    }

    #[test]
    fn test_summarize_groups_by_c_in_sweep_order() {
        let outcomes = vec![
            outcome(2, 2.0, 0, 70.0, 30),
            outcome(0, 0.0, 0, 95.0, 5),
            outcome(2, 2.0, 1, 60.0, 40),
        ];
        let points = summarize(&[0.0, 1.0, 2.0], &outcomes);

        assert_eq!(points.len(), 2);
        assert!((points[0].c - 0.0).abs() < 1e-12);
        assert_eq!(points[0].trials, 1);
        assert!((points[1].c - 2.0).abs() < 1e-12);
        assert_eq!(points[1].trials, 2);
        assert!((points[1].average_rank - 35.0).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_keeps_repeated_c_apart() {
        let outcomes = vec![
            outcome(0, 1.0, 0, 90.0, 10),
            outcome(0, 1.0, 1, 80.0, 20),
            outcome(1, 1.0, 0, 99.0, 0),
            outcome(1, 1.0, 1, 97.0, 2),
        ];
        let points = summarize(&[1.0, 1.0], &outcomes);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].trials, 2);
        assert_eq!(points[1].trials, 2);
        assert!((points[0].average_rank - 15.0).abs() < 1e-12);
        assert!((points[1].average_rank - 1.0).abs() < 1e-12);
    }
}
