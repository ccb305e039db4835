//! Sweep reports.
//!
//! The per-c summary is always logged. Unless disabled it is also written
//! as CSV, and raw trial outcomes can be written as JSON for later plotting.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::stats::{SweepPoint, TrialOutcome};

/// Log one line per exploration constant.
pub fn log_summary(points: &[SweepPoint], num_leaves: usize) {
    for point in points {
        info!(
            c = point.c,
            trials = point.trials,
            average_rank = format!("{:.2}", point.average_rank),
            average_value = format!("{:.3}", point.average_value),
            average_percentile = format!("{:.2}", point.average_percentile),
            hits = point.hits,
            "Rank {:.1}/{} at c = {}",
            point.average_rank,
            num_leaves,
            point.c
        );
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Write the per-c summary as CSV with a header row.
pub fn write_csv(path: &Path, points: &[SweepPoint]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Failed to open {}", path.display()))?;
    for point in points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = points.len(), "Wrote sweep summary");
    Ok(())
}

/// Write every trial outcome as pretty-printed JSON.
pub fn write_trials_json(path: &Path, outcomes: &[TrialOutcome]) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, outcomes)?;
    writer.flush()?;
    info!(path = %path.display(), trials = outcomes.len(), "Wrote trial outcomes");
    Ok(())
}
