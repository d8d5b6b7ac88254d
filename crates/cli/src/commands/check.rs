//! `check` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::CheckArgs;
use crate::error::CliError;
use crate::sweep::{ConflictReport, Sweep, SweepConfig, SweepStats};

/// Sweep result for JSON output
#[derive(Serialize)]
struct CheckReport<'a> {
    scenario: String,
    trajectories: usize,
    pairs_checked: u64,
    broad_phase_rejected: u64,
    duration_ms: f64,
    conflicts: &'a [ConflictReport],
}

/// Execute the `check` command
pub async fn run_check(args: &CheckArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading scenario");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load scenario from {}", args.config.display()))?;

    info!(
        trajectories = blueprint.trajectories.len(),
        waypoints = blueprint.waypoint_count(),
        "Scenario loaded"
    );

    let sweep = Sweep::new(SweepConfig {
        blueprint,
        tolerance: args.tolerance,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    });

    let stats = sweep.run().await.context("Conflict sweep failed")?;

    info!(
        pairs = stats.metrics.total_pairs,
        conflicts = stats.conflicts.len(),
        duration_secs = stats.duration.as_secs_f64(),
        "Sweep completed"
    );

    if args.json {
        print_json(args, &stats)?;
    } else {
        stats.print_summary();
    }

    if args.fail_on_conflict && !stats.conflicts.is_empty() {
        return Err(CliError::ConflictsFound {
            count: stats.conflicts.len(),
        }
        .into());
    }

    Ok(())
}

fn print_json(args: &CheckArgs, stats: &SweepStats) -> Result<()> {
    let report = CheckReport {
        scenario: args.config.display().to_string(),
        trajectories: stats.trajectories,
        pairs_checked: stats.metrics.total_pairs,
        broad_phase_rejected: stats.metrics.broad_phase_rejected,
        duration_ms: stats.duration.as_secs_f64() * 1000.0,
        conflicts: &stats.conflicts,
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}
