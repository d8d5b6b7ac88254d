//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{ScenarioBlueprint, TrajectoryConfig, WaypointConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::CliError;

/// Scenario info for JSON output
#[derive(Serialize)]
struct ScenarioInfo {
    version: String,
    detector: DetectorInfo,
    trajectories: Vec<TrajectoryInfo>,
}

#[derive(Serialize)]
struct DetectorInfo {
    time_tolerance: f64,
}

#[derive(Serialize)]
struct TrajectoryInfo {
    id: String,
    map: String,
    waypoint_count: usize,
    start_time: Option<f64>,
    finish_time: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    waypoints: Vec<WaypointConfig>,
}

impl TrajectoryInfo {
    fn new(trajectory: &TrajectoryConfig, with_waypoints: bool) -> Self {
        Self {
            id: trajectory.id.clone(),
            map: trajectory.map.to_string(),
            waypoint_count: trajectory.waypoints.len(),
            start_time: trajectory.waypoints.first().map(|w| w.t),
            finish_time: trajectory.waypoints.last().map(|w| w.t),
            waypoints: if with_waypoints {
                trajectory.waypoints.clone()
            } else {
                Vec::new()
            },
        }
    }
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading scenario info");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load scenario from {}", args.config.display()))?;

    if args.json {
        let info = build_scenario_info(&blueprint, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize scenario info")?;
        println!("{}", json);
    } else {
        print_scenario_info(&blueprint, args);
    }

    Ok(())
}

fn build_scenario_info(blueprint: &ScenarioBlueprint, args: &InfoArgs) -> ScenarioInfo {
    ScenarioInfo {
        version: format!("{:?}", blueprint.version),
        detector: DetectorInfo {
            time_tolerance: blueprint.detector.time_tolerance,
        },
        trajectories: blueprint
            .trajectories
            .iter()
            .map(|t| TrajectoryInfo::new(t, args.waypoints))
            .collect(),
    }
}

fn print_scenario_info(blueprint: &ScenarioBlueprint, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Fleet Conflict Scenario                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("⚙️  Detector");
    println!("   ├─ Version: {:?}", blueprint.version);
    println!("   └─ Time tolerance: {}s", blueprint.detector.time_tolerance);

    println!("\n🤖 Trajectories ({})", blueprint.trajectories.len());
    for (i, trajectory) in blueprint.trajectories.iter().enumerate() {
        let is_last = i == blueprint.trajectories.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };
        let info = TrajectoryInfo::new(trajectory, args.waypoints);

        let span = match (info.start_time, info.finish_time) {
            (Some(start), Some(finish)) => format!("t=[{start}, {finish}]"),
            _ => "no waypoints".to_string(),
        };
        println!(
            "   {} {} on {} - {} waypoints, {}",
            prefix, info.id, info.map, info.waypoint_count, span
        );

        for (j, waypoint) in info.waypoints.iter().enumerate() {
            let waypoint_prefix = if j == info.waypoints.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            println!(
                "   {}  {} t={} pos=({}, {}) vel=({}, {}) r={}",
                child_prefix,
                waypoint_prefix,
                waypoint.t,
                waypoint.x,
                waypoint.y,
                waypoint.vx,
                waypoint.vy,
                waypoint.radius
            );
        }
    }

    println!();
}
