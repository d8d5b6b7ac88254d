//! `validate` command implementation.

use std::collections::HashMap;

use anyhow::{Context, Result};
use contracts::ScenarioBlueprint;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ScenarioSummary>,
}

#[derive(Serialize)]
struct ScenarioSummary {
    version: String,
    time_tolerance: f64,
    trajectory_count: usize,
    waypoint_count: usize,
    map_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating scenario");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Scenario validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ScenarioSummary {
                    version: format!("{:?}", blueprint.version),
                    time_tolerance: blueprint.detector.time_tolerance,
                    trajectory_count: blueprint.trajectories.len(),
                    waypoint_count: blueprint.waypoint_count(),
                    map_count: trajectories_per_map(&blueprint).len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn trajectories_per_map(blueprint: &ScenarioBlueprint) -> HashMap<&str, Vec<&str>> {
    let mut maps: HashMap<&str, Vec<&str>> = HashMap::new();
    for trajectory in &blueprint.trajectories {
        maps.entry(trajectory.map.as_str())
            .or_default()
            .push(trajectory.id.as_str());
    }
    maps
}

/// Collect scenario warnings (non-fatal issues)
fn collect_warnings(blueprint: &ScenarioBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.trajectories.len() < 2 {
        warnings.push(format!(
            "Scenario has {} trajectory(ies) - nothing to check against",
            blueprint.trajectories.len()
        ));
    }

    // Trajectories alone on their map can never conflict
    let mut lonely: Vec<_> = trajectories_per_map(blueprint)
        .into_iter()
        .filter(|(_, ids)| ids.len() == 1)
        .map(|(map, ids)| (map, ids[0]))
        .collect();
    lonely.sort();
    if blueprint.trajectories.len() >= 2 {
        for (map, id) in lonely {
            warnings.push(format!(
                "Trajectory '{}' is the only one on map '{}'",
                id, map
            ));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Scenario is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Time tolerance: {}s", summary.time_tolerance);
            println!("  Trajectories: {}", summary.trajectory_count);
            println!("  Waypoints: {}", summary.waypoint_count);
            println!("  Maps: {}", summary.map_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Scenario is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
