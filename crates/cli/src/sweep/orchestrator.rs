//! Sweep orchestrator - builds trajectories and checks every pair.
//!
//! Each unordered pair is checked on tokio's blocking pool; the detector is
//! CPU-bound and shares nothing mutable between pairs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use conflict_engine::{ConflictResult, DetectConflict};
use contracts::ScenarioBlueprint;
use observability::{record_detection, record_scenario_size, DetectionRecord};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use trajectory::Trajectory;

use super::{ConflictReport, SweepStats};
use crate::error::CliError;

/// Sweep configuration
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// The scenario blueprint
    pub blueprint: ScenarioBlueprint,

    /// Detector tolerance override (None = use the scenario's)
    pub tolerance: Option<f64>,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// A named trajectory
#[derive(Debug, Clone)]
pub struct Robot {
    pub id: String,
    pub trajectory: Trajectory,
}

/// Outcome of checking one pair
#[derive(Debug)]
struct PairOutcome {
    a: usize,
    b: usize,
    passed_broad_phase: bool,
    result: ConflictResult,
    elapsed: Duration,
}

/// Main sweep orchestrator
pub struct Sweep {
    config: SweepConfig,
}

impl Sweep {
    /// Create a new sweep with the given configuration
    pub fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    /// Run the sweep to completion
    pub async fn run(self) -> Result<SweepStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        let mut detector_config = blueprint.detector;
        if let Some(tolerance) = self.config.tolerance {
            info!(tolerance, "Overriding detector tolerance from CLI");
            detector_config.time_tolerance = tolerance;
        }
        let detector =
            DetectConflict::new(detector_config).context("Invalid detector configuration")?;

        let robots = Arc::new(build_robots(blueprint)?);
        let pairs = unordered_pairs(robots.len());
        record_scenario_size(robots.len(), pairs.len());

        info!(
            trajectories = robots.len(),
            pairs = pairs.len(),
            tolerance = detector.config().time_tolerance,
            "Checking trajectory pairs"
        );

        let mut tasks = JoinSet::new();
        for (a, b) in pairs {
            let robots = Arc::clone(&robots);
            let detector = detector.clone();
            tasks.spawn_blocking(move || check_pair(&detector, &robots, a, b));
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(|e| CliError::sweep(e.to_string()))?;
            outcomes.push(outcome);
        }
        outcomes.sort_by_key(|o| (o.a, o.b));

        let mut stats = SweepStats {
            trajectories: robots.len(),
            ..Default::default()
        };

        for outcome in &outcomes {
            let (robot_a, robot_b) = (&robots[outcome.a], &robots[outcome.b]);
            let record = DetectionRecord {
                map: robot_a.trajectory.map(),
                passed_broad_phase: outcome.passed_broad_phase,
                result: &outcome.result,
                elapsed_ms: outcome.elapsed.as_secs_f64() * 1000.0,
            };
            record_detection(&record);
            stats.metrics.update(&record);

            if let Ok(conflict) = outcome.result.data() {
                warn!(
                    a = %robot_a.id,
                    b = %robot_b.id,
                    time = conflict.time(),
                    "Conflict detected"
                );
                stats
                    .conflicts
                    .push(ConflictReport::new(robot_a, robot_b, conflict));
            }
        }

        stats.duration = start_time.elapsed();
        Ok(stats)
    }
}

/// Build every trajectory in the scenario, in declaration order
fn build_robots(blueprint: &ScenarioBlueprint) -> Result<Vec<Robot>> {
    blueprint
        .trajectories
        .iter()
        .map(|config| {
            let trajectory = Trajectory::from_config(config)
                .map_err(|e| CliError::trajectory_build(&config.id, e.to_string()))?;
            Ok(Robot {
                id: config.id.clone(),
                trajectory,
            })
        })
        .collect()
}

/// All index pairs `(i, j)` with `i < j`
fn unordered_pairs(count: usize) -> Vec<(usize, usize)> {
    (0..count)
        .flat_map(|i| (i + 1..count).map(move |j| (i, j)))
        .collect()
}

fn check_pair(detector: &DetectConflict, robots: &[Robot], a: usize, b: usize) -> PairOutcome {
    let started = Instant::now();
    let (ta, tb) = (&robots[a].trajectory, &robots[b].trajectory);

    let passed_broad_phase = DetectConflict::broad_phase(ta, tb);
    let result = detector.between(ta, tb);
    let elapsed = started.elapsed();

    debug!(
        a = %robots[a].id,
        b = %robots[b].id,
        passed_broad_phase,
        conflict = result.has_conflict(),
        elapsed_us = elapsed.as_micros() as u64,
        "Pair checked"
    );

    PairOutcome {
        a,
        b,
        passed_broad_phase,
        result,
        elapsed,
    }
}
