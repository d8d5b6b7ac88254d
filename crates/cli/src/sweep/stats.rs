//! Sweep statistics and conflict reports.

use std::time::Duration;

use contracts::ConflictData;
use observability::DetectionMetricsAggregator;
use serde::Serialize;

use super::Robot;

/// One detected conflict between two named trajectories
#[derive(Debug, Clone, Serialize)]
pub struct ConflictReport {
    pub a: String,
    pub b: String,
    pub map: String,
    /// First contact time (seconds)
    pub time: f64,
    pub segment_a: usize,
    pub segment_b: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_a: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_b: Option<[f64; 2]>,
}

impl ConflictReport {
    pub fn new(a: &Robot, b: &Robot, conflict: &ConflictData) -> Self {
        let (segment_a, segment_b) = conflict.segments();
        let position = |robot: &Robot| {
            robot
                .trajectory
                .position_at(conflict.time())
                .map(|p| [p.x, p.y])
        };

        Self {
            a: a.id.clone(),
            b: b.id.clone(),
            map: a.trajectory.map().to_string(),
            time: conflict.time(),
            segment_a: segment_a.get(),
            segment_b: segment_b.get(),
            position_a: position(a),
            position_b: position(b),
        }
    }
}

/// Statistics from a sweep run
#[derive(Debug, Clone, Default)]
pub struct SweepStats {
    /// Number of trajectories in the scenario
    pub trajectories: usize,

    /// Conflicts in pair order
    pub conflicts: Vec<ConflictReport>,

    /// Total duration of the sweep
    pub duration: Duration,

    /// Detection metrics aggregator
    pub metrics: DetectionMetricsAggregator,
}

impl SweepStats {
    /// Pairs checked per second
    pub fn pairs_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.metrics.total_pairs as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Conflict Sweep Results                    ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        let summary = self.metrics.summary();

        println!("📊 Overview");
        println!("   ├─ Duration: {:.3}s", self.duration.as_secs_f64());
        println!("   ├─ Trajectories: {}", self.trajectories);
        println!("   ├─ Pairs checked: {}", summary.total_pairs);
        println!(
            "   ├─ Rejected by broad phase: {} ({:.2}%)",
            summary.broad_phase_rejected, summary.rejection_rate
        );
        println!("   ├─ Pairs/s: {:.2}", self.pairs_per_sec());
        println!("   └─ Check time (ms): {}", summary.check_time_ms);

        if self.conflicts.is_empty() {
            println!("\n✓ No conflicts");
        } else {
            println!("\n⚠️  Conflicts ({})", self.conflicts.len());
            for (i, conflict) in self.conflicts.iter().enumerate() {
                let prefix = if i == self.conflicts.len() - 1 {
                    "└─"
                } else {
                    "├─"
                };
                println!(
                    "   {} {} × {} on {} at t={:.4}s (segments #{} / #{}){}",
                    prefix,
                    conflict.a,
                    conflict.b,
                    conflict.map,
                    conflict.time,
                    conflict.segment_a,
                    conflict.segment_b,
                    format_positions(conflict)
                );
            }
        }

        println!();
    }
}

fn format_positions(conflict: &ConflictReport) -> String {
    match (conflict.position_a, conflict.position_b) {
        (Some(a), Some(b)) => format!(
            " at ({:.2}, {:.2}) / ({:.2}, {:.2})",
            a[0], a[1], b[0], b[1]
        ),
        _ => String::new(),
    }
}
