//! ScenarioBlueprint - Config Loader output
//!
//! Describes a set of planned trajectories to check against each other,
//! together with the detector settings to check them with.

use serde::{Deserialize, Serialize};

use crate::{DetectorConfig, SurfaceId, Time};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete scenario blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Detector settings
    #[serde(default)]
    pub detector: DetectorConfig,

    /// Planned trajectories, checked pairwise
    pub trajectories: Vec<TrajectoryConfig>,
}

impl ScenarioBlueprint {
    /// Total waypoint count across all trajectories
    pub fn waypoint_count(&self) -> usize {
        self.trajectories.iter().map(|t| t.waypoints.len()).sum()
    }
}

/// A single robot's planned trajectory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    /// Unique identifier (usually the robot or itinerary name)
    pub id: String,

    /// Operating surface the trajectory is planned on
    pub map: SurfaceId,

    /// Timed waypoints, strictly increasing in time
    pub waypoints: Vec<WaypointConfig>,
}

/// Timed waypoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaypointConfig {
    /// Time (seconds)
    pub t: Time,

    /// Position (meters)
    pub x: f64,
    pub y: f64,

    /// Velocity (m/s), zero when omitted
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,

    /// Footprint radius (meters), must be >= 0
    pub radius: f64,
}
