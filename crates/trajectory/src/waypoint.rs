//! Timed waypoint.

use contracts::{Position, Time, WaypointConfig};
use nalgebra::Vector2;

/// Robot state at an instant: where it is, how fast it moves and how much
/// room it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub time: Time,
    pub position: Position,
    pub velocity: Vector2<f64>,
    pub radius: f64,
}

impl Waypoint {
    pub fn new(time: Time, position: [f64; 2], velocity: [f64; 2], radius: f64) -> Self {
        Self {
            time,
            position: Position::new(position[0], position[1]),
            velocity: Vector2::new(velocity[0], velocity[1]),
            radius,
        }
    }

    /// A waypoint at rest.
    pub fn stopped(time: Time, position: [f64; 2], radius: f64) -> Self {
        Self::new(time, position, [0.0, 0.0], radius)
    }

    /// Describe the first problem with this waypoint, if any.
    pub(crate) fn defect(&self) -> Option<String> {
        if !self.time.is_finite() {
            return Some(format!("waypoint time must be finite, got {}", self.time));
        }
        if !(self.position.x.is_finite() && self.position.y.is_finite()) {
            return Some(format!("waypoint at t={} has a non-finite position", self.time));
        }
        if !(self.velocity.x.is_finite() && self.velocity.y.is_finite()) {
            return Some(format!("waypoint at t={} has a non-finite velocity", self.time));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Some(format!(
                "waypoint at t={} needs a finite radius >= 0, got {}",
                self.time, self.radius
            ));
        }
        None
    }
}

impl From<&WaypointConfig> for Waypoint {
    fn from(config: &WaypointConfig) -> Self {
        Self::new(
            config.t,
            [config.x, config.y],
            [config.vx, config.vy],
            config.radius,
        )
    }
}
