//! Cubic Hermite motion segment.
//!
//! Position follows the cubic Hermite curve through both waypoints' positions
//! and velocities; the footprint radius is interpolated linearly.
//!
//! With `s = (t - t0) / Δt` the curve is `p(s) = ((a·s + b)·s + c)·s + p0` where
//! - `a = 2(p0 - p1) + Δt(v0 + v1)`
//! - `b = 3(p1 - p0) - Δt(2v0 + v1)`
//! - `c = Δt·v0`

use contracts::{MotionSegment, Position, Time};
use nalgebra::Vector2;

use crate::Waypoint;

/// Motion between two consecutive waypoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Waypoint,
    finish: Waypoint,
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    max_speed: f64,
    max_radius_rate: f64,
}

impl Segment {
    /// Build the segment. Callers guarantee `start.time < finish.time`.
    pub(crate) fn between(start: Waypoint, finish: Waypoint) -> Self {
        let dt = finish.time - start.time;
        let (p0, p1) = (start.position, finish.position);
        let (v0, v1) = (start.velocity, finish.velocity);

        let a = (p0 - p1) * 2.0 + (v0 + v1) * dt;
        let b = (p1 - p0) * 3.0 - (v0 * 2.0 + v1) * dt;
        let c = v0 * dt;

        Self {
            start,
            finish,
            a,
            b,
            c,
            max_speed: hull_speed_bound(p0, p1, v0, v1, dt),
            max_radius_rate: (finish.radius - start.radius).abs() / dt,
        }
    }

    pub fn start(&self) -> &Waypoint {
        &self.start
    }

    pub fn finish(&self) -> &Waypoint {
        &self.finish
    }

    pub fn duration(&self) -> Time {
        self.finish.time - self.start.time
    }

    /// Velocity at `time` (clamped to the segment).
    pub fn velocity(&self, time: Time) -> Vector2<f64> {
        let s = self.normalized(time);
        (self.a * (3.0 * s) + self.b * 2.0) * s / self.duration() + self.c / self.duration()
    }

    fn normalized(&self, time: Time) -> f64 {
        ((time - self.start.time) / self.duration()).clamp(0.0, 1.0)
    }
}

impl MotionSegment for Segment {
    fn start_time(&self) -> Time {
        self.start.time
    }

    fn finish_time(&self) -> Time {
        self.finish.time
    }

    fn position(&self, time: Time) -> Position {
        let s = self.normalized(time);
        self.start.position + ((self.a * s + self.b) * s + self.c) * s
    }

    fn radius(&self, time: Time) -> f64 {
        let s = self.normalized(time);
        self.start.radius + (self.finish.radius - self.start.radius) * s
    }

    fn max_speed(&self) -> f64 {
        self.max_speed
    }

    fn max_radius_rate(&self) -> f64 {
        self.max_radius_rate
    }
}

/// Speed bound from the control points of the velocity curve.
///
/// The derivative of a cubic Bézier is a quadratic Bézier whose control
/// points are `v0`, `3(p1 - p0)/Δt - v0 - v1` and `v1`. The curve stays in
/// their convex hull, so the largest control-point norm bounds the speed.
fn hull_speed_bound(p0: Position, p1: Position, v0: Vector2<f64>, v1: Vector2<f64>, dt: f64) -> f64 {
    let middle = (p1 - p0) * (3.0 / dt) - v0 - v1;
    v0.norm().max(middle.norm()).max(v1.norm())
}
