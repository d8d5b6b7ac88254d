//! Trajectory - timed waypoints on one map, joined by cubic segments.

use contracts::{
    ConflictError, MotionPath, MotionSegment, Position, SegmentIndex, SurfaceId, Time,
    TrajectoryConfig,
};
use nalgebra::Vector2;
use tracing::{debug, instrument};

use crate::{Segment, Waypoint};

/// A robot's planned motion on a single map.
///
/// Waypoints are kept sorted by time with no duplicates. Each pair of
/// consecutive waypoints forms one [`Segment`], so a trajectory with fewer
/// than two waypoints has no segments and no time span.
#[derive(Debug, Clone)]
pub struct Trajectory {
    map: SurfaceId,
    waypoints: Vec<Waypoint>,
    segments: Vec<Segment>,
}

impl Trajectory {
    /// Create an empty trajectory on `map`.
    pub fn new(map: impl Into<SurfaceId>) -> Self {
        Self {
            map: map.into(),
            waypoints: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Build a trajectory from waypoints in any order.
    ///
    /// # Errors
    /// `ConflictError::InvalidTrajectory` on the first malformed waypoint in
    /// input order, or on two waypoints sharing a time.
    pub fn from_waypoints(
        map: impl Into<SurfaceId>,
        waypoints: impl IntoIterator<Item = Waypoint>,
    ) -> Result<Self, ConflictError> {
        let map = map.into();
        let mut waypoints: Vec<Waypoint> = waypoints.into_iter().collect();
        if let Some(defect) = waypoints.iter().find_map(Waypoint::defect) {
            return Err(ConflictError::invalid_trajectory(&map, defect));
        }

        waypoints.sort_by(|a, b| a.time.total_cmp(&b.time));
        if let Some(pair) = waypoints.windows(2).find(|pair| pair[0].time == pair[1].time) {
            return Err(duplicate_time(&map, pair[1].time));
        }

        let segments = waypoints
            .windows(2)
            .map(|pair| Segment::between(pair[0], pair[1]))
            .collect();
        Ok(Self {
            map,
            waypoints,
            segments,
        })
    }

    /// Build a trajectory from scenario configuration.
    #[instrument(
        name = "trajectory_from_config",
        level = "debug",
        skip(config),
        fields(id = %config.id, map = %config.map, waypoints = config.waypoints.len())
    )]
    pub fn from_config(config: &TrajectoryConfig) -> Result<Self, ConflictError> {
        let trajectory =
            Self::from_waypoints(config.map.clone(), config.waypoints.iter().map(Waypoint::from))?;
        debug!(segments = trajectory.segment_count(), "trajectory built");
        Ok(trajectory)
    }

    /// Insert a waypoint, keeping time order.
    ///
    /// # Errors
    /// `ConflictError::InvalidTrajectory` if the waypoint has non-finite
    /// values, a negative radius, or shares its time with an existing waypoint.
    pub fn insert(&mut self, waypoint: Waypoint) -> Result<(), ConflictError> {
        if let Some(defect) = waypoint.defect() {
            return Err(ConflictError::invalid_trajectory(&self.map, defect));
        }

        let index = self.waypoints.partition_point(|w| w.time < waypoint.time);
        if self
            .waypoints
            .get(index)
            .is_some_and(|w| w.time == waypoint.time)
        {
            return Err(duplicate_time(&self.map, waypoint.time));
        }

        self.waypoints.insert(index, waypoint);
        self.splice_segments(index);
        Ok(())
    }

    /// Rebuild only the segments touching the waypoint at `index`.
    fn splice_segments(&mut self, index: usize) {
        let waypoints = &self.waypoints;
        let current = waypoints[index];
        let before = index
            .checked_sub(1)
            .map(|prev| Segment::between(waypoints[prev], current));
        let after = waypoints
            .get(index + 1)
            .map(|next| Segment::between(current, *next));

        match (before, after) {
            (Some(before), Some(after)) => {
                self.segments[index - 1] = before;
                self.segments.insert(index, after);
            }
            (Some(before), None) => self.segments.push(before),
            (None, Some(after)) => self.segments.insert(0, after),
            (None, None) => {}
        }
    }

    pub fn map(&self) -> &SurfaceId {
        &self.map
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segment(&self, index: SegmentIndex) -> Option<&Segment> {
        self.segments.get(index.get())
    }

    pub fn start_time(&self) -> Option<Time> {
        self.segments.first().map(|s| s.start_time())
    }

    pub fn finish_time(&self) -> Option<Time> {
        self.segments.last().map(|s| s.finish_time())
    }

    /// Duration covered by the segments, zero without segments.
    pub fn duration(&self) -> Time {
        match (self.start_time(), self.finish_time()) {
            (Some(start), Some(finish)) => finish - start,
            _ => 0.0,
        }
    }

    /// Find the segment active at `time`.
    ///
    /// Segments cover `[t0, t1)`; the last one also covers its finish time.
    pub fn segment_at(&self, time: Time) -> Option<(SegmentIndex, &Segment)> {
        let first = self.segments.first()?;
        if time < first.start_time() {
            return None;
        }

        let index = self.segments.partition_point(|s| s.finish_time() <= time);
        if let Some(segment) = self.segments.get(index) {
            return Some((SegmentIndex::new(index), segment));
        }

        let last = index - 1;
        (time == self.segments[last].finish_time())
            .then(|| (SegmentIndex::new(last), &self.segments[last]))
    }

    pub fn position_at(&self, time: Time) -> Option<Position> {
        self.segment_at(time).map(|(_, s)| s.position(time))
    }

    pub fn velocity_at(&self, time: Time) -> Option<Vector2<f64>> {
        self.segment_at(time).map(|(_, s)| s.velocity(time))
    }

    pub fn radius_at(&self, time: Time) -> Option<f64> {
        self.segment_at(time).map(|(_, s)| s.radius(time))
    }
}

fn duplicate_time(map: &SurfaceId, time: Time) -> ConflictError {
    ConflictError::invalid_trajectory(map, format!("a waypoint already exists at t={time}"))
}

impl MotionPath for Trajectory {
    type Segment = Segment;

    fn surface_id(&self) -> &SurfaceId {
        &self.map
    }

    fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::WaypointConfig;

    fn line() -> Trajectory {
        Trajectory::from_waypoints(
            "L1",
            [
                Waypoint::new(0.0, [0.0, 0.0], [1.0, 0.0], 0.5),
                Waypoint::new(5.0, [5.0, 0.0], [1.0, 0.0], 0.5),
                Waypoint::new(10.0, [10.0, 0.0], [1.0, 0.0], 0.5),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_segments_follow_waypoints() {
        let trajectory = line();
        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.segment_count(), 2);
        assert_eq!(trajectory.start_time(), Some(0.0));
        assert_eq!(trajectory.finish_time(), Some(10.0));
        assert_eq!(trajectory.duration(), 10.0);
        assert_eq!(
            trajectory.time_span(),
            Some(contracts::TimeSpan::new(0.0, 10.0))
        );
    }

    #[test]
    fn test_insert_out_of_order() {
        let trajectory = Trajectory::from_waypoints(
            "L1",
            [
                Waypoint::stopped(10.0, [1.0, 0.0], 0.5),
                Waypoint::stopped(0.0, [0.0, 0.0], 0.5),
                Waypoint::stopped(5.0, [0.5, 0.0], 0.5),
            ],
        )
        .unwrap();
        let times: Vec<_> = trajectory.waypoints().iter().map(|w| w.time).collect();
        assert_eq!(times, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_insert_matches_bulk_build() {
        let waypoints = [
            Waypoint::new(0.0, [0.0, 0.0], [1.0, 0.0], 0.5),
            Waypoint::new(2.0, [2.0, 1.0], [0.0, 1.0], 0.6),
            Waypoint::new(5.0, [4.0, 3.0], [1.0, 1.0], 0.4),
            Waypoint::stopped(7.5, [6.0, 3.0], 0.5),
            Waypoint::new(9.0, [7.0, 2.0], [0.5, -1.0], 0.5),
        ];
        let bulk = Trajectory::from_waypoints("L1", waypoints).unwrap();

        // Middle first, then both ends, then the gaps.
        let mut incremental = Trajectory::new("L1");
        for i in [2, 0, 4, 1, 3] {
            incremental.insert(waypoints[i]).unwrap();
        }
        assert_eq!(incremental.waypoints(), bulk.waypoints());
        assert_eq!(incremental.segments(), bulk.segments());
        assert_eq!(bulk.segment_count(), 4);
    }

    #[test]
    fn test_bulk_build_rejects_duplicate_time() {
        let err = Trajectory::from_waypoints(
            "L1",
            [
                Waypoint::stopped(5.0, [0.0, 0.0], 0.5),
                Waypoint::stopped(0.0, [0.0, 0.0], 0.5),
                Waypoint::stopped(5.0, [1.0, 0.0], 0.5),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("already exists at t=5"), "got {err}");
    }

    #[test]
    fn test_rejects_duplicate_time() {
        let mut trajectory = line();
        let err = trajectory
            .insert(Waypoint::stopped(5.0, [3.0, 3.0], 0.5))
            .unwrap_err();
        assert!(matches!(err, ConflictError::InvalidTrajectory { .. }));
        assert!(err.to_string().contains("already exists"));
        assert_eq!(trajectory.len(), 3);
    }

    #[test]
    fn test_rejects_bad_waypoint() {
        let err = Trajectory::from_waypoints("L1", [Waypoint::stopped(0.0, [0.0, 0.0], -1.0)])
            .unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn test_single_waypoint_has_no_segments() {
        let trajectory =
            Trajectory::from_waypoints("L1", [Waypoint::stopped(0.0, [0.0, 0.0], 0.5)]).unwrap();
        assert_eq!(trajectory.segment_count(), 0);
        assert!(trajectory.time_span().is_none());
        assert!(trajectory.position_at(0.0).is_none());
        assert_eq!(trajectory.duration(), 0.0);
    }

    #[test]
    fn test_segment_lookup_boundaries() {
        let trajectory = line();
        assert_eq!(trajectory.segment_at(0.0).unwrap().0, SegmentIndex::new(0));
        assert_eq!(trajectory.segment_at(4.999).unwrap().0, SegmentIndex::new(0));
        assert_eq!(trajectory.segment_at(5.0).unwrap().0, SegmentIndex::new(1));
        assert_eq!(trajectory.segment_at(10.0).unwrap().0, SegmentIndex::new(1));
        assert!(trajectory.segment_at(-0.1).is_none());
        assert!(trajectory.segment_at(10.1).is_none());
    }

    #[test]
    fn test_queries() {
        let trajectory = line();
        let p = trajectory.position_at(7.5).unwrap();
        assert!((p - Position::new(7.5, 0.0)).norm() < 1e-9);
        let v = trajectory.velocity_at(2.0).unwrap();
        assert!((v - Vector2::new(1.0, 0.0)).norm() < 1e-9);
        assert_eq!(trajectory.radius_at(3.0), Some(0.5));
    }

    #[test]
    fn test_from_config() {
        let config = TrajectoryConfig {
            id: "robot_1".into(),
            map: "L2".into(),
            waypoints: vec![
                WaypointConfig {
                    t: 0.0,
                    x: 0.0,
                    y: 0.0,
                    vx: 0.0,
                    vy: 0.0,
                    radius: 0.3,
                },
                WaypointConfig {
                    t: 4.0,
                    x: 2.0,
                    y: 0.0,
                    vx: 0.0,
                    vy: 0.0,
                    radius: 0.3,
                },
            ],
        };
        let trajectory = Trajectory::from_config(&config).unwrap();
        assert_eq!(trajectory.map(), &SurfaceId::from("L2"));
        assert_eq!(trajectory.segment_count(), 1);
    }
}
