//! # Trajectory
//!
//! Concrete motion representation for fleet itineraries.
//!
//! Responsibilities:
//! - Store timed waypoints on a single map
//! - Join consecutive waypoints with cubic Hermite segments
//! - Provide conservative speed / radius-rate bounds per segment
//! - Implement the `MotionPath` contract consumed by the conflict detector
//!
//! ## Usage
//!
//! ```
//! use trajectory::{Trajectory, Waypoint};
//!
//! let trajectory = Trajectory::from_waypoints(
//!     "L1",
//!     [
//!         Waypoint::new(0.0, [0.0, 0.0], [1.0, 0.0], 0.5),
//!         Waypoint::new(10.0, [10.0, 0.0], [1.0, 0.0], 0.5),
//!     ],
//! )
//! .unwrap();
//!
//! let p = trajectory.position_at(5.0).unwrap();
//! assert!((p.x - 5.0).abs() < 1e-9);
//! ```

mod segment;
mod trajectory;
mod waypoint;

pub use contracts::{MotionPath, MotionSegment, Position, SegmentIndex, SurfaceId};
pub use segment::Segment;
pub use trajectory::Trajectory;
pub use waypoint::Waypoint;
