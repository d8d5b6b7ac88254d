//! Motion accessor traits - the path representation consumed by the detector
//!
//! The detector never looks inside a path. It only needs, per segment, a
//! position and footprint radius at any instant of the segment plus upper
//! bounds on how fast both can change.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{SurfaceId, Time, TimeSpan};

/// Planar position of a robot's reference point, in meters.
pub type Position = Point2<f64>;

/// Opaque reference to one segment of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentIndex(usize);

impl SegmentIndex {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the segment within its path's segment slice.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for SegmentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single time-bounded piece of a path.
///
/// Implementations must keep `position` and `radius` continuous on
/// `[start_time, finish_time]` and equal to the neighbouring segment's values
/// at shared boundaries. The rate bounds must hold over the whole segment;
/// the detector's no-miss guarantee is only as good as these bounds.
pub trait MotionSegment {
    fn start_time(&self) -> Time;

    fn finish_time(&self) -> Time;

    fn time_span(&self) -> TimeSpan {
        TimeSpan::new(self.start_time(), self.finish_time())
    }

    /// Position at `time`, valid for `time` within the segment's span.
    fn position(&self, time: Time) -> Position;

    /// Footprint radius at `time`, valid for `time` within the segment's span.
    fn radius(&self, time: Time) -> f64;

    /// Upper bound on the speed `|dp/dt|` over the segment.
    fn max_speed(&self) -> f64;

    /// Upper bound on `|dr/dt|` over the segment.
    fn max_radius_rate(&self) -> f64;
}

/// An ordered sequence of motion segments on a single surface.
pub trait MotionPath {
    type Segment: MotionSegment;

    fn surface_id(&self) -> &SurfaceId;

    /// Segments in strictly increasing time order.
    fn segments(&self) -> &[Self::Segment];

    /// Overall span of the path, `None` if it has no segments.
    fn time_span(&self) -> Option<TimeSpan> {
        let segments = self.segments();
        let first = segments.first()?;
        let last = segments.last()?;
        Some(TimeSpan::new(first.start_time(), last.finish_time()))
    }
}

impl<P: MotionPath + ?Sized> MotionPath for &P {
    type Segment = P::Segment;

    fn surface_id(&self) -> &SurfaceId {
        (**self).surface_id()
    }

    fn segments(&self) -> &[Self::Segment] {
        (**self).segments()
    }

    fn time_span(&self) -> Option<TimeSpan> {
        (**self).time_span()
    }
}
