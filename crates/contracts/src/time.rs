//! Time and closed time spans.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds on the clock shared by every path.
pub type Time = f64;

/// A closed interval `[start, finish]` of time.
///
/// Unlike segment intervals, spans are closed on both ends so that two paths
/// touching at a single instant still overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    start: Time,
    finish: Time,
}

impl TimeSpan {
    /// Creates a span. `start > finish` yields an empty span.
    #[inline]
    pub fn new(start: Time, finish: Time) -> Self {
        Self { start, finish }
    }

    #[inline]
    pub fn start(&self) -> Time {
        self.start
    }

    #[inline]
    pub fn finish(&self) -> Time {
        self.finish
    }

    /// Length of the span, zero for empty or single-instant spans.
    #[inline]
    pub fn duration(&self) -> Time {
        (self.finish - self.start).max(0.0)
    }

    /// Returns `true` if no instant lies in the span.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.start <= self.finish)
    }

    #[inline]
    pub fn contains(&self, time: Time) -> bool {
        self.start <= time && time <= self.finish
    }

    /// Returns `true` if the spans share at least one instant.
    /// Touching endpoints count as overlap.
    #[inline]
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start <= other.finish && other.start <= self.finish
    }

    /// The shared part of both spans, `None` if they do not overlap.
    #[inline]
    pub fn intersection(&self, other: &TimeSpan) -> Option<TimeSpan> {
        let span = TimeSpan::new(self.start.max(other.start), self.finish.min(other.finish));
        if span.is_empty() {
            None
        } else {
            Some(span)
        }
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.finish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_spans_overlap() {
        let a = TimeSpan::new(0.0, 5.0);
        let b = TimeSpan::new(5.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let shared = a.intersection(&b).unwrap();
        assert_eq!(shared.start(), 5.0);
        assert_eq!(shared.finish(), 5.0);
        assert_eq!(shared.duration(), 0.0);
    }

    #[test]
    fn test_disjoint_spans() {
        let a = TimeSpan::new(0.0, 4.9);
        let b = TimeSpan::new(5.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_nested_intersection() {
        let outer = TimeSpan::new(0.0, 10.0);
        let inner = TimeSpan::new(2.0, 3.0);
        assert_eq!(outer.intersection(&inner), Some(inner));
        assert!(outer.contains(10.0));
        assert!(!outer.contains(10.5));
    }

    #[test]
    fn test_empty_span() {
        let span = TimeSpan::new(2.0, 1.0);
        assert!(span.is_empty());
        assert_eq!(span.duration(), 0.0);
        assert!(TimeSpan::new(f64::NAN, 1.0).is_empty());
    }
}
