//! Conservative advancement for a single pair of segments.
//!
//! Finds the first instant in a window at which the separation
//!
//! `d(t) = |p_a(t) - p_b(t)| - (r_a(t) + r_b(t))`
//!
//! drops to zero or below. With `L` the sum of both segments' speed and
//! radius-rate bounds, `|d'(t)| <= L`, so from a sample `d(t) > 0` no contact
//! can happen before `t + d(t)/L`. The cursor always jumps by that safe step.
//!
//! Once the safe step falls below the tolerance ε the cursor also samples
//! `t + ε` ahead. A non-positive sample there brackets a real contact, which
//! bisection then localizes to within ε. The tolerance never turns a positive
//! clearance into a contact: only a safe step below [`TIME_RESOLUTION`]
//! (relative to `|t|`) ends the search early, meaning the clearance is below
//! what `f64` time steps can still resolve.

use contracts::{MotionSegment, Time, TimeSpan};

/// Smallest step the cursor takes, relative to `max(|t|, 1)`.
pub(crate) const TIME_RESOLUTION: f64 = 1e-9;

/// Outcome of searching one segment pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Advancement {
    /// Separation stays positive over the whole window
    Clear { samples: u64 },
    /// First contact found
    Contact {
        time: Time,
        samples: u64,
        /// Clearance fell below the time resolution instead of sampling `<= 0`
        conservative: bool,
    },
}

impl Advancement {
    pub(crate) fn samples(&self) -> u64 {
        match *self {
            Advancement::Clear { samples } | Advancement::Contact { samples, .. } => samples,
        }
    }
}

/// Conservative advancement search with bisection refinement
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConservativeAdvancement {
    /// Localization tolerance ε (seconds)
    tolerance: f64,
}

impl ConservativeAdvancement {
    pub(crate) fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Search `window` for the first instant the two footprints touch.
    ///
    /// `window` must lie within both segments' spans.
    pub(crate) fn search<A, B>(&self, a: &A, b: &B, window: TimeSpan) -> Advancement
    where
        A: MotionSegment + ?Sized,
        B: MotionSegment + ?Sized,
    {
        let separation = |t: Time| separation(a, b, t);
        let lipschitz = rate_bound(a, b);
        let end = window.finish();

        let mut samples = 1;
        let mut t = window.start();
        let mut d = separation(t);

        if d <= 0.0 {
            return Advancement::Contact {
                time: t,
                samples,
                conservative: false,
            };
        }

        // Neither footprint moves or grows: the first sample decides.
        if lipschitz == 0.0 {
            return Advancement::Clear { samples };
        }

        while t < end {
            let safe_step = d / lipschitz;

            if !(safe_step >= TIME_RESOLUTION * t.abs().max(1.0)) {
                // Touching to within float resolution, or a non-finite sample.
                return Advancement::Contact {
                    time: t,
                    samples,
                    conservative: true,
                };
            }

            if safe_step < self.tolerance {
                let ahead = (t + self.tolerance).min(end);
                samples += 1;
                if separation(ahead) <= 0.0 {
                    let (time, refined) = self.bisect(&separation, t, ahead);
                    return Advancement::Contact {
                        time,
                        samples: samples + refined,
                        conservative: false,
                    };
                }
            }

            let next = (t + safe_step).min(end);
            if !(next > t) {
                // Step lost to rounding; no further progress is provable.
                return Advancement::Contact {
                    time: t,
                    samples,
                    conservative: true,
                };
            }

            let d_next = separation(next);
            samples += 1;

            if d_next <= 0.0 {
                let (time, refined) = self.bisect(&separation, t, next);
                return Advancement::Contact {
                    time,
                    samples: samples + refined,
                    conservative: false,
                };
            }

            t = next;
            d = d_next;
        }

        Advancement::Clear { samples }
    }

    /// Shrink `[lo, hi]` with `d(lo) > 0`, `d(hi) <= 0` until it is no wider
    /// than the tolerance. Returns `hi` and the number of extra samples.
    fn bisect(
        &self,
        separation: &impl Fn(Time) -> f64,
        mut lo: Time,
        mut hi: Time,
    ) -> (Time, u64) {
        let mut samples = 0;
        while hi - lo > self.tolerance {
            let mid = lo + 0.5 * (hi - lo);
            if !(mid > lo && mid < hi) {
                break;
            }
            samples += 1;
            if separation(mid) <= 0.0 {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        (hi, samples)
    }
}

/// Signed clearance between the two footprints at `time`.
fn separation<A, B>(a: &A, b: &B, time: Time) -> f64
where
    A: MotionSegment + ?Sized,
    B: MotionSegment + ?Sized,
{
    let distance = nalgebra::distance(&a.position(time), &b.position(time));
    distance - (a.radius(time) + b.radius(time))
}

/// Bound on `|d'(t)|`, infinite if either segment reports a non-finite bound.
///
/// Summed pairwise so that exchanging `a` and `b` yields the same value.
fn rate_bound<A, B>(a: &A, b: &B) -> f64
where
    A: MotionSegment + ?Sized,
    B: MotionSegment + ?Sized,
{
    let bound = (a.max_speed() + b.max_speed()) + (a.max_radius_rate() + b.max_radius_rate());
    if bound.is_finite() {
        bound.abs()
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trajectory::{Segment, Trajectory, Waypoint};

    const EPS: f64 = 1e-4;

    fn segment(from: Waypoint, to: Waypoint) -> Segment {
        let trajectory = Trajectory::from_waypoints("L1", [from, to]).unwrap();
        *trajectory
            .segment(contracts::SegmentIndex::new(0))
            .unwrap()
    }

    fn moving(y: f64, from_x: f64, to_x: f64, radius: f64) -> Segment {
        let v = (to_x - from_x) / 10.0;
        segment(
            Waypoint::new(0.0, [from_x, y], [v, 0.0], radius),
            Waypoint::new(10.0, [to_x, y], [v, 0.0], radius),
        )
    }

    fn full() -> TimeSpan {
        TimeSpan::new(0.0, 10.0)
    }

    #[test]
    fn test_coarse_tolerance_keeps_clearance() {
        // Same direction, 0.5 m apart for the whole window.
        let a = moving(0.0, 0.0, 10.0, 0.5);
        let b = moving(1.5, 0.0, 10.0, 0.5);
        // Opposite directions, closest approach 0.01 m at t = 5.
        let c = moving(1.01, 10.0, 0.0, 0.5);
        for tolerance in [0.5, 2.0, 20.0] {
            let search = ConservativeAdvancement::new(tolerance);
            assert!(
                matches!(search.search(&a, &b, full()), Advancement::Clear { .. }),
                "tolerance {tolerance}: parallel lanes"
            );
            assert!(
                matches!(search.search(&a, &c, full()), Advancement::Clear { .. }),
                "tolerance {tolerance}: near miss"
            );
        }
    }

    #[test]
    fn test_coarse_tolerance_bounds_contact_time() {
        let a = moving(0.0, 0.0, 10.0, 1.0);
        let b = moving(0.5, 10.0, 0.0, 1.0);
        // |10 - 2t|² + 0.25 = 4  =>  t = (10 - sqrt(3.75)) / 2
        let expected = (10.0 - 3.75f64.sqrt()) / 2.0;
        match ConservativeAdvancement::new(0.5).search(&a, &b, full()) {
            Advancement::Contact {
                time, conservative, ..
            } => {
                assert!(time >= expected - 1e-9, "got {time}");
                assert!(time - expected <= 0.5, "got {time}");
                assert!(!conservative);
            }
            other => panic!("expected contact, got {other:?}"),
        }
    }

    #[test]
    fn test_head_on_contact_time() {
        let a = moving(0.0, 0.0, 10.0, 1.0);
        let b = moving(0.0, 10.0, 0.0, 1.0);
        match ConservativeAdvancement::new(EPS).search(&a, &b, full()) {
            Advancement::Contact {
                time, conservative, ..
            } => {
                assert!((time - 4.0).abs() <= EPS, "got {time}");
                assert!(!conservative);
            }
            other => panic!("expected contact, got {other:?}"),
        }
    }

    #[test]
    fn test_parallel_lanes_clear() {
        let a = moving(0.0, 0.0, 10.0, 0.5);
        let b = moving(3.0, 10.0, 0.0, 0.5);
        let outcome = ConservativeAdvancement::new(EPS).search(&a, &b, full());
        assert!(matches!(outcome, Advancement::Clear { .. }));
        assert!(outcome.samples() > 1);
    }

    #[test]
    fn test_overlap_at_window_start() {
        let a = moving(0.0, 0.0, 10.0, 1.0);
        let b = moving(0.5, 0.0, 10.0, 1.0);
        let outcome = ConservativeAdvancement::new(EPS).search(&a, &b, full());
        assert_eq!(
            outcome,
            Advancement::Contact {
                time: 0.0,
                samples: 1,
                conservative: false
            }
        );
    }

    #[test]
    fn test_static_bodies_decided_by_first_sample() {
        let a = segment(
            Waypoint::stopped(0.0, [0.0, 0.0], 0.5),
            Waypoint::stopped(10.0, [0.0, 0.0], 0.5),
        );
        let b = segment(
            Waypoint::stopped(0.0, [3.0, 0.0], 0.5),
            Waypoint::stopped(10.0, [3.0, 0.0], 0.5),
        );
        assert_eq!(
            ConservativeAdvancement::new(EPS).search(&a, &b, full()),
            Advancement::Clear { samples: 1 }
        );
    }

    #[test]
    fn test_grazing_pass_reported() {
        // Closest approach at t = 5 with clearance exactly zero.
        let a = moving(0.0, 0.0, 10.0, 1.0);
        let b = moving(2.0, 10.0, 0.0, 1.0);
        let search = ConservativeAdvancement::new(EPS);
        let first = search.search(&a, &b, full());
        match first {
            Advancement::Contact { time, .. } => {
                assert!((time - 5.0).abs() < 0.05, "got {time}")
            }
            other => panic!("expected contact, got {other:?}"),
        }
        assert_eq!(search.search(&a, &b, full()), first);
    }

    #[test]
    fn test_growing_radius_contact() {
        let a = segment(
            Waypoint::stopped(0.0, [0.0, 0.0], 0.5),
            Waypoint::stopped(10.0, [0.0, 0.0], 2.5),
        );
        let b = segment(
            Waypoint::stopped(0.0, [3.0, 0.0], 0.5),
            Waypoint::stopped(10.0, [3.0, 0.0], 0.5),
        );
        // 0.5 + 0.2 t + 0.5 = 3  =>  t = 10
        match ConservativeAdvancement::new(EPS).search(&a, &b, full()) {
            Advancement::Contact { time, .. } => {
                assert!((time - 10.0).abs() <= 1e-3, "got {time}")
            }
            other => panic!("expected contact, got {other:?}"),
        }
    }

    #[test]
    fn test_single_instant_window() {
        let a = moving(0.0, 0.0, 10.0, 1.0);
        let b = moving(0.0, 10.0, 0.0, 1.0);
        let search = ConservativeAdvancement::new(EPS);
        assert!(matches!(
            search.search(&a, &b, TimeSpan::new(2.0, 2.0)),
            Advancement::Clear { samples: 1 }
        ));
        assert!(matches!(
            search.search(&a, &b, TimeSpan::new(5.0, 5.0)),
            Advancement::Contact { time, .. } if time == 5.0
        ));
    }

    #[test]
    fn test_contact_within_tolerance_of_true_time() {
        for tolerance in [1e-2, 1e-3, 1e-5] {
            let a = moving(0.0, 0.0, 10.0, 0.25);
            let b = segment(
                Waypoint::new(0.0, [10.0, 0.3], [-2.0, 0.0], 0.25),
                Waypoint::new(5.0, [0.0, 0.3], [-2.0, 0.0], 0.25),
            );
            // |10 - 3t|² + 0.09 = 0.16 + 0.09  =>  t = (10 - 0.4) / 3
            let expected = 9.6 / 3.0;
            let search = ConservativeAdvancement::new(tolerance);
            match search.search(&a, &b, TimeSpan::new(0.0, 5.0)) {
                Advancement::Contact { time, .. } => {
                    assert!(
                        (time - expected).abs() <= 2.0 * tolerance,
                        "tolerance {tolerance}: got {time}, expected {expected}"
                    );
                }
                other => panic!("expected contact, got {other:?}"),
            }
        }
    }
}
