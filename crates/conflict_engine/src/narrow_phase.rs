//! Narrow phase: merge-scan of segment pairs plus per-pair advancement.

use contracts::{
    ConflictData, ConflictResult, MotionPath, MotionSegment, SegmentIndex, Time, TimeSpan,
};

use crate::advancement::{Advancement, ConservativeAdvancement};

/// Two segments, one from each path, active together during `window`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SegmentPair {
    pub a: SegmentIndex,
    pub b: SegmentIndex,
    pub window: TimeSpan,
}

/// Two-cursor scan over time-ordered segment slices.
///
/// Yields, in increasing time, every pair whose spans intersect each other
/// and the scan window. Visits at most `|a| + |b|` pairs. Segments own
/// `[t0, t1)` except the last of each path, so a pair meeting only at the
/// finish of a non-final segment is skipped; the following segment covers
/// that instant.
pub(crate) struct OverlapScan<'a, SA, SB> {
    a: &'a [SA],
    b: &'a [SB],
    i: usize,
    j: usize,
    window: TimeSpan,
}

impl<'a, SA, SB> OverlapScan<'a, SA, SB>
where
    SA: MotionSegment,
    SB: MotionSegment,
{
    pub(crate) fn new(a: &'a [SA], b: &'a [SB], window: TimeSpan) -> Self {
        Self {
            a,
            b,
            i: 0,
            j: 0,
            window,
        }
    }

    fn is_interior_boundary(&self, window: &TimeSpan, sa: &SA, sb: &SB) -> bool {
        let instant = window.start();
        window.finish() == instant
            && ((self.i + 1 < self.a.len() && sa.finish_time() == instant)
                || (self.j + 1 < self.b.len() && sb.finish_time() == instant))
    }
}

/// Segment owning `time`: the successor when `time` is exactly where
/// `index` finishes and the next segment starts.
fn owning_segment<S>(segments: &[S], index: SegmentIndex, time: Time) -> SegmentIndex
where
    S: MotionSegment,
{
    let next = index.get() + 1;
    match (segments.get(index.get()), segments.get(next)) {
        (Some(current), Some(following))
            if current.finish_time() == time && following.start_time() == time =>
        {
            SegmentIndex::new(next)
        }
        _ => index,
    }
}

impl<SA, SB> Iterator for OverlapScan<'_, SA, SB>
where
    SA: MotionSegment,
    SB: MotionSegment,
{
    type Item = SegmentPair;

    fn next(&mut self) -> Option<SegmentPair> {
        loop {
            let sa = self.a.get(self.i)?;
            let sb = self.b.get(self.j)?;

            if sa.finish_time() < self.window.start() {
                self.i += 1;
                continue;
            }
            if sb.finish_time() < self.window.start() {
                self.j += 1;
                continue;
            }
            if sa.start_time() > self.window.finish() || sb.start_time() > self.window.finish() {
                self.i = self.a.len();
                return None;
            }

            let pair = sa
                .time_span()
                .intersection(&sb.time_span())
                .and_then(|span| span.intersection(&self.window))
                .filter(|window| !self.is_interior_boundary(window, sa, sb))
                .map(|window| SegmentPair {
                    a: SegmentIndex::new(self.i),
                    b: SegmentIndex::new(self.j),
                    window,
                });

            // The segment ending first cannot meet anything later on the
            // other path. Ties (and unordered times) advance both.
            let (finish_a, finish_b) = (sa.finish_time(), sb.finish_time());
            if finish_a < finish_b {
                self.i += 1;
            } else if finish_b < finish_a {
                self.j += 1;
            } else {
                self.i += 1;
                self.j += 1;
            }

            if pair.is_some() {
                return pair;
            }
        }
    }
}

/// Result of a narrow-phase search with its work counters.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NarrowPhaseOutcome {
    pub result: ConflictResult,
    pub pairs: u64,
    pub samples: u64,
    /// Clearance fell below the time resolution; no sample reached `<= 0`
    pub conservative: bool,
}

/// Search every overlapping segment pair within `window`, stopping at the
/// first conflict.
pub(crate) fn search<A, B>(
    a: &A,
    b: &B,
    window: TimeSpan,
    advancement: &ConservativeAdvancement,
) -> NarrowPhaseOutcome
where
    A: MotionPath + ?Sized,
    B: MotionPath + ?Sized,
{
    let (segments_a, segments_b) = (a.segments(), b.segments());
    let mut outcome = NarrowPhaseOutcome {
        result: ConflictResult::none(),
        pairs: 0,
        samples: 0,
        conservative: false,
    };

    for pair in OverlapScan::new(segments_a, segments_b, window) {
        let (Some(sa), Some(sb)) = (
            segments_a.get(pair.a.get()),
            segments_b.get(pair.b.get()),
        ) else {
            break;
        };

        outcome.pairs += 1;
        let advanced = advancement.search(sa, sb, pair.window);
        outcome.samples += advanced.samples();

        if let Advancement::Contact {
            time, conservative, ..
        } = advanced
        {
            let segment_a = owning_segment(segments_a, pair.a, time);
            let segment_b = owning_segment(segments_b, pair.b, time);
            outcome.result = ConflictData::new(time, segment_a, segment_b).into();
            outcome.conservative = conservative;
            break;
        }
    }

    outcome
}
