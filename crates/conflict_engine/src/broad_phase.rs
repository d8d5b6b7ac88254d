//! Broad phase: map and time-span gate.

use contracts::{ConflictError, MotionPath, TimeSpan};

/// Window in which two paths can conflict at all.
///
/// `Some` iff both paths are on the same map and their time spans share at
/// least one instant. Reads only path-level data, never iterates segments.
pub fn overlap_window<A, B>(a: &A, b: &B) -> Option<TimeSpan>
where
    A: MotionPath + ?Sized,
    B: MotionPath + ?Sized,
{
    if a.surface_id() != b.surface_id() {
        return None;
    }
    a.time_span()?.intersection(&b.time_span()?)
}

/// Same gate as [`overlap_window`], reporting why the pair fails it.
pub(crate) fn require_overlap<A, B>(a: &A, b: &B) -> Result<TimeSpan, ConflictError>
where
    A: MotionPath + ?Sized,
    B: MotionPath + ?Sized,
{
    if a.surface_id() != b.surface_id() {
        return Err(ConflictError::SurfaceMismatch {
            a: a.surface_id().clone(),
            b: b.surface_id().clone(),
        });
    }

    let span_a = a.time_span().ok_or_else(|| ConflictError::EmptyPath {
        surface: a.surface_id().clone(),
    })?;
    let span_b = b.time_span().ok_or_else(|| ConflictError::EmptyPath {
        surface: b.surface_id().clone(),
    })?;

    span_a
        .intersection(&span_b)
        .ok_or(ConflictError::DisjointTimeSpans {
            a: span_a,
            b: span_b,
        })
}
