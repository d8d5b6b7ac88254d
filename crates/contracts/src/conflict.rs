//! Conflict outcome - Detection output
//!
//! `ConflictResult` is the only value the detector hands back to callers.

use serde::{Deserialize, Serialize};

use crate::{BadConflictAccess, SegmentIndex, Time};

/// Where and when two paths first come into conflict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictData {
    /// Earliest conflicting instant, within the overlap of both segments
    time: Time,

    /// Segment of the first path and segment of the second path
    segments: (SegmentIndex, SegmentIndex),
}

impl ConflictData {
    /// Used by the detector. Callers only read conflicts out of a
    /// [`ConflictResult`].
    #[doc(hidden)]
    pub fn new(time: Time, segment_a: SegmentIndex, segment_b: SegmentIndex) -> Self {
        Self {
            time,
            segments: (segment_a, segment_b),
        }
    }

    /// Get the point in time that the conflict occurs.
    #[inline]
    pub fn time(&self) -> Time {
        self.time
    }

    /// Get the segment of each path that is in conflict, in argument order.
    #[inline]
    pub fn segments(&self) -> (SegmentIndex, SegmentIndex) {
        self.segments
    }

    /// The same conflict seen with the two paths exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            time: self.time,
            segments: (self.segments.1, self.segments.0),
        }
    }
}

/// Outcome of a conflict check: either conflict-free or a [`ConflictData`].
///
/// The default value is conflict-free. Access to the data is guarded and
/// reports [`BadConflictAccess`] when there is nothing to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictResult {
    conflict: Option<ConflictData>,
}

impl ConflictResult {
    /// A conflict-free result.
    #[inline]
    pub fn none() -> Self {
        Self { conflict: None }
    }

    /// A result holding `data`.
    #[inline]
    pub fn conflict(data: ConflictData) -> Self {
        Self {
            conflict: Some(data),
        }
    }

    /// Returns true if a conflict was detected, otherwise returns false.
    #[inline]
    pub fn has_conflict(&self) -> bool {
        self.conflict.is_some()
    }

    /// Get the conflict data.
    ///
    /// # Errors
    /// [`BadConflictAccess`] if no conflict was detected.
    #[inline]
    pub fn data(&self) -> Result<&ConflictData, BadConflictAccess> {
        self.conflict.as_ref().ok_or(BadConflictAccess)
    }

    /// Consume the result and take the conflict data.
    ///
    /// # Errors
    /// [`BadConflictAccess`] if no conflict was detected.
    #[inline]
    pub fn into_data(self) -> Result<ConflictData, BadConflictAccess> {
        self.conflict.ok_or(BadConflictAccess)
    }

    #[inline]
    pub fn as_option(&self) -> Option<&ConflictData> {
        self.conflict.as_ref()
    }
}

impl From<ConflictData> for ConflictResult {
    fn from(data: ConflictData) -> Self {
        Self::conflict(data)
    }
}

impl From<ConflictResult> for bool {
    fn from(result: ConflictResult) -> Self {
        result.has_conflict()
    }
}

impl From<&ConflictResult> for bool {
    fn from(result: &ConflictResult) -> Self {
        result.has_conflict()
    }
}
