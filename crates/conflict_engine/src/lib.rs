//! # Conflict Engine
//!
//! Pairwise continuous conflict detection between planned robot paths.
//!
//! Responsibilities:
//! - Broad phase: same map and overlapping time spans, O(1)
//! - Narrow phase: merge-scan of time-overlapping segment pairs
//! - Conservative advancement with bisection to find the first contact
//! - Output `ConflictResult`
//!
//! ## Usage
//!
//! ```ignore
//! use conflict_engine::{DetectConflict, DetectorConfig};
//!
//! let detector = DetectConflict::new(DetectorConfig::default())?;
//!
//! let result = detector.between(&trajectory_a, &trajectory_b);
//! if let Ok(conflict) = result.data() {
//!     // Replan the segments in conflict.segments()
//! }
//! ```

mod advancement;
mod broad_phase;
mod engine;
mod narrow_phase;

pub use broad_phase::overlap_window;
pub use engine::DetectConflict;

// Re-export contracts types
pub use contracts::{
    BadConflictAccess, ConflictData, ConflictError, ConflictResult, DetectorConfig, MotionPath,
    MotionSegment, SegmentIndex, TimeSpan,
};
