//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace: the
//! motion accessor traits the detector consumes, the conflict outcome types
//! it produces, and the scenario configuration model.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Time is a plain `f64` in seconds on a clock shared by every path
//! - Segment intervals are `[t0, t1)`, the final segment of a path is closed

mod blueprint;
mod conflict;
mod detector_config;
mod error;
mod motion;
mod surface_id;
mod time;

pub use blueprint::*;
pub use conflict::{ConflictData, ConflictResult};
pub use detector_config::*;
pub use error::*;
pub use motion::*;
pub use surface_id::SurfaceId;
pub use time::{Time, TimeSpan};
