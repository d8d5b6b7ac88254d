//! Pairwise conflict sweep over a scenario.

mod orchestrator;
mod stats;

pub use orchestrator::{Robot, Sweep, SweepConfig};
pub use stats::{ConflictReport, SweepStats};
