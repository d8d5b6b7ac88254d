//! Detector configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ConflictError;

/// Default conflict-time localization tolerance, in seconds.
pub const DEFAULT_TIME_TOLERANCE: f64 = 1e-4;

/// Narrow-phase configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct DetectorConfig {
    /// Localization tolerance ε (seconds). Reported conflict times are within
    /// ε of the true first contact, and it is the shortest step the
    /// conservative advancement ever takes.
    #[validate(
        range(exclusive_min = 0.0),
        custom(function = "validate_finite")
    )]
    #[serde(default = "default_time_tolerance")]
    pub time_tolerance: f64,
}

fn default_time_tolerance() -> f64 {
    DEFAULT_TIME_TOLERANCE
}

fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite"))
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            time_tolerance: DEFAULT_TIME_TOLERANCE,
        }
    }
}

impl DetectorConfig {
    /// Config with a custom tolerance; not validated until [`Self::check`].
    pub fn with_tolerance(time_tolerance: f64) -> Self {
        Self { time_tolerance }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// `ConflictError::ConfigValidation` naming the offending field.
    pub fn check(&self) -> Result<(), ConflictError> {
        self.validate().map_err(|e| {
            ConflictError::config_validation(
                "detector.time_tolerance",
                format!("time_tolerance must be finite and > 0, got {} ({e})", self.time_tolerance),
            )
        })
    }
}
