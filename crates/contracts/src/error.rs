//! Layered error definitions
//!
//! Categorized by source: access / precondition / trajectory / config

use thiserror::Error;

use crate::{SurfaceId, TimeSpan};

/// Guarded access to [`ConflictData`](crate::ConflictData) on a conflict-free result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("bad conflict access: the result does not hold a conflict")]
pub struct BadConflictAccess;

/// Unified error type
#[derive(Debug, Error)]
pub enum ConflictError {
    // ===== Access Errors =====
    /// Conflict data requested from a conflict-free result
    #[error(transparent)]
    BadAccess(#[from] BadConflictAccess),

    // ===== Precondition Errors =====
    /// The two paths live on different operating surfaces
    #[error("narrow phase precondition violated: surface '{a}' differs from '{b}'")]
    SurfaceMismatch { a: SurfaceId, b: SurfaceId },

    /// The two paths never share an instant
    #[error("narrow phase precondition violated: time spans {a} and {b} do not overlap")]
    DisjointTimeSpans { a: TimeSpan, b: TimeSpan },

    /// A path has no segments and therefore no time span
    #[error("narrow phase precondition violated: path on surface '{surface}' has no segments")]
    EmptyPath { surface: SurfaceId },

    // ===== Trajectory Errors =====
    /// Waypoint data rejected while building a trajectory
    #[error("invalid trajectory on '{surface}': {message}")]
    InvalidTrajectory { surface: SurfaceId, message: String },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConflictError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create trajectory construction error
    pub fn invalid_trajectory(surface: &SurfaceId, message: impl Into<String>) -> Self {
        Self::InvalidTrajectory {
            surface: surface.clone(),
            message: message.into(),
        }
    }

    /// Whether this error reports a misuse of the narrow phase
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Self::SurfaceMismatch { .. } | Self::DisjointTimeSpans { .. } | Self::EmptyPath { .. }
        )
    }
}
