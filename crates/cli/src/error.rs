//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Scenario file not found
    #[error("Scenario file not found: {path}")]
    ConfigNotFound { path: String },

    /// A trajectory in the scenario could not be built
    #[error("Failed to build trajectory '{id}': {message}")]
    TrajectoryBuild { id: String, message: String },

    /// A pair check task failed to complete
    #[error("Conflict sweep failed: {message}")]
    Sweep { message: String },

    /// Conflicts were found and the caller asked to fail on them
    #[error("{count} conflict(s) found")]
    ConflictsFound { count: usize },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn trajectory_build(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TrajectoryBuild {
            id: id.into(),
            message: message.into(),
        }
    }

    pub fn sweep(message: impl Into<String>) -> Self {
        Self::Sweep {
            message: message.into(),
        }
    }
}
