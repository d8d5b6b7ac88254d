//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use observability::ObservabilityConfig;
use std::path::PathBuf;

/// Fleet Conflict - Pairwise conflict detection for planned robot trajectories
#[derive(Parser, Debug)]
#[command(
    name = "fleet-conflict",
    author,
    version,
    about = "Pairwise conflict detection for planned robot trajectories",
    long_about = "Checks every pair of planned robot trajectories in a scenario for a conflict.\n\n\
                  Loads trajectories from a scenario file, rejects pairs on different maps or \n\
                  with disjoint schedules, and reports the first instant two footprints touch."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "FLEET_CONFLICT_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "FLEET_CONFLICT_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Logging setup implied by `-v`, `-q` and `--log-format`.
    ///
    /// `-q` pins the level to warn; otherwise `RUST_LOG` wins over `-v`.
    pub fn observability_config(&self) -> ObservabilityConfig {
        let log_level = if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        };

        ObservabilityConfig {
            log_format: self.log_format.into(),
            log_level: log_level.to_string(),
            env_override: !self.quiet,
            metrics_port: None,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every trajectory pair for conflicts
    Check(CheckArgs),

    /// Validate scenario file without checking
    Validate(ValidateArgs),

    /// Display scenario information
    Info(InfoArgs),
}

/// Arguments for the `check` command
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Path to scenario file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "scenario.toml",
        env = "FLEET_CONFLICT_SCENARIO"
    )]
    pub config: PathBuf,

    /// Override the detector time tolerance (seconds)
    #[arg(long, env = "FLEET_CONFLICT_TOLERANCE")]
    pub tolerance: Option<f64>,

    /// Output conflicts as JSON
    #[arg(long)]
    pub json: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "FLEET_CONFLICT_METRICS_PORT")]
    pub metrics_port: u16,

    /// Exit with an error if any conflict is found
    #[arg(long)]
    pub fail_on_conflict: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to scenario file to validate
    #[arg(short, long, default_value = "scenario.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to scenario file
    #[arg(short, long, default_value = "scenario.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show every waypoint
    #[arg(long)]
    pub waypoints: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
