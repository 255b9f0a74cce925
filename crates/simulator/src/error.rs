//! Error types for the simulator.

use queuesim_simulation::{ConfigError, SimulationError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading configuration, running simulations, or rendering
/// reports.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// Configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for a simulator config.
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A run failed validation or execution.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Sweep requested with no runs.
    #[error("Sweep requires at least one run")]
    EmptySweep,

    /// Histogram construction or recording failed.
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Report could not be encoded as JSON.
    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for SimulatorError {
    fn from(err: ConfigError) -> Self {
        SimulatorError::Simulation(err.into())
    }
}
