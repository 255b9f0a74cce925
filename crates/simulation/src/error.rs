//! Error types for simulation runs.

use queuesim_types::{TableError, TimeError};
use thiserror::Error;

/// Problems with run parameters, detected before any step executes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A probability table failed validation.
    #[error("Invalid {name} table: {source}")]
    Table {
        /// Which table, e.g. "inter-arrival".
        name: &'static str,
        #[source]
        source: TableError,
    },

    /// LCG modulus of zero.
    #[error("LCG modulus must be positive")]
    ZeroModulus,

    /// Both random streams would start from the same seed.
    #[error("Arrival and service seeds must differ, both are {seed}")]
    IdenticalSeeds {
        /// The shared seed.
        seed: u64,
    },
}

/// Errors surfaced by a simulation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Run parameters are invalid.
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// A clock time did not follow the packed hour/minute convention.
    #[error(transparent)]
    MalformedTime(#[from] TimeError),

    /// Zero patients requested; averages are undefined.
    #[error("Degenerate run: at least one patient is required")]
    DegenerateRun,
}

impl ConfigError {
    pub fn table(name: &'static str, source: TableError) -> Self {
        ConfigError::Table { name, source }
    }
}
