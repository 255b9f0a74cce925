//! Parameters of a single simulation run.

use crate::{ConfigError, LcgParams, SimulationError};
use queuesim_types::{ClockTime, ProbabilityTable};

/// Everything a run depends on. Two runs with equal configs produce equal
/// output.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueConfig {
    /// Distribution of minutes between consecutive arrivals.
    pub inter_arrival: ProbabilityTable,

    /// Distribution of service durations in minutes.
    pub service: ProbabilityTable,

    /// Generator shared by both random streams.
    pub lcg: LcgParams,

    /// Seed of the inter-arrival stream.
    pub arrival_seed: u64,

    /// Seed of the service stream. Must differ from `arrival_seed`.
    pub service_seed: u64,

    /// Number of arrivals to simulate.
    pub patients: usize,

    /// Clock time the first inter-arrival is measured from.
    pub day_start: ClockTime,
}

impl QueueConfig {
    /// Create a config whose service seed is `seed + 1`.
    pub fn new(
        inter_arrival: ProbabilityTable,
        service: ProbabilityTable,
        lcg: LcgParams,
        seed: u64,
        patients: usize,
        day_start: ClockTime,
    ) -> Self {
        Self {
            inter_arrival,
            service,
            lcg,
            arrival_seed: seed,
            service_seed: seed.wrapping_add(1),
            patients,
            day_start,
        }
    }

    /// Override the service stream seed.
    pub fn with_service_seed(mut self, seed: u64) -> Self {
        self.service_seed = seed;
        self
    }

    /// Set both seeds, service following arrival by one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.arrival_seed = seed;
        self.service_seed = seed.wrapping_add(1);
        self
    }

    /// Set the number of arrivals.
    pub fn with_patients(mut self, patients: usize) -> Self {
        self.patients = patients;
        self
    }

    /// Check every precondition of a run.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.patients == 0 {
            return Err(SimulationError::DegenerateRun);
        }
        self.lcg.validate()?;
        if self.arrival_seed == self.service_seed {
            return Err(ConfigError::IdenticalSeeds {
                seed: self.arrival_seed,
            }
            .into());
        }
        Ok(())
    }
}
