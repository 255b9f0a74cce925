//! Configuration types for the simulator.

use crate::SimulatorError;
use queuesim_simulation::{ConfigError, LcgParams, QueueConfig, SimulationError};
use queuesim_types::{ClockTime, ProbabilityTable};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Unvalidated probability table as written in a config file or on the
/// command line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Outcome durations in minutes.
    pub outcomes: Vec<u32>,

    /// Probability of each outcome, same order.
    pub probabilities: Vec<f64>,
}

impl TableConfig {
    pub fn new(outcomes: Vec<u32>, probabilities: Vec<f64>) -> Self {
        Self {
            outcomes,
            probabilities,
        }
    }

    /// The clinic's inter-arrival distribution.
    pub fn clinic_inter_arrival() -> Self {
        Self::new(vec![2, 3, 4, 5, 6], vec![0.15, 0.25, 0.20, 0.25, 0.15])
    }

    /// The clinic's service-time distribution.
    pub fn clinic_service() -> Self {
        Self::new(vec![2, 3, 4, 5, 6], vec![0.10, 0.25, 0.30, 0.20, 0.15])
    }

    /// Validate into a [`ProbabilityTable`]; `name` labels the error.
    pub fn build(&self, name: &'static str) -> Result<ProbabilityTable, ConfigError> {
        ProbabilityTable::new(self.outcomes.clone(), self.probabilities.clone())
            .map_err(|err| ConfigError::table(name, err))
    }
}

/// Parses `outcome:probability` pairs separated by commas, e.g.
/// `2:0.15,3:0.25,4:0.6`.
impl FromStr for TableConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut table = TableConfig::new(Vec::new(), Vec::new());
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (outcome, probability) = pair
                .split_once(':')
                .ok_or_else(|| format!("Expected outcome:probability, got {pair:?}"))?;
            let outcome = outcome
                .trim()
                .parse()
                .map_err(|_| format!("Invalid outcome: {outcome:?}"))?;
            let probability = probability
                .trim()
                .parse()
                .map_err(|_| format!("Invalid probability: {probability:?}"))?;
            table.outcomes.push(outcome);
            table.probabilities.push(probability);
        }
        Ok(table)
    }
}

/// Configuration for a simulation run.
///
/// Every field has a default (the reference clinic), so config files only
/// need the values they change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Number of arrivals to simulate.
    pub patients: usize,

    /// Seed of the inter-arrival stream.
    pub seed: u64,

    /// Seed of the service stream; `seed + 1` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_seed: Option<u64>,

    /// Opening time, in packed notation.
    pub day_start: ClockTime,

    /// Generator parameters shared by both streams.
    pub lcg: LcgParams,

    /// Minutes between arrivals.
    pub inter_arrival: TableConfig,

    /// Service duration in minutes.
    pub service: TableConfig,
}

impl SimulatorConfig {
    /// Default number of patients.
    pub const DEFAULT_PATIENTS: usize = 50;
    /// Default seed.
    pub const DEFAULT_SEED: u64 = 25;
    /// Default generator, `a = 241, c = 59, M = 10007`.
    pub const DEFAULT_LCG: LcgParams = LcgParams::new(241, 59, 10007);

    /// Create a configuration for the reference clinic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, SimulatorError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulatorError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SimulatorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Set the number of patients.
    pub fn with_patients(mut self, patients: usize) -> Self {
        self.patients = patients;
        self
    }

    /// Set the arrival seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set an explicit service seed.
    pub fn with_service_seed(mut self, seed: u64) -> Self {
        self.service_seed = Some(seed);
        self
    }

    /// Set the opening time.
    pub fn with_day_start(mut self, day_start: ClockTime) -> Self {
        self.day_start = day_start;
        self
    }

    /// Set the opening time from packed notation such as `"8.30"`.
    pub fn with_day_start_str(self, day_start: &str) -> Result<Self, SimulatorError> {
        let day_start = day_start.parse().map_err(SimulationError::from)?;
        Ok(self.with_day_start(day_start))
    }

    /// Set the generator parameters.
    pub fn with_lcg(mut self, lcg: LcgParams) -> Self {
        self.lcg = lcg;
        self
    }

    /// Set the inter-arrival table.
    pub fn with_inter_arrival(mut self, table: TableConfig) -> Self {
        self.inter_arrival = table;
        self
    }

    /// Set the service table.
    pub fn with_service(mut self, table: TableConfig) -> Self {
        self.service = table;
        self
    }

    /// Seed of the service stream after defaulting.
    pub fn resolved_service_seed(&self) -> u64 {
        self.service_seed.unwrap_or_else(|| self.seed.wrapping_add(1))
    }

    /// Validate the tables and convert to the core run configuration.
    pub fn to_queue_config(&self) -> Result<QueueConfig, SimulatorError> {
        let config = self.assemble()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the core configuration, checking only the tables and the
    /// patient count.
    pub(crate) fn assemble(&self) -> Result<QueueConfig, SimulatorError> {
        if self.patients == 0 {
            return Err(SimulationError::DegenerateRun.into());
        }
        Ok(QueueConfig::new(
            self.inter_arrival.build("inter-arrival")?,
            self.service.build("service")?,
            self.lcg,
            self.seed,
            self.patients,
            self.day_start,
        )
        .with_service_seed(self.resolved_service_seed()))
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            patients: Self::DEFAULT_PATIENTS,
            seed: Self::DEFAULT_SEED,
            service_seed: None,
            day_start: ClockTime::from_hours(7),
            lcg: Self::DEFAULT_LCG,
            inter_arrival: TableConfig::clinic_inter_arrival(),
            service: TableConfig::clinic_service(),
        }
    }
}
