//! Monte-Carlo sweep over seed pairs.
//!
//! A sweep repeats the same clinic configuration with `runs` different seed
//! pairs. Seeds come from a ChaCha8 generator keyed by a master seed, so a
//! sweep is reproducible. Runs share nothing and execute on the rayon pool;
//! results are collected in run order.

use crate::{MetricsCollector, Percentiles, SimulatorConfig, SimulatorError};
use queuesim_simulation::{simulate, QueueConfig, SimulationRun, SimulationStats};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// One run of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Zero-based position in the sweep.
    pub run: usize,
    pub arrival_seed: u64,
    pub service_seed: u64,
    pub stats: SimulationStats,
}

/// Aggregated result of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub master_seed: u64,
    pub patients_per_run: usize,

    /// Per-run statistics in run order.
    pub runs: Vec<RunSummary>,

    /// Mean of the per-run average wait, in hours.
    pub mean_average_wait_hours: f64,

    /// Mean of the per-run average idle, in hours.
    pub mean_average_idle_hours: f64,

    pub min_average_wait_hours: f64,
    pub max_average_wait_hours: f64,

    /// Wait minutes over every patient of every run.
    pub wait_minutes: Percentiles,

    /// Idle minutes over every patient of every run.
    pub idle_minutes: Percentiles,
}

/// Repeats a validated configuration over derived seed pairs.
#[derive(Debug, Clone)]
pub struct Sweep {
    base: QueueConfig,
    runs: usize,
    master_seed: u64,
}

impl Sweep {
    /// Master seed used when none is given.
    pub const DEFAULT_MASTER_SEED: u64 = 12345;

    /// Create a sweep of `runs` runs over `base`. The seeds in `base` are
    /// ignored; every run uses a derived pair.
    pub fn new(base: QueueConfig, runs: usize) -> Result<Self, SimulatorError> {
        if runs == 0 {
            return Err(SimulatorError::EmptySweep);
        }
        let sweep = Self {
            base,
            runs,
            master_seed: Self::DEFAULT_MASTER_SEED,
        };
        sweep.run_config(0, 1).validate()?;
        Ok(sweep)
    }

    /// Create a sweep from an outer configuration.
    pub fn from_config(config: &SimulatorConfig, runs: usize) -> Result<Self, SimulatorError> {
        if runs == 0 {
            return Err(SimulatorError::EmptySweep);
        }
        Self::new(config.assemble()?, runs)
    }

    pub fn with_master_seed(mut self, master_seed: u64) -> Self {
        self.master_seed = master_seed;
        self
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive `(arrival, service)` seed pairs, one per run.
    ///
    /// The arrival seed is uniform in `[0, M)`; the service seed is the next
    /// residue, which never equals the arrival seed for `M > 1`.
    pub fn derive_seeds(&self) -> Vec<(u64, u64)> {
        let modulus = self.base.lcg.modulus;
        let mut rng = ChaCha8Rng::seed_from_u64(self.master_seed);
        (0..self.runs)
            .map(|_| {
                let arrival = rng.gen_range(0..modulus);
                let mut service = (arrival + 1) % modulus;
                if service == arrival {
                    service = arrival.wrapping_add(1);
                }
                (arrival, service)
            })
            .collect()
    }

    /// The base configuration with a run's seed pair.
    fn run_config(&self, arrival_seed: u64, service_seed: u64) -> QueueConfig {
        let mut config = self.base.clone();
        config.arrival_seed = arrival_seed;
        config.service_seed = service_seed;
        config
    }

    /// Execute every run and aggregate the results.
    pub fn run(&self) -> Result<SweepReport, SimulatorError> {
        info!(
            runs = self.runs,
            master_seed = self.master_seed,
            patients = self.base.patients,
            "starting sweep"
        );

        let results: Vec<(RunSummary, SimulationRun)> = self
            .derive_seeds()
            .into_par_iter()
            .enumerate()
            .map(|(run, (arrival_seed, service_seed))| -> Result<_, SimulatorError> {
                let output = simulate(self.run_config(arrival_seed, service_seed))?;
                debug!(
                    run,
                    arrival_seed,
                    service_seed,
                    average_wait_hours = output.stats.average_wait_hours,
                    "sweep run finished"
                );
                let summary = RunSummary {
                    run,
                    arrival_seed,
                    service_seed,
                    stats: output.stats.clone(),
                };
                Ok((summary, output))
            })
            .collect::<Result<_, SimulatorError>>()?;

        let mut metrics = MetricsCollector::new()?;
        for (_, output) in &results {
            metrics.record_run(output)?;
        }
        let runs: Vec<RunSummary> = results.into_iter().map(|(summary, _)| summary).collect();

        let count = runs.len() as f64;
        let averages = runs.iter().map(|r| r.stats.average_wait_hours);
        let report = SweepReport {
            master_seed: self.master_seed,
            patients_per_run: self.base.patients,
            mean_average_wait_hours: averages.clone().sum::<f64>() / count,
            mean_average_idle_hours: runs
                .iter()
                .map(|r| r.stats.average_idle_hours)
                .sum::<f64>()
                / count,
            min_average_wait_hours: averages.clone().fold(f64::INFINITY, f64::min),
            max_average_wait_hours: averages.fold(f64::NEG_INFINITY, f64::max),
            wait_minutes: metrics.wait_percentiles(),
            idle_minutes: metrics.idle_percentiles(),
            runs,
        };

        info!(
            runs = metrics.runs(),
            patients = metrics.patients(),
            mean_average_wait_hours = report.mean_average_wait_hours,
            p99_wait_minutes = report.wait_minutes.p99,
            "sweep finished"
        );
        Ok(report)
    }
}
