//! Cross-run metrics collection.

use crate::SimulatorError;
use hdrhistogram::Histogram;
use queuesim_simulation::SimulationRun;
use serde::Serialize;

/// Percentiles of a per-patient duration, in whole minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Percentiles {
    pub p50: u64,
    pub p90: u64,
    pub p99: u64,
    pub max: u64,
}

/// Collects per-patient wait and idle minutes across many runs.
pub struct MetricsCollector {
    /// Wait minutes of every patient.
    wait: Histogram<u64>,
    /// Idle minutes preceding every patient.
    idle: Histogram<u64>,
    runs: usize,
}

impl MetricsCollector {
    /// Create an empty collector.
    pub fn new() -> Result<Self, SimulatorError> {
        Ok(Self {
            wait: new_histogram()?,
            idle: new_histogram()?,
            runs: 0,
        })
    }

    /// Record every patient of a finished run.
    pub fn record_run(&mut self, run: &SimulationRun) -> Result<(), SimulatorError> {
        for record in &run.records {
            self.wait
                .record(record.wait_minutes)
                .map_err(|err| SimulatorError::Metrics(format!("{err:?}")))?;
            self.idle
                .record(record.idle_minutes)
                .map_err(|err| SimulatorError::Metrics(format!("{err:?}")))?;
        }
        self.runs += 1;
        Ok(())
    }

    /// Number of runs recorded.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Number of patients recorded.
    pub fn patients(&self) -> u64 {
        self.wait.len()
    }

    pub fn wait_percentiles(&self) -> Percentiles {
        percentiles(&self.wait)
    }

    pub fn idle_percentiles(&self) -> Percentiles {
        percentiles(&self.idle)
    }
}

fn new_histogram() -> Result<Histogram<u64>, SimulatorError> {
    Histogram::new(3).map_err(|err| SimulatorError::Metrics(format!("{err:?}")))
}

fn percentiles(histogram: &Histogram<u64>) -> Percentiles {
    if histogram.is_empty() {
        return Percentiles::default();
    }
    Percentiles {
        p50: histogram.value_at_quantile(0.50),
        p90: histogram.value_at_quantile(0.90),
        p99: histogram.value_at_quantile(0.99),
        max: histogram.max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuesim_simulation::{simulate, LcgParams, QueueConfig};
    use queuesim_test_helpers::*;

    fn reference_run() -> SimulationRun {
        simulate(QueueConfig::new(
            reference_inter_arrival(),
            reference_service(),
            LcgParams::new(REFERENCE_MULTIPLIER, REFERENCE_INCREMENT, REFERENCE_MODULUS),
            REFERENCE_SEED,
            REFERENCE_PATIENTS,
            reference_day_start(),
        ))
        .unwrap()
    }

    #[test]
    fn test_empty_collector() {
        let collector = MetricsCollector::new().unwrap();
        assert_eq!(collector.runs(), 0);
        assert_eq!(collector.patients(), 0);
        assert_eq!(collector.wait_percentiles(), Percentiles::default());
    }

    #[test]
    fn test_records_every_patient() {
        let run = reference_run();
        let mut collector = MetricsCollector::new().unwrap();
        collector.record_run(&run).unwrap();
        collector.record_run(&run).unwrap();

        assert_eq!(collector.runs(), 2);
        assert_eq!(collector.patients(), 100);

        let wait = collector.wait_percentiles();
        let longest = run.records.iter().map(|r| r.wait_minutes).max().unwrap();
        assert_eq!(wait.max, longest);
        assert!(wait.p50 <= wait.p90 && wait.p90 <= wait.p99 && wait.p99 <= wait.max);

        let idle = collector.idle_percentiles();
        assert_eq!(idle.max, run.records.iter().map(|r| r.idle_minutes).max().unwrap());
    }
}
