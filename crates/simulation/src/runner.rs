//! Single-run queue simulator.

use crate::{
    step, DistributionTable, DrawnArrival, QueueConfig, RandomStream, ServerState,
    SimulationError,
};
use queuesim_types::{ClockTime, PatientRecord};
use serde::Serialize;
use tracing::debug;

/// Aggregate statistics of one run.
///
/// Totals are sums of the already-rounded per-patient hours, in index
/// order; averages divide those totals by the patient count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStats {
    pub patients: usize,
    pub total_wait_hours: f64,
    pub total_idle_hours: f64,
    pub average_wait_hours: f64,
    pub average_idle_hours: f64,

    /// Patients who queued before service.
    pub patients_waited: usize,

    /// Longest single wait, in rounded hours.
    pub max_wait_hours: f64,

    /// Exact total wait in minutes.
    pub total_wait_minutes: u64,

    /// Exact total idle in minutes.
    pub total_idle_minutes: u64,

    /// When the server finished the last patient.
    pub closing_time: ClockTime,
}

impl SimulationStats {
    /// Summarise a record sequence. Empty input is a degenerate run.
    pub fn from_records(records: &[PatientRecord]) -> Result<Self, SimulationError> {
        let last = records.last().ok_or(SimulationError::DegenerateRun)?;
        let patients = records.len();

        let total_wait_hours: f64 = records.iter().map(|r| r.wait_hours).sum();
        let total_idle_hours: f64 = records.iter().map(|r| r.idle_hours).sum();

        Ok(Self {
            patients,
            total_wait_hours,
            total_idle_hours,
            average_wait_hours: total_wait_hours / patients as f64,
            average_idle_hours: total_idle_hours / patients as f64,
            patients_waited: records.iter().filter(|r| r.waited()).count(),
            max_wait_hours: records.iter().map(|r| r.wait_hours).fold(0.0, f64::max),
            total_wait_minutes: records.iter().map(|r| r.wait_minutes).sum(),
            total_idle_minutes: records.iter().map(|r| r.idle_minutes).sum(),
            closing_time: last.service_end,
        })
    }
}

/// Output of one run: the ordered records and their aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRun {
    pub records: Vec<PatientRecord>,
    pub stats: SimulationStats,
}

/// Deterministic single-server queue simulator.
///
/// Built from a validated [`QueueConfig`]; every call to [`run`](Self::run)
/// produces the same output.
#[derive(Debug, Clone)]
pub struct QueueSimulator {
    config: QueueConfig,
    inter_arrival: DistributionTable,
    service: DistributionTable,
}

impl QueueSimulator {
    /// Validate `config` and precompute both distribution lookups.
    pub fn new(config: QueueConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let inter_arrival = DistributionTable::new(&config.inter_arrival);
        let service = DistributionTable::new(&config.service);
        if !inter_arrival.covers_all_draws() || !service.covers_all_draws() {
            debug!("rounded cumulative probabilities leave the top draws to the last outcome");
        }

        Ok(Self {
            config,
            inter_arrival,
            service,
        })
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn inter_arrival_table(&self) -> &DistributionTable {
        &self.inter_arrival
    }

    pub fn service_table(&self) -> &DistributionTable {
        &self.service
    }

    /// Draw both random streams and map them to durations.
    pub fn draw_arrivals(&self) -> Result<Vec<DrawnArrival>, SimulationError> {
        let config = &self.config;
        let arrivals = RandomStream::new(config.lcg, config.arrival_seed)?;
        let services = RandomStream::new(config.lcg, config.service_seed)?;

        Ok(arrivals
            .zip(services)
            .take(config.patients)
            .enumerate()
            .map(|(index, (arrival_draw, service_draw))| DrawnArrival {
                index,
                arrival_draw,
                inter_arrival: self.inter_arrival.sample(arrival_draw),
                service_draw,
                service: self.service.sample(service_draw),
            })
            .collect())
    }

    /// Run the simulation to completion.
    pub fn run(&self) -> Result<SimulationRun, SimulationError> {
        let config = &self.config;
        debug!(
            patients = config.patients,
            arrival_seed = config.arrival_seed,
            service_seed = config.service_seed,
            day_start = %config.day_start,
            "starting queue simulation"
        );

        let mut state = ServerState::opening(config.day_start);
        let mut records = Vec::new();
        for drawn in self.draw_arrivals()? {
            let (record, next) = step(state, drawn)?;
            records.push(record);
            state = next;
        }
        let stats = SimulationStats::from_records(&records)?;

        debug!(
            total_wait_hours = stats.total_wait_hours,
            total_idle_hours = stats.total_idle_hours,
            closing_time = %stats.closing_time,
            "queue simulation finished"
        );
        Ok(SimulationRun { records, stats })
    }
}

/// Validate `config` and run it once.
pub fn simulate(config: QueueConfig) -> Result<SimulationRun, SimulationError> {
    QueueSimulator::new(config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, LcgParams};
    use queuesim_test_helpers::*;
    use queuesim_types::{ProbabilityTable, StepBranch, TimeError};
    use tracing_test::traced_test;

    fn reference_config() -> QueueConfig {
        QueueConfig::new(
            reference_inter_arrival(),
            reference_service(),
            LcgParams::new(REFERENCE_MULTIPLIER, REFERENCE_INCREMENT, REFERENCE_MODULUS),
            REFERENCE_SEED,
            REFERENCE_PATIENTS,
            reference_day_start(),
        )
    }

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_patient_scenario() {
        let run = simulate(reference_config().with_patients(1)).unwrap();
        assert_eq!(run.records.len(), 1);

        let first = &run.records[0];
        assert_eq!(first.arrival_draw, 84);
        assert_eq!(first.inter_arrival, 5);
        assert_eq!(first.arrival, t("7.05"));
        assert_eq!(first.service_start, t("7.05"));
        assert_eq!(first.service_draw, 25);
        assert_eq!(first.service, 3);
        assert_eq!(first.service_end, t("7.08"));
        assert_eq!((first.wait_hours, first.idle_hours), (0.0, 0.0));
        assert_eq!(first.branch, StepBranch::Opening);

        assert_eq!(run.stats.patients, 1);
        assert_eq!(run.stats.average_wait_hours, 0.0);
    }

    #[test]
    fn test_reference_prefix() {
        let run = simulate(reference_config()).unwrap();
        let arrivals: Vec<String> = run.records[..6].iter().map(|r| r.arrival.to_string()).collect();
        assert_eq!(arrivals, ["7.05", "7.10", "7.16", "7.21", "7.24", "7.26"]);

        let sixth = &run.records[5];
        assert_eq!(sixth.branch, StepBranch::Busy);
        assert_eq!(sixth.service_start, t("7.30"));
        assert_eq!(sixth.wait_minutes, 4);
        assert_eq!(sixth.wait_hours, 0.07);

        let twelfth = &run.records[11];
        assert_eq!(twelfth.service_start, t("7.56"));
        assert_eq!(twelfth.service_end, t("8.00"));
    }

    #[test]
    fn test_reference_aggregates() {
        let run = simulate(reference_config()).unwrap();
        let stats = &run.stats;

        assert_eq!(stats.patients, 50);
        assert_eq!(stats.total_wait_minutes, 404);
        assert_eq!(stats.total_idle_minutes, 8);
        assert_eq!(stats.patients_waited, 45);
        assert_eq!(stats.max_wait_hours, 0.32);
        assert_eq!(stats.closing_time, t("10.35"));
        assert!((stats.total_wait_hours - 6.75).abs() < 1e-9);
        assert!((stats.total_idle_hours - 0.13).abs() < 1e-9);

        let recomputed: f64 = run.records.iter().map(|r| r.wait_hours).sum();
        assert_eq!(stats.total_wait_hours, recomputed);
        assert_eq!(stats.average_wait_hours, recomputed / 50.0);
        let recomputed_idle: f64 = run.records.iter().map(|r| r.idle_hours).sum();
        assert_eq!(stats.average_idle_hours, recomputed_idle / 50.0);
    }

    #[test]
    fn test_record_invariants() {
        let run = simulate(reference_config().with_seed(427).with_patients(200)).unwrap();
        let first = &run.records[0];
        assert_eq!((first.wait_minutes, first.idle_minutes), (0, 0));

        for (i, record) in run.records.iter().enumerate() {
            assert_eq!(record.index, i);
            assert_eq!(
                record.service_end,
                record.service_start.add_minutes(record.service).unwrap()
            );
            assert!(record.service_start >= record.arrival);
            if i > 0 {
                assert!(record.wait_minutes == 0 || record.idle_minutes == 0);
                let previous = &run.records[i - 1];
                assert_eq!(
                    record.arrival,
                    previous.arrival.add_minutes(record.inter_arrival).unwrap()
                );
                match record.branch {
                    StepBranch::Busy => {
                        assert!(record.wait_minutes > 0);
                        assert_eq!(record.service_start, previous.service_end);
                    }
                    StepBranch::Idle => {
                        assert_eq!(record.wait_minutes, 0);
                        assert_eq!(record.service_start, record.arrival);
                    }
                    StepBranch::Opening => panic!("opening branch after the first arrival"),
                }
            }
        }
    }

    #[test]
    fn test_runs_are_deterministic() {
        let first = simulate(reference_config()).unwrap();
        let second = simulate(reference_config()).unwrap();
        assert_eq!(first, second);

        let simulator = QueueSimulator::new(reference_config()).unwrap();
        assert_eq!(simulator.run().unwrap(), simulator.run().unwrap());
    }

    #[test]
    fn test_different_seeds_differ() {
        let first = simulate(reference_config()).unwrap();
        let second = simulate(reference_config().with_seed(26)).unwrap();
        assert_ne!(first.records, second.records);
    }

    #[test]
    fn test_zero_patients_rejected_before_running() {
        let err = QueueSimulator::new(reference_config().with_patients(0)).unwrap_err();
        assert_eq!(err, SimulationError::DegenerateRun);
    }

    #[test]
    fn test_identical_seeds_rejected() {
        let err = simulate(reference_config().with_service_seed(REFERENCE_SEED)).unwrap_err();
        assert_eq!(
            err,
            SimulationError::Configuration(ConfigError::IdenticalSeeds { seed: 25 })
        );
    }

    #[test]
    fn test_stats_from_empty_records() {
        assert_eq!(
            SimulationStats::from_records(&[]),
            Err(SimulationError::DegenerateRun)
        );
    }

    #[test]
    fn test_short_table_falls_back_to_last_outcome() {
        let mut config = reference_config();
        config.service = short_table();
        let simulator = QueueSimulator::new(config).unwrap();
        assert!(!simulator.service_table().covers_all_draws());
        for drawn in simulator.draw_arrivals().unwrap() {
            if drawn.service_draw == 99 {
                assert_eq!(drawn.service, 3);
            }
        }
    }

    #[test]
    fn test_time_overflow_is_an_error() {
        let mut config = reference_config().with_patients(100);
        config.service = ProbabilityTable::new(vec![u32::MAX], vec![1.0]).unwrap();

        let err = simulate(config.clone()).unwrap_err();
        assert_eq!(err, SimulationError::MalformedTime(TimeError::Overflow));

        let run = simulate(config.with_patients(2)).unwrap();
        assert!(run.records[1].service_end > run.records[0].service_end);
    }

    #[traced_test]
    #[test]
    fn test_run_logs_start_and_finish() {
        simulate(reference_config().with_patients(3)).unwrap();
        assert!(logs_contain("starting queue simulation"));
        assert!(logs_contain("queue simulation finished"));
    }
}
