//! Clinic Queue Simulator
//!
//! Outer layer on top of `queuesim-simulation`: file and CLI configuration,
//! Monte-Carlo sweeps over many seed pairs, and text/JSON reports.
//!
//! # Architecture
//!
//! - **Configuration**: `SimulatorConfig` with reference-clinic defaults,
//!   `with_*` builders and TOML loading
//! - **Sweeps**: seed pairs derived from a master seed, runs executed in
//!   parallel, results kept in run order
//! - **Metrics**: wait and idle percentiles across every patient of a sweep
//! - **Reports**: per-patient table, sweep summary, JSON
//!
//! # Example
//!
//! ```ignore
//! use queuesim_simulator::{SimulationTable, SimulatorConfig, Sweep};
//! use queuesim_simulation::simulate;
//!
//! let config = SimulatorConfig::new().with_patients(78).with_seed(427);
//! let run = simulate(config.to_queue_config()?)?;
//! println!("{}", SimulationTable::new(&run));
//!
//! let report = Sweep::from_config(&config, 100)?.with_master_seed(7).run()?;
//! println!("P99 wait: {} min", report.wait_minutes.p99);
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod sweep;

pub use config::{SimulatorConfig, TableConfig};
pub use error::SimulatorError;
pub use metrics::{MetricsCollector, Percentiles};
pub use report::{to_json, SimulationTable, RULE_WIDTH};
pub use sweep::{RunSummary, Sweep, SweepReport};
