//! Deterministic single-server queue simulation.
//!
//! Given the same configuration, a run produces identical records every
//! time. Arrivals are processed strictly one at a time in arrival order.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    QueueSimulator                       │
//! │                                                         │
//! │  ┌──────────────────────┐   ┌──────────────────────┐    │
//! │  │ RandomStream (seed)  │   │ RandomStream (seed') │    │
//! │  └──────────┬───────────┘   └──────────┬───────────┘    │
//! │             ▼                          ▼                │
//! │  ┌──────────────────────┐   ┌──────────────────────┐    │
//! │  │ DistributionTable    │   │ DistributionTable    │    │
//! │  │ (inter-arrival)      │   │ (service)            │    │
//! │  └──────────┬───────────┘   └──────────┬───────────┘    │
//! │             └────────────┬─────────────┘                │
//! │                          ▼                              │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │  step(ServerState, DrawnArrival)                   │ │
//! │  │     -> (PatientRecord, ServerState)                │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           ▼                             │
//! │          Vec<PatientRecord> + SimulationStats           │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod config;
mod distribution;
mod error;
mod lcg;
mod runner;
mod transition;

pub use config::QueueConfig;
pub use distribution::{build_cumulative, build_ranges, resolve, CumulativeRange, DistributionTable};
pub use error::{ConfigError, SimulationError};
pub use lcg::{LcgParams, RandomStream, DRAW_RANGE};
pub use runner::{simulate, QueueSimulator, SimulationRun, SimulationStats};
pub use transition::{step, DrawnArrival, ServerState};
