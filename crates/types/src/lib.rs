//! Core types for the single-server queue simulation.
//!
//! - [`ClockTime`]: hours and minutes, with the packed `7.05` notation at
//!   the boundary
//! - [`ProbabilityTable`]: a validated discrete distribution over minute
//!   durations
//! - [`PatientRecord`]: the per-arrival output of a simulation run

mod clock;
mod record;
mod table;

pub use clock::{decompose, round_hundredths, ClockTime, TimeError, MINUTES_PER_HOUR};
pub use record::{PatientRecord, StepBranch};
pub use table::{ProbabilityTable, TableError, PROBABILITY_SUM_TOLERANCE};
