//! Per-arrival simulation records.

use crate::ClockTime;
use serde::{Deserialize, Serialize};

/// Which branch of the queue transition produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepBranch {
    /// First arrival of the day: served on arrival, no wait and no idle.
    Opening,
    /// Server was free when the patient arrived; idle time accrued.
    Idle,
    /// Server was still busy; the patient waited.
    Busy,
}

/// Everything computed for one arrival.
///
/// Records are produced in index order and never revised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Zero-based arrival index.
    pub index: usize,

    /// Random draw in [0, 99] used for the inter-arrival duration.
    pub arrival_draw: u32,

    /// Minutes since the previous arrival (or since the day start).
    pub inter_arrival: u32,

    pub arrival: ClockTime,

    /// Random draw in [0, 99] used for the service duration.
    pub service_draw: u32,

    /// Service duration in minutes.
    pub service: u32,

    pub service_start: ClockTime,
    pub service_end: ClockTime,

    /// Exact wait in minutes.
    pub wait_minutes: u64,

    /// Exact server idle time before this arrival, in minutes.
    pub idle_minutes: u64,

    /// Wait in decimal hours, rounded to two places.
    pub wait_hours: f64,

    /// Idle in decimal hours, rounded to two places.
    pub idle_hours: f64,

    pub branch: StepBranch,
}

impl PatientRecord {
    /// One-based patient number, as printed in reports.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Whether the patient queued before being served.
    pub fn waited(&self) -> bool {
        self.wait_minutes > 0
    }
}
