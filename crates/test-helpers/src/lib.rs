//! Test helpers for queuesim.
//!
//! The reference clinic: five inter-arrival and five service outcomes of 2-6
//! minutes, an LCG with `a = 241, c = 59, M = 10007`, seed 25, fifty patients
//! and a 7.00 opening.

use queuesim_types::{ClockTime, ProbabilityTable};

pub const REFERENCE_MULTIPLIER: u64 = 241;
pub const REFERENCE_INCREMENT: u64 = 59;
pub const REFERENCE_MODULUS: u64 = 10007;
pub const REFERENCE_SEED: u64 = 25;
pub const REFERENCE_PATIENTS: usize = 50;

/// Inter-arrival minutes and their probabilities.
pub const INTER_ARRIVAL: [(u32, f64); 5] = [(2, 0.15), (3, 0.25), (4, 0.20), (5, 0.25), (6, 0.15)];

/// Service minutes and their probabilities.
pub const SERVICE: [(u32, f64); 5] = [(2, 0.10), (3, 0.25), (4, 0.30), (5, 0.20), (6, 0.15)];

pub fn reference_inter_arrival() -> ProbabilityTable {
    ProbabilityTable::from_pairs(INTER_ARRIVAL).expect("reference inter-arrival table is valid")
}

pub fn reference_service() -> ProbabilityTable {
    ProbabilityTable::from_pairs(SERVICE).expect("reference service table is valid")
}

/// 7.00.
pub fn reference_day_start() -> ClockTime {
    ClockTime::from_hours(7)
}

/// Table whose rounded cumulative sum stops at 0.99, leaving draw 99 to the
/// fallback bucket.
pub fn short_table() -> ProbabilityTable {
    ProbabilityTable::new(vec![1, 2, 3], vec![0.33, 0.33, 0.33])
        .expect("short table is within tolerance")
}
