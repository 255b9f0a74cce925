//! Text and JSON rendering of run and sweep results.

use crate::{SimulatorError, SweepReport};
use queuesim_simulation::SimulationRun;
use serde::Serialize;
use std::fmt;

/// Width of the rule separating the table from its summary.
pub const RULE_WIDTH: usize = 95;

const HEADERS: [(&str, usize); 10] = [
    ("No", 5),
    ("RN(IA)", 9),
    ("IA", 6),
    ("Arrival", 10),
    ("RN(ST)", 9),
    ("ST", 6),
    ("Start", 10),
    ("End", 10),
    ("Wait(hrs)", 15),
    ("Idle(hrs)", 15),
];

/// Per-patient table of a single run, followed by the run totals.
pub struct SimulationTable<'a> {
    run: &'a SimulationRun,
}

impl<'a> SimulationTable<'a> {
    pub fn new(run: &'a SimulationRun) -> Self {
        Self { run }
    }
}

impl fmt::Display for SimulationTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (title, width) in HEADERS {
            write!(f, "{title:>width$}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

        for record in &self.run.records {
            writeln!(
                f,
                "{:>5}{:>9}{:>6}{:>10}{:>9}{:>6}{:>10}{:>10}{:>15.2}{:>15.2}",
                record.number(),
                record.arrival_draw,
                record.inter_arrival,
                record.arrival.to_string(),
                record.service_draw,
                record.service,
                record.service_start.to_string(),
                record.service_end.to_string(),
                record.wait_hours,
                record.idle_hours,
            )?;
        }

        let stats = &self.run.stats;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(f, "Total waiting time: {:.2} hours", stats.total_wait_hours)?;
        writeln!(f, "Total idle time: {:.2} hours", stats.total_idle_hours)?;
        writeln!(f, "Average waiting time: {:.2} hours", stats.average_wait_hours)?;
        writeln!(f, "Average idle time: {:.2} hours", stats.average_idle_hours)
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sweep Report ---")?;
        writeln!(f, "Runs:        {}", self.runs.len())?;
        writeln!(f, "Patients:    {} per run", self.patients_per_run)?;
        writeln!(f, "Master seed: {}", self.master_seed)?;
        writeln!(f)?;
        writeln!(f, "Average wait per patient (hours):")?;
        writeln!(f, "  Mean: {:.4}", self.mean_average_wait_hours)?;
        writeln!(f, "  Min:  {:.4}", self.min_average_wait_hours)?;
        writeln!(f, "  Max:  {:.4}", self.max_average_wait_hours)?;
        writeln!(f, "Average idle per patient (hours):")?;
        writeln!(f, "  Mean: {:.4}", self.mean_average_idle_hours)?;
        writeln!(f)?;
        for (label, p) in [("Wait", self.wait_minutes), ("Idle", self.idle_minutes)] {
            writeln!(f, "{label} (minutes):")?;
            writeln!(f, "  P50:  {}", p.p50)?;
            writeln!(f, "  P90:  {}", p.p90)?;
            writeln!(f, "  P99:  {}", p.p99)?;
            writeln!(f, "  Max:  {}", p.max)?;
        }
        Ok(())
    }
}

/// Encode a report as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, SimulatorError> {
    Ok(serde_json::to_string_pretty(value)?)
}
