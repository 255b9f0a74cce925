//! The per-arrival queue transition.
//!
//! A run is a fold of [`step`] over the drawn arrivals, threading a
//! [`ServerState`] from one patient to the next. Nothing else is carried.

use queuesim_types::{ClockTime, PatientRecord, StepBranch, TimeError};
use tracing::trace;

/// Random draws and the durations they map to, for one arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawnArrival {
    pub index: usize,
    pub arrival_draw: u32,
    /// Minutes after the previous arrival.
    pub inter_arrival: u32,
    pub service_draw: u32,
    /// Service duration in minutes.
    pub service: u32,
}

/// State carried from one arrival to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// No patient has arrived yet.
    Opening { day_start: ClockTime },

    /// At least one patient has arrived.
    Running {
        last_arrival: ClockTime,
        last_service_end: ClockTime,
    },
}

impl ServerState {
    pub fn opening(day_start: ClockTime) -> Self {
        ServerState::Opening { day_start }
    }
}

/// Advance the queue by one arrival.
///
/// The first arrival is served on arrival with zero wait and zero idle. For
/// later arrivals the server is busy only if the previous service ends
/// strictly after the arrival; a service ending exactly on arrival counts as
/// idle with zero idle time.
///
/// Fails with [`TimeError::Overflow`] when a time passes the hour range.
pub fn step(
    state: ServerState,
    drawn: DrawnArrival,
) -> Result<(PatientRecord, ServerState), TimeError> {
    let (arrival, service_start, branch, idle_minutes, idle_hours) = match state {
        ServerState::Opening { day_start } => {
            let arrival = day_start.add_minutes(drawn.inter_arrival)?;
            (arrival, arrival, StepBranch::Opening, 0, 0.0)
        }
        ServerState::Running {
            last_arrival,
            last_service_end,
        } => {
            let arrival = last_arrival.add_minutes(drawn.inter_arrival)?;
            if last_service_end > arrival {
                (arrival, last_service_end, StepBranch::Busy, 0, 0.0)
            } else {
                let idle_minutes = arrival.minutes_since(last_service_end).unsigned_abs();
                let idle_hours = arrival.hours_since(last_service_end);
                (arrival, arrival, StepBranch::Idle, idle_minutes, idle_hours)
            }
        }
    };

    let wait_minutes = service_start.minutes_since(arrival).unsigned_abs();
    let wait_hours = service_start.hours_since(arrival);
    let service_end = service_start.add_minutes(drawn.service)?;

    trace!(
        index = drawn.index,
        %arrival,
        %service_start,
        %service_end,
        ?branch,
        "advanced queue"
    );

    let record = PatientRecord {
        index: drawn.index,
        arrival_draw: drawn.arrival_draw,
        inter_arrival: drawn.inter_arrival,
        arrival,
        service_draw: drawn.service_draw,
        service: drawn.service,
        service_start,
        service_end,
        wait_minutes,
        idle_minutes,
        wait_hours,
        idle_hours,
        branch,
    };
    let next = ServerState::Running {
        last_arrival: arrival,
        last_service_end: service_end,
    };
    Ok((record, next))
}
