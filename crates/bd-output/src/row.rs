//! Plain data row types written by output backends.

use bd_core::Tick;
use bd_passenger::ShuffleType;
use bd_sim::{PassengerReport, RunReport, TickSummary};

/// Aggregate cabin state at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub elapsed_secs: f64,
    pub pending:      u64,
    pub queued:       u64,
    pub in_cabin:     u64,
    pub seated:       u64,
    pub frozen_rows:  u64,
    pub finished:     bool,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:         s.tick.0,
            elapsed_secs: s.elapsed_secs,
            pending:      s.pending as u64,
            queued:       s.queued as u64,
            in_cabin:     s.in_cabin as u64,
            seated:       s.seated as u64,
            frozen_rows:  s.frozen_rows as u64,
            finished:     s.finished,
        }
    }
}

/// One passenger's outcome, tagged with the run it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerReportRow {
    pub policy:            String,
    pub seed:              u64,
    pub passenger_id:      u32,
    pub seat:              String,
    pub arrival_tick:      u64,
    /// `None` while the passenger never left the queue.
    pub entered_tick:      Option<u64>,
    /// `None` for passengers still standing when the run stopped.
    pub seated_tick:       Option<u64>,
    pub shuffle_type:      ShuffleType,
    pub shuffle_secs:      f64,
    pub shuffle_wait_secs: f64,
    pub times_displaced:   u32,
}

impl PassengerReportRow {
    pub fn from_report(run: &RunReport, p: &PassengerReport) -> Self {
        Self {
            policy:            run.policy.clone(),
            seed:              run.seed,
            passenger_id:      p.id.0,
            seat:              p.seat.clone(),
            arrival_tick:      p.arrival_tick.0,
            entered_tick:      p.entered_tick.map(|t: Tick| t.0),
            seated_tick:       p.seated_tick.map(|t: Tick| t.0),
            shuffle_type:      p.shuffle_type,
            shuffle_secs:      p.shuffle_secs,
            shuffle_wait_secs: p.shuffle_wait_secs,
            times_displaced:   p.times_displaced,
        }
    }

    /// All rows of `run`, in passenger-id order.
    pub fn from_run(run: &RunReport) -> Vec<Self> {
        run.passengers.iter().map(|p| Self::from_report(run, p)).collect()
    }
}
