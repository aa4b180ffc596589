//! Observer trait and the metrics records it receives.

use bd_cabin::{FrozenAisle, Grid, Layout};
use bd_core::{PassengerId, Tick};
use bd_passenger::{PassengerStore, ShuffleType};

use crate::RunOutcome;

// ── Records ───────────────────────────────────────────────────────────────────

/// Aggregate state at the end of one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    pub tick: Tick,
    /// Simulated seconds elapsed once this tick completes.
    pub elapsed_secs: f64,
    /// Passengers that have not reached the door yet.
    pub pending: usize,
    /// Passengers standing in the boarding queue.
    pub queued: usize,
    /// Passengers on the grid who are not sitting in their own seat.
    pub in_cabin: usize,
    pub seated: usize,
    pub frozen_rows: usize,
    pub finished: bool,
}

/// Per-passenger outcome.  Times are in simulated seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerReport {
    pub id: PassengerId,
    pub seat: String,
    pub arrival_tick: Tick,
    pub entered_tick: Option<Tick>,
    pub seated_tick: Option<Tick>,
    pub shuffle_type: ShuffleType,
    pub shuffle_secs: f64,
    pub shuffle_wait_secs: f64,
    pub times_displaced: u32,
}

/// Everything a metrics sink needs after a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub policy: String,
    pub seed: u64,
    pub outcome: RunOutcome,
    pub boarding_secs: f64,
    pub passengers: Vec<PassengerReport>,
}

/// Read-only view of the cabin state, handed to [`SimObserver::on_snapshot`].
#[derive(Copy, Clone)]
pub struct CabinView<'a> {
    pub layout: &'a Layout,
    pub grid: &'a Grid,
    pub frozen: &'a FrozenAisle,
    pub passengers: &'a PassengerStore,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Callbacks invoked by [`BoardingSim`][crate::BoardingSim] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SimObserver for Progress {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if tick.0 % 120 == 0 {
///             println!("{tick}: {} seated, {} queued", summary.seated, summary.queued);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when a passenger steps from the queue onto the entrance cell.
    fn on_admitted(&mut self, _tick: Tick, _passenger: PassengerId) {}

    /// Called after every passenger has stepped, with full read access to
    /// the cabin.
    fn on_snapshot(&mut self, _tick: Tick, _cabin: CabinView<'_>) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called once when [`BoardingSim::run`][crate::BoardingSim::run] stops.
    fn on_run_end(&mut self, _report: &RunReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
