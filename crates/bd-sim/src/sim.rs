//! The `BoardingSim` struct and its tick loop.

use std::fmt;

use bd_arrival::BoardingQueue;
use bd_cabin::{FrozenAisle, Grid, Layout};
use bd_core::{PassengerId, SimClock, SimConfig, SimRng, Tick};
use bd_passenger::{PassengerStore, World};
use tracing::{debug, info, trace, warn};

use crate::{CabinView, NoopObserver, PassengerReport, RunReport, SimObserver, SimResult, TickSummary};

// ── RunOutcome ────────────────────────────────────────────────────────────────

/// How a run ended.  Running out of ticks is a result, not an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOutcome {
    /// Everyone seated after `ticks` ticks.
    Complete { ticks: u64 },
    /// `max_ticks` ran out with passengers still standing.
    Incomplete { ticks: u64 },
}

impl RunOutcome {
    pub fn is_complete(self) -> bool {
        matches!(self, RunOutcome::Complete { .. })
    }

    /// Ticks executed.
    pub fn ticks(self) -> u64 {
        match self {
            RunOutcome::Complete { ticks } | RunOutcome::Incomplete { ticks } => ticks,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Complete { ticks } => write!(f, "complete after {ticks} ticks"),
            RunOutcome::Incomplete { ticks } => write!(f, "incomplete after {ticks} ticks"),
        }
    }
}

// ── BoardingSim ───────────────────────────────────────────────────────────────

/// One boarding run: the cabin, its passengers, and the queue outside.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct BoardingSim {
    pub config: SimConfig,
    pub clock: SimClock,
    pub layout: Layout,
    pub grid: Grid,
    pub frozen: FrozenAisle,
    pub passengers: PassengerStore,
    pub queue: BoardingQueue,

    pub(crate) policy_name: String,
    pub(crate) aisle_step_ticks: u32,
    /// Drives the per-tick activation shuffle only.
    pub(crate) activation_rng: SimRng,
    pub(crate) finished_tick: Option<Tick>,
    /// Reused activation-order buffer.
    pub(crate) order: Vec<PassengerId>,
}

impl BoardingSim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until everyone is seated or `config.max_ticks` is reached.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunOutcome> {
        info!(
            policy = %self.policy_name,
            passengers = self.passengers.len(),
            seed = self.config.seed,
            "boarding run started"
        );
        let end = self.config.end_tick();
        while self.finished_tick.is_none() && self.clock.current_tick < end {
            self.step_with(observer)?;
        }

        let outcome = self.outcome();
        let report = self.report();
        match outcome {
            RunOutcome::Complete { ticks } => info!(
                policy = %self.policy_name,
                ticks,
                secs = report.boarding_secs,
                "boarding complete"
            ),
            RunOutcome::Incomplete { ticks } => warn!(
                policy = %self.policy_name,
                ticks,
                seated = self.passengers.seated_count(),
                passengers = self.passengers.len(),
                "boarding incomplete at tick limit"
            ),
        }
        observer.on_run_end(&report);
        Ok(outcome)
    }

    /// Run exactly one tick without callbacks.
    pub fn step(&mut self) -> SimResult<TickSummary> {
        self.step_with(&mut NoopObserver)
    }

    /// Run exactly one tick.
    pub fn step_with<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickSummary> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick(now, observer)?;
        self.clock.advance();

        let summary = self.summary(now);
        observer.on_snapshot(now, self.cabin());
        observer.on_tick_end(now, &summary);
        Ok(summary)
    }

    /// `true` once the finish condition has been met.
    pub fn is_finished(&self) -> bool {
        self.finished_tick.is_some()
    }

    /// The tick during which the last passenger sat down.
    pub fn finished_tick(&self) -> Option<Tick> {
        self.finished_tick
    }

    pub fn policy_name(&self) -> &str {
        &self.policy_name
    }

    /// Outcome so far: complete once finished, otherwise incomplete.
    pub fn outcome(&self) -> RunOutcome {
        let ticks = self.clock.current_tick.0;
        match self.finished_tick {
            Some(t) => RunOutcome::Complete { ticks: t.0 + 1 },
            None => RunOutcome::Incomplete { ticks },
        }
    }

    pub fn cabin(&self) -> CabinView<'_> {
        CabinView {
            layout: &self.layout,
            grid: &self.grid,
            frozen: &self.frozen,
            passengers: &self.passengers,
        }
    }

    /// Per-passenger metrics and the overall boarding time.
    pub fn report(&self) -> RunReport {
        let outcome = self.outcome();
        let passengers = self
            .passengers
            .iter()
            .map(|p| PassengerReport {
                id: p.id,
                seat: self.layout.seat(p.seat).map(|s| s.label()).unwrap_or_default(),
                arrival_tick: p.arrival_tick,
                entered_tick: p.metrics.entered_tick,
                seated_tick: p.metrics.seated_tick,
                shuffle_type: p.metrics.shuffle_type,
                shuffle_secs: self.clock.secs_for_ticks(p.metrics.shuffle_ticks),
                shuffle_wait_secs: self.clock.secs_for_ticks(p.metrics.shuffle_wait_ticks),
                times_displaced: p.metrics.times_displaced,
            })
            .collect();
        RunReport {
            policy: self.policy_name.clone(),
            seed: self.config.seed,
            outcome,
            boarding_secs: self.clock.secs_for_ticks(outcome.ticks()),
            passengers,
        }
    }

    /// Aggregate counts as of the end of `tick`.
    pub fn summary(&self, tick: Tick) -> TickSummary {
        let seated = self.passengers.seated_count();
        TickSummary {
            tick,
            elapsed_secs: self.clock.secs_for_ticks(tick.0 + 1),
            pending: self.queue.pending_len(),
            queued: self.queue.waiting_len(),
            in_cabin: self.grid.len() - seated,
            seated,
            frozen_rows: self.frozen.frozen_count(),
            finished: self.finished_tick.is_some(),
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        // Split borrows so `World` can hold the cabin while the queue and
        // RNG stay usable.
        let queue = &mut self.queue;
        let order = &mut self.order;
        let mut world = World {
            now,
            aisle_step_ticks: self.aisle_step_ticks,
            layout: &mut self.layout,
            grid: &mut self.grid,
            frozen: &mut self.frozen,
            passengers: &mut self.passengers,
        };

        // ── Phase 1: arrivals join the queue ──────────────────────────────
        queue.release_due(now);

        // ── Phase 2: admit the queue head ─────────────────────────────────
        let entrance = world.layout.entrance();
        if world.grid.is_empty_cell(entrance) {
            if let Some(head) = queue.pop_front() {
                world.enter(head)?;
                debug!(passenger = %head, tick = %now, queued = queue.waiting_len(), "admitted");
                observer.on_admitted(now, head);
            }
        }

        // ── Phase 3: randomized activation ────────────────────────────────
        //
        // Sorting first makes the shuffle depend only on who is aboard, not
        // on grid iteration order.
        order.clear();
        order.extend(world.grid.occupants().map(|(_, p)| p));
        order.sort_unstable();
        self.activation_rng.shuffle(order);
        for &id in order.iter() {
            world.step(id)?;
        }

        // ── Phase 4: finish check ─────────────────────────────────────────
        if self.finished_tick.is_none() && queue.is_empty() && world.layout.all_assigned_occupied() {
            self.finished_tick = Some(now);
        }
        trace!(
            tick = %now,
            aboard = order.len(),
            frozen = world.frozen.frozen_count(),
            "tick processed"
        );
        Ok(())
    }
}
