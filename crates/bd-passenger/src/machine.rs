//! The per-tick passenger state machine.
//!
//! [`World`] bundles mutable borrows of everything a passenger may touch in
//! one step: the seats (occupied flags), the grid, the frozen aisle rows, and
//! the other passengers (a shuffle rewrites its members' state).  The
//! scheduler builds one per tick and calls [`World::step`] for each
//! grid-resident passenger in turn; nothing else mutates these structures
//! during a tick, so every check-then-move is atomic.

use bd_cabin::{Cell, FrozenAisle, Grid, Layout};
use bd_core::{PassengerId, SeatId, Tick};
use tracing::{debug, trace};

use crate::motion::{StepKind, next_cell};
use crate::{PassengerError, PassengerResult, PassengerState, PassengerStore, ShuffleRole, ShuffleType};

/// What a single [`World::step`] call did.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepEvent {
    /// Nothing to do this tick (queued, seated, or waiting on others).
    Idle,
    /// Wanted to move but the speed throttle has not elapsed.
    Throttled,
    /// Moved one cell.
    Moved(Cell),
    /// Wanted to move but the next cell is occupied or frozen.
    Blocked,
    /// Spent the tick stowing luggage.
    Stowing,
    /// Spent the tick reacting to blocked row-mates.
    Reacting,
    /// Blocked row-mates, but not enough free aisle to start a shuffle.
    WaitingForAisle,
    /// Started a seat shuffle as initiator.
    ShuffleStarted { shuffle_type: ShuffleType, blockers: usize },
    /// A displaced passenger reached its waypoint.
    ReachedWaypoint,
    /// Sat down in its own seat.
    Seated,
    /// A seated initiator released its frozen aisle rows.
    ShuffleResolved,
}

/// Result of looking at the seats between the aisle and a passenger's seat.
enum RowScan {
    Clear,
    /// Someone not yet seated is still moving inside the row.
    Busy,
    /// Seated row-mates in the way, nearest to the passenger's seat first.
    Blocked(Vec<PassengerId>),
}

/// Mutable view of one run's shared state for the duration of a tick.
pub struct World<'a> {
    pub now: Tick,
    /// Ticks between two aisle steps.
    pub aisle_step_ticks: u32,
    pub layout: &'a mut Layout,
    pub grid: &'a mut Grid,
    pub frozen: &'a mut FrozenAisle,
    pub passengers: &'a mut PassengerStore,
}

impl World<'_> {
    // ── Entry points ──────────────────────────────────────────────────────

    /// Put a queued passenger onto the entrance cell.
    pub fn enter(&mut self, id: PassengerId) -> PassengerResult<()> {
        let entrance = self.layout.entrance();
        self.grid.place(id, entrance)?;
        let p = self.passengers.get_mut(id)?;
        p.state = PassengerState::MovingInAisle;
        p.since_move = 0;
        p.metrics.entered_tick = Some(self.now);
        Ok(())
    }

    /// Advance one passenger by one tick.
    pub fn step(&mut self, id: PassengerId) -> PassengerResult<StepEvent> {
        let p = self.passengers.get_mut(id)?;
        if p.shuffle.is_some() {
            p.metrics.shuffle_ticks += 1;
        }
        let state = p.state;
        match state {
            PassengerState::InQueue => Ok(StepEvent::Idle),
            PassengerState::Seated => self.step_seated(id),
            PassengerState::ShufflingOut => self.step_shuffling_out(id),
            PassengerState::WaitingForShuffle => self.step_waiting(id),
            PassengerState::ShufflingIn => self.step_shuffling_in(id),
            PassengerState::MovingInAisle
            | PassengerState::LuggageStow
            | PassengerState::SeatReactionWait
            | PassengerState::MovingInRow
            | PassengerState::BlockedDetecting => self.step_boarding(id),
        }
    }

    // ── Per-state handlers ────────────────────────────────────────────────

    fn step_seated(&mut self, id: PassengerId) -> PassengerResult<StepEvent> {
        if self.passengers.get(id)?.holds_precedence() && self.try_release(id)? {
            return Ok(StepEvent::ShuffleResolved);
        }
        Ok(StepEvent::Idle)
    }

    fn step_boarding(&mut self, id: PassengerId) -> PassengerResult<StepEvent> {
        let pos = self.position(id)?;
        let seat_cell = self.passengers.get(id)?.seat_cell;

        if pos == seat_cell {
            self.sit(id)?;
            return Ok(StepEvent::Seated);
        }

        if pos.row == seat_cell.row {
            let in_aisle = self.layout.is_aisle(pos);
            let p = self.passengers.get_mut(id)?;
            if in_aisle && p.luggage_left > 0 {
                p.luggage_left -= 1;
                p.state = PassengerState::LuggageStow;
                return Ok(StepEvent::Stowing);
            }
            p.state = PassengerState::MovingInRow;
            return self.advance(id, seat_cell);
        }

        if pos.row + 1 == seat_cell.row && self.layout.is_aisle(pos) {
            match self.scan_row(id)? {
                RowScan::Busy => {
                    self.passengers.get_mut(id)?.state = PassengerState::MovingInAisle;
                    return Ok(StepEvent::Blocked);
                }
                RowScan::Blocked(blockers) => return self.prepare_shuffle(id, pos, blockers),
                RowScan::Clear => {}
            }
        }

        self.passengers.get_mut(id)?.state = PassengerState::MovingInAisle;
        self.advance(id, seat_cell)
    }

    fn step_shuffling_out(&mut self, id: PassengerId) -> PassengerResult<StepEvent> {
        let pos = self.position(id)?;
        let p = self.passengers.get_mut(id)?;
        if pos == p.target {
            p.state = PassengerState::WaitingForShuffle;
            p.target = p.seat_cell;
            return Ok(StepEvent::ReachedWaypoint);
        }
        let target = p.target;
        self.advance(id, target)
    }

    fn step_waiting(&mut self, id: PassengerId) -> PassengerResult<StepEvent> {
        let p = self.passengers.get(id)?;
        let ready = match &p.shuffle {
            // Initiator: walk in once every displaced row-mate stands on its
            // waypoint, which leaves the seat-row aisle cell clear.
            Some(role) if role.precedence => {
                let mut all_out = true;
                for &c in &role.co_shufflers {
                    all_out &= self.passengers.state(c)? == PassengerState::WaitingForShuffle;
                }
                all_out
            }
            // Displaced: walk back once everyone whose seat lies beyond ours
            // has sat down, so nobody needs to pass us again.
            Some(role) => {
                let mine = self.aisle_distance(p.seat)?;
                let mut clear = true;
                for &c in &role.co_shufflers {
                    let q = self.passengers.get(c)?;
                    clear &= q.is_seated() || self.aisle_distance(q.seat)? < mine;
                }
                clear
            }
            None => true,
        };
        if !ready {
            return Ok(StepEvent::Idle);
        }
        self.passengers.get_mut(id)?.state = PassengerState::ShufflingIn;
        self.step_shuffling_in(id)
    }

    fn step_shuffling_in(&mut self, id: PassengerId) -> PassengerResult<StepEvent> {
        let pos = self.position(id)?;
        let in_aisle = self.layout.is_aisle(pos);
        let p = self.passengers.get_mut(id)?;
        if pos == p.seat_cell {
            self.sit(id)?;
            return Ok(StepEvent::Seated);
        }
        if in_aisle && pos.row == p.seat_cell.row && p.luggage_left > 0 {
            p.luggage_left -= 1;
            return Ok(StepEvent::Stowing);
        }
        let target = p.seat_cell;
        self.advance(id, target)
    }

    // ── Shuffle protocol ──────────────────────────────────────────────────

    fn scan_row(&self, id: PassengerId) -> PassengerResult<RowScan> {
        let seat = self.passengers.get(id)?.seat;
        let mut blockers = Vec::new();
        for between in self.layout.seats_between_aisle(seat)? {
            let cell = self.layout.seat(between)?.cell;
            match self.grid.occupant(cell) {
                None => {}
                Some(q) if self.passengers.get(q)?.is_seated() => blockers.push(q),
                Some(_) => return Ok(RowScan::Busy),
            }
        }
        Ok(if blockers.is_empty() { RowScan::Clear } else { RowScan::Blocked(blockers) })
    }

    fn prepare_shuffle(
        &mut self,
        id:       PassengerId,
        pos:      Cell,
        blockers: Vec<PassengerId>,
    ) -> PassengerResult<StepEvent> {
        let seat_row = pos.row + 1;
        let last_row = seat_row + blockers.len() as u32;

        let p = self.passengers.get_mut(id)?;
        if p.reaction_left > 0 {
            p.reaction_left -= 1;
            p.state = PassengerState::SeatReactionWait;
            return Ok(StepEvent::Reacting);
        }

        let aisle_free = self.frozen.can_freeze(seat_row..=last_row)
            && (seat_row..=last_row).all(|r| self.grid.is_empty_cell(self.layout.aisle_cell(r)));
        if !aisle_free {
            p.metrics.shuffle_wait_ticks += 1;
            p.state = PassengerState::BlockedDetecting;
            return Ok(StepEvent::WaitingForAisle);
        }

        self.start_shuffle(id, seat_row, blockers)
    }

    fn start_shuffle(
        &mut self,
        id:       PassengerId,
        seat_row: u32,
        blockers: Vec<PassengerId>,
    ) -> PassengerResult<StepEvent> {
        let mut distances = Vec::with_capacity(blockers.len());
        for &b in &blockers {
            distances.push(self.aisle_distance(self.passengers.get(b)?.seat)?);
        }
        let shuffle_type = ShuffleType::classify(&distances);
        let last_row = seat_row + blockers.len() as u32;
        self.frozen.freeze(seat_row..=last_row, id)?;

        let aisle = self.layout.aisle_column();
        for (j, &b) in blockers.iter().enumerate() {
            let waypoint = Cell::new(seat_row + 1 + j as u32, aisle);
            let co_shufflers = std::iter::once(id)
                .chain(blockers.iter().copied().filter(|&o| o != b))
                .collect();
            let bp = self.passengers.get_mut(b)?;
            bp.state = PassengerState::ShufflingOut;
            bp.target = waypoint;
            bp.since_move = 0;
            bp.metrics.times_displaced += 1;
            bp.shuffle = Some(ShuffleRole {
                initiator: id,
                precedence: false,
                co_shufflers,
                waypoint: Some(waypoint),
            });
            let seat = bp.seat;
            self.layout.set_occupied(seat, false)?;
        }

        let p = self.passengers.get_mut(id)?;
        p.state = PassengerState::WaitingForShuffle;
        p.metrics.shuffle_type = shuffle_type;
        p.shuffle = Some(ShuffleRole {
            initiator: id,
            precedence: true,
            co_shufflers: blockers.clone(),
            waypoint: None,
        });

        debug!(
            initiator = %id,
            %shuffle_type,
            blockers = blockers.len(),
            rows = ?(seat_row..=last_row),
            tick = %self.now,
            "seat shuffle started"
        );
        Ok(StepEvent::ShuffleStarted { shuffle_type, blockers: blockers.len() })
    }

    /// Drop `initiator`'s aisle reservation once it is seated and none of
    /// its co-shufflers is still standing in the aisle.
    fn try_release(&mut self, initiator: PassengerId) -> PassengerResult<bool> {
        let p = self.passengers.get(initiator)?;
        if !p.is_seated() {
            return Ok(false);
        }
        let Some(role) = p.shuffle.as_ref().filter(|r| r.precedence) else {
            return Ok(false);
        };
        for &c in &role.co_shufflers {
            if self.grid.position(c).is_some_and(|cell| self.layout.is_aisle(cell)) {
                return Ok(false);
            }
        }

        let rows = self.frozen.release(initiator);
        self.passengers.get_mut(initiator)?.shuffle = None;
        debug!(initiator = %initiator, rows, tick = %self.now, "seat shuffle resolved");
        Ok(true)
    }

    // ── Primitives ────────────────────────────────────────────────────────

    fn sit(&mut self, id: PassengerId) -> PassengerResult<()> {
        let now = self.now;
        let p = self.passengers.get_mut(id)?;
        p.state = PassengerState::Seated;
        p.since_move = 0;
        p.target = p.seat_cell;
        if p.metrics.seated_tick.is_none() {
            p.metrics.seated_tick = Some(now);
        }
        let seat = p.seat;
        // Initiators keep their role until the reservation is released;
        // displaced passengers are done with it the moment they sit.
        let group = if p.holds_precedence() {
            Some(id)
        } else {
            p.shuffle.take().map(|r| r.initiator)
        };
        self.layout.set_occupied(seat, true)?;
        trace!(passenger = %id, tick = %now, "seated");
        if let Some(initiator) = group {
            self.try_release(initiator)?;
        }
        Ok(())
    }

    /// Try to take one step toward `target`, honouring the speed throttle,
    /// cell occupancy, and frozen aisle rows.
    fn advance(&mut self, id: PassengerId, target: Cell) -> PassengerResult<StepEvent> {
        let pos = self.position(id)?;
        let aisle = self.layout.aisle_column();
        let aisle_step = self.aisle_step_ticks.max(1);
        let p = self.passengers.get_mut(id)?;

        let Some((next, kind)) = next_cell(pos, target, aisle) else {
            return Ok(StepEvent::Idle);
        };
        let threshold = match kind {
            StepKind::Aisle => aisle_step,
            StepKind::Row => p.profile.row_step_ticks.max(1),
        };
        // Capped so a long wait behind someone does not bank extra steps.
        p.since_move = (p.since_move + 1).min(threshold);
        if p.since_move < threshold {
            return Ok(StepEvent::Throttled);
        }

        let frozen_out = next.col == aisle && self.frozen.blocks(next.row, p.shuffle_group());
        if frozen_out || !self.grid.is_empty_cell(next) {
            return Ok(StepEvent::Blocked);
        }
        self.grid.move_to(id, next)?;
        p.since_move = 0;
        Ok(StepEvent::Moved(next))
    }

    fn position(&self, id: PassengerId) -> PassengerResult<Cell> {
        self.grid.position(id).ok_or(PassengerError::NotOnGrid(id))
    }

    fn aisle_distance(&self, seat: SeatId) -> PassengerResult<u32> {
        Ok(self.layout.seat(seat)?.aisle_distance)
    }
}
