//! The passenger record.

use bd_cabin::Cell;
use bd_core::{PassengerId, SeatId, Tick};

use crate::{PassengerProfile, PassengerState, ShuffleRole, ShuffleType};

/// Accumulated per-passenger measurements, exposed to the metrics sink.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerMetrics {
    /// Situation met at the passenger's own row.
    pub shuffle_type: ShuffleType,
    /// Ticks spent inside a seat shuffle, as initiator or as displaced
    /// occupant.
    pub shuffle_ticks: u64,
    /// Ticks a blocked initiator waited for free aisle cells.
    pub shuffle_wait_ticks: u64,
    /// How many times this passenger was asked to step out.
    pub times_displaced: u32,
    /// Tick the passenger stepped onto the entrance cell.
    pub entered_tick: Option<Tick>,
    /// Tick the passenger first sat down in its own seat.
    pub seated_tick: Option<Tick>,
}

/// One passenger.
///
/// The grid position is not stored here: the [`bd_cabin::Grid`] is the single
/// source of truth for where everyone stands.
#[derive(Clone, Debug)]
pub struct Passenger {
    pub id: PassengerId,
    pub seat: SeatId,
    /// Grid coordinate of `seat`, cached.
    pub seat_cell: Cell,
    /// Where the passenger is heading right now: its seat, or a shuffle
    /// waypoint while stepping out.
    pub target: Cell,
    pub state: PassengerState,
    /// Tick at which the passenger joins the boarding queue.
    pub arrival_tick: Tick,
    pub profile: PassengerProfile,
    /// Remaining luggage-stow ticks.
    pub luggage_left: u32,
    /// Remaining reaction ticks before a shuffle can start.
    pub reaction_left: u32,
    /// Ticks since the last successful step, capped at the current
    /// movement's threshold.
    pub since_move: u32,
    pub shuffle: Option<ShuffleRole>,
    pub metrics: PassengerMetrics,
}

impl Passenger {
    pub fn new(id: PassengerId, seat: SeatId, seat_cell: Cell, arrival_tick: Tick, profile: PassengerProfile) -> Self {
        Self {
            id,
            seat,
            seat_cell,
            target: seat_cell,
            state: PassengerState::InQueue,
            arrival_tick,
            profile,
            luggage_left: profile.luggage_ticks,
            reaction_left: profile.reaction_ticks,
            since_move: 0,
            shuffle: None,
            metrics: PassengerMetrics::default(),
        }
    }

    #[inline]
    pub fn is_seated(&self) -> bool {
        self.state == PassengerState::Seated
    }

    /// Initiator key of the shuffle this passenger belongs to.
    #[inline]
    pub fn shuffle_group(&self) -> Option<PassengerId> {
        self.shuffle.as_ref().map(|r| r.initiator)
    }

    /// `true` for an initiator whose aisle reservation is still held.
    #[inline]
    pub fn holds_precedence(&self) -> bool {
        self.shuffle.as_ref().is_some_and(|r| r.precedence)
    }
}
