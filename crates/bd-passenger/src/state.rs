//! Passenger lifecycle states and seat-shuffle bookkeeping.

use std::fmt;

use bd_cabin::Cell;
use bd_core::PassengerId;

/// Where a passenger is in its boarding lifecycle.
///
/// `InQueue` is initial, `Seated` is terminal for ordinary boarding.  A
/// seated passenger re-enters the machine only when an arriving row-mate
/// needs it to step out (`ShufflingOut`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassengerState {
    #[default]
    InQueue,
    MovingInAisle,
    LuggageStow,
    SeatReactionWait,
    MovingInRow,
    BlockedDetecting,
    ShufflingOut,
    WaitingForShuffle,
    ShufflingIn,
    Seated,
}

impl PassengerState {
    /// `true` while the passenger belongs to an active seat shuffle.
    pub fn is_shuffling(self) -> bool {
        matches!(
            self,
            PassengerState::ShufflingOut | PassengerState::WaitingForShuffle | PassengerState::ShufflingIn
        )
    }
}

/// Classification of the situation a passenger met at its row.
///
/// | Type | Seated passengers between the aisle and the seat |
/// |------|--------------------------------------------------|
/// | A    | none                                             |
/// | B    | one, in the aisle-adjacent seat                  |
/// | C    | one, further from the aisle                      |
/// | D    | two or more                                      |
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShuffleType {
    #[default]
    A,
    B,
    C,
    D,
}

impl ShuffleType {
    /// Classify from the blockers' distances to the aisle (1 = aisle seat).
    pub fn classify(blocker_aisle_distances: &[u32]) -> Self {
        match blocker_aisle_distances {
            [] => ShuffleType::A,
            [1] => ShuffleType::B,
            [_] => ShuffleType::C,
            _ => ShuffleType::D,
        }
    }
}

impl fmt::Display for ShuffleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShuffleType::A => "A",
            ShuffleType::B => "B",
            ShuffleType::C => "C",
            ShuffleType::D => "D",
        };
        f.write_str(s)
    }
}

/// A passenger's part in one seat shuffle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShuffleRole {
    /// The blocked arrival that started the shuffle; also the key under
    /// which the aisle rows are frozen.
    pub initiator: PassengerId,
    /// `true` only for the initiator: it moves in first.
    pub precedence: bool,
    /// Every other member of the shuffle.
    pub co_shufflers: Vec<PassengerId>,
    /// Aisle cell a displaced passenger waits on; `None` for the initiator.
    pub waypoint: Option<Cell>,
}
