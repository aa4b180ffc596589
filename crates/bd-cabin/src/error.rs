//! Cabin-subsystem error type.

use thiserror::Error;

use bd_core::{PassengerId, SeatId};

use crate::Cell;

/// Errors produced by `bd-cabin`.
///
/// `Config` is a setup error.  Every other variant means a caller tried to
/// break a grid or seat invariant; the simulator checks before it acts, so
/// these indicate a bug rather than a modelling outcome.
#[derive(Debug, Error)]
pub enum CabinError {
    #[error("layout configuration error: {0}")]
    Config(String),

    #[error("cell {0} is outside the cabin grid")]
    OutOfBounds(Cell),

    #[error("cell {cell} is already occupied by {by}")]
    Occupied { cell: Cell, by: PassengerId },

    #[error("passenger {0} is not on the grid")]
    NotPlaced(PassengerId),

    #[error("passenger {0} is already on the grid")]
    AlreadyPlaced(PassengerId),

    #[error("seat {0} not found")]
    SeatNotFound(SeatId),

    #[error("seat {seat} is already assigned to {to}")]
    SeatAlreadyAssigned { seat: SeatId, to: PassengerId },

    #[error("aisle row {row} is frozen by the shuffle of {owner}")]
    FrozenConflict { row: u32, owner: PassengerId },
}

pub type CabinResult<T> = Result<T, CabinError>;
