use bd_core::SeatId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssignError {
    #[error("{requested} passengers requested but only {available} seats available")]
    TooManyPassengers { requested: usize, available: usize },

    #[error("seat {0} does not exist in this layout")]
    UnknownSeat(SeatId),

    #[error("seat {0} appears more than once")]
    DuplicateSeat(SeatId),

    #[error("assignment configuration error: {0}")]
    Config(String),
}

pub type AssignResult<T> = Result<T, AssignError>;
