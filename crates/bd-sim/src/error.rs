use bd_arrival::ArrivalError;
use bd_assign::AssignError;
use bd_cabin::CabinError;
use bd_core::BdError;
use bd_passenger::PassengerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{requested} passengers requested but the cabin has {seats} seats")]
    TooManyPassengers { requested: usize, seats: usize },

    #[error("{what} length {got} does not match passenger count {expected}")]
    PassengerCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] BdError),

    #[error("cabin error: {0}")]
    Cabin(#[from] CabinError),

    #[error("passenger error: {0}")]
    Passenger(#[from] PassengerError),

    #[error("arrival error: {0}")]
    Arrival(#[from] ArrivalError),

    #[error("seat assignment error: {0}")]
    Assign(#[from] AssignError),
}

pub type SimResult<T> = Result<T, SimError>;
