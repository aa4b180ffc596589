use bd_core::BdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrivalError {
    #[error("arrival configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] BdError),
}

pub type ArrivalResult<T> = Result<T, ArrivalError>;
