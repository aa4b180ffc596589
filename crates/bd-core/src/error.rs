//! Base error type.
//!
//! Sub-crates define their own error enums and either convert into `BdError`
//! or wrap it as one variant, whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `bd-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum BdError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("index {index} does not fit in a {kind}")]
    IdOutOfRange { kind: &'static str, index: usize },
}

/// Shorthand result type for `bd-core`.
pub type BdResult<T> = Result<T, BdError>;
