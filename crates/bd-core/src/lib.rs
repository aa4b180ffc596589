//! `bd-core` — foundational types for the `rust_boarding` simulator.
//!
//! This crate is a dependency of every other `bd-*` crate.  It has no `bd-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PassengerId`, `SeatId`                               |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `PassengerRng` (per-passenger), `SimRng` (global)     |
//! | [`error`]       | `BdError`, `BdResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BdError, BdResult};
pub use ids::{PassengerId, SeatId};
pub use rng::{PassengerRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
