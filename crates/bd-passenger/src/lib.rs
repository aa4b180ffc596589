//! `bd-passenger` — passenger state and the per-tick boarding state machine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`state`]     | `PassengerState`, `ShuffleType`, `ShuffleRole`               |
//! | [`profile`]   | `ProfileConfig`, `PassengerProfile` — sampled timing constants |
//! | [`passenger`] | `Passenger`, `PassengerMetrics`                              |
//! | [`store`]     | `PassengerStore` — all passengers of one run, by id          |
//! | [`motion`]    | one-cell path stepping toward a target                       |
//! | [`machine`]   | `World`, `StepEvent` — the state machine itself              |
//! | [`error`]     | `PassengerError`, `PassengerResult<T>`                       |
//!
//! # Seat shuffles
//!
//! A passenger one aisle row in front of its seat row checks the seats
//! between the aisle and its own seat.  Seated passengers there are
//! *blockers*.  If there are any, the arriving passenger (the *initiator*)
//! reserves the aisle rows from its seat row through one row per blocker,
//! unseats the blockers, and sends each to its own waypoint in that range:
//!
//! ```text
//!   row s-1   I              I waits with precedence
//!   row s     . [B2][B1][ ]  seat row: B2 aisle seat, B1 middle, I window
//!   row s+1   B1             waypoints, nearest-to-I's-seat closest
//!   row s+2   B2
//! ```
//!
//! Once every blocker stands on its waypoint the initiator walks in and sits.
//! Blockers then return farthest-seat-first.  The reservation is dropped
//! when the initiator is seated and no blocker is left in the aisle.

pub mod error;
pub mod machine;
pub mod motion;
pub mod passenger;
pub mod profile;
pub mod state;
pub mod store;


pub use error::{PassengerError, PassengerResult};
pub use machine::{StepEvent, World};
pub use passenger::{Passenger, PassengerMetrics};
pub use profile::{PassengerProfile, ProfileConfig, TriangularSecs};
pub use state::{PassengerState, ShuffleRole, ShuffleType};
pub use store::PassengerStore;
