//! `bd-arrival`: when passengers show up at the door, and in what order they
//! step aboard.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`process`] | `ArrivalConfig`, `sample_arrival_ticks`                     |
//! | [`queue`]   | `BoardingQueue` (pending `BTreeMap<Tick, Vec<PassengerId>>` + FIFO) |
//! | [`error`]   | `ArrivalError`, `ArrivalResult<T>`                          |
//!
//! # Admission model
//!
//! ```text
//! setup:      arrival_tick[i] = ⌊(Σ_{k≤i} Exp(rate)) · ticks_per_second⌋
//! every tick: pending[t ≤ now]  ──► FIFO queue (arrival order, ties by id)
//!             FIFO head          ──► entrance cell, if the cell is empty
//! ```
//!
//! Only the head of the FIFO can enter, and only one passenger per tick fits
//! on the entrance cell, so a burst of arrivals simply lengthens the queue.

pub mod error;
pub mod process;
pub mod queue;


pub use error::{ArrivalError, ArrivalResult};
pub use process::{ArrivalConfig, sample_arrival_ticks};
pub use queue::BoardingQueue;
