//! `bd-sim` — the boarding scheduler.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.max_ticks, until finished:
//!   ① Arrivals   — passengers whose arrival tick is due join the FIFO queue.
//!   ② Admission  — the queue head steps onto the entrance cell, if it is empty.
//!   ③ Activation — every grid-resident passenger runs one state-machine
//!                  step, in an order reshuffled every tick.
//!   ④ Metrics    — a TickSummary goes to the observer.
//!   ⑤ Finish     — queue empty and every assigned seat occupied.
//! ```
//!
//! Everything runs on the calling thread.  Independent runs share nothing, so
//! parameter sweeps parallelise across runs instead.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bd_assign::BackToFront;
//! use bd_core::SimConfig;
//! use bd_sim::{NoopObserver, PassengerCount, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default())
//!     .passengers(PassengerCount::Occupancy(0.85))
//!     .policy(BackToFront)
//!     .build()?;
//! let outcome = sim.run(&mut NoopObserver)?;
//! println!("{outcome}");
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::{PassengerCount, SimBuilder};
pub use error::{SimError, SimResult};
pub use observer::{CabinView, NoopObserver, PassengerReport, RunReport, SimObserver, TickSummary};
pub use sim::{BoardingSim, RunOutcome};
