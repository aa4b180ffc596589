//! `bd-assign` — boarding strategies.
//!
//! A policy decides which seats are filled and in what order their
//! passengers reach the door.  The simulator zips the returned list with its
//! passengers: position `i` in the list becomes `PassengerId(i)`, and
//! arrival ticks are handed out in the same order.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`policy`]   | `SeatAssignment` trait, `SeatAssignmentExt`, `Explicit`, `Conformance` |
//! | [`strategy`] | `BackToFront`, `FrontToBack`, `RandomOrder`, `SegmentedRandom`, `OutsideIn`, `SteffenPerfect` |
//! | [`kind`]     | `PolicyKind` — serialisable policy selector                  |
//! | [`error`]    | `AssignError`, `AssignResult<T>`                             |
//!
//! # Partial occupancy
//!
//! When fewer passengers than seats board, every built-in strategy first
//! draws a uniformly random subset of seats and then orders that subset.

pub mod error;
pub mod kind;
pub mod policy;
pub mod strategy;


pub use error::{AssignError, AssignResult};
pub use kind::PolicyKind;
pub use policy::{Conformance, Explicit, SeatAssignment, SeatAssignmentExt};
pub use strategy::{BackToFront, FrontToBack, OutsideIn, RandomOrder, SegmentedRandom, SteffenPerfect};
