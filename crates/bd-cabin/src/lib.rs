//! `bd-cabin` — the static cabin description and the shared spatial state.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`layout`]  | `LayoutConfig`, `Layout`, `Seat`, `Cell`, `Side`            |
//! | [`grid`]    | `Grid` — single-occupancy coordinate → passenger mapping    |
//! | [`frozen`]  | `FrozenAisle` — per-row aisle reservations held by shuffles |
//! | [`error`]   | `CabinError`, `CabinResult<T>`                              |
//!
//! # Coordinates
//!
//! A [`Cell`] is `(row, col)`: `row` runs along the fuselage from the door
//! (row 0) to the tail, `col` runs across the cabin.  The aisle is one column
//! wide; grid row 0's aisle cell is the entrance.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod frozen;
pub mod grid;
pub mod layout;

#[cfg(test)]
mod tests;

pub use error::{CabinError, CabinResult};
pub use frozen::FrozenAisle;
pub use grid::Grid;
pub use layout::{Cell, Layout, LayoutConfig, MAX_GRID_CELLS, Seat, Side};
