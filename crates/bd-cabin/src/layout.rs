//! Cabin layout: seat rows, the aisle column, and the seat → grid mapping.
//!
//! # Geometry
//!
//! ```text
//!  grid row 0                      entrance (aisle cell of row 0)
//!  grid rows 0 .. entrance_length  aisle-only rows in front of the seats
//!  grid row entrance_length + k*row_pitch   seat row k
//!  last tail_length rows           aisle-only rows behind the last seat row
//! ```
//!
//! Rows between two seat rows (when `row_pitch > 1`) have no seats; only
//! their aisle cell is walkable.  The tail exists so that passengers stepping
//! out of the last seat row always have aisle cells to wait in.

use std::fmt;

use bd_core::{PassengerId, SeatId};

use crate::{CabinError, CabinResult};

/// Largest grid (rows × columns) a layout may describe.
pub const MAX_GRID_CELLS: u64 = 1 << 24;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A grid coordinate.  `row` runs door → tail, `col` runs across the cabin.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Which side of the aisle a seat is on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

// ── LayoutConfig ─────────────────────────────────────────────────────────────

/// Dimensions of a single-aisle cabin.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Number of seat rows.
    pub seat_rows: u32,
    /// Columns per row, including the aisle column.
    pub columns: u32,
    /// Index of the aisle column.
    pub aisle_column: u32,
    /// Aisle-only grid rows between the door and the first seat row.
    pub entrance_length: u32,
    /// Grid rows per seat row (seat pitch in cells).
    pub row_pitch: u32,
    /// Aisle-only grid rows behind the last seat row.
    pub tail_length: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::airbus_a320()
    }
}

impl LayoutConfig {
    /// Airbus A320-200 single-class: 29 rows of 3-3 seating, two grid cells
    /// per seat row, six cells of entrance in front and behind.
    pub fn airbus_a320() -> Self {
        Self {
            seat_rows:       29,
            columns:         7,
            aisle_column:    3,
            entrance_length: 6,
            row_pitch:       2,
            tail_length:     6,
        }
    }

    /// Densest legal geometry: one entrance row, one grid row per seat row,
    /// and just enough tail for the widest shuffle.
    pub fn compact(seat_rows: u32, columns: u32, aisle_column: u32) -> Self {
        let mut config = Self {
            seat_rows,
            columns,
            aisle_column,
            entrance_length: 1,
            row_pitch:       1,
            tail_length:     0,
        };
        config.tail_length = config.max_blockers().max(1);
        config
    }

    /// Most seated passengers that can sit between the aisle and a seat on
    /// the wider side of the cabin.
    pub fn max_blockers(&self) -> u32 {
        let left = self.aisle_column;
        let right = self.columns.saturating_sub(self.aisle_column + 1);
        left.max(right).saturating_sub(1)
    }

    /// Total number of grid rows (door to tail).
    pub fn grid_rows(&self) -> u32 {
        self.entrance_length + self.row_pitch * self.seat_rows.saturating_sub(1) + 1 + self.tail_length
    }

    /// Number of seats (every non-aisle column of every row).
    pub fn seat_count(&self) -> usize {
        self.seat_rows as usize * self.columns.saturating_sub(1) as usize
    }

    pub fn validate(&self) -> CabinResult<()> {
        if self.seat_rows == 0 {
            return Err(CabinError::Config("seat_rows must be positive".into()));
        }
        if self.columns < 2 {
            return Err(CabinError::Config(format!(
                "columns must include the aisle and at least one seat, got {}",
                self.columns
            )));
        }
        if self.aisle_column >= self.columns {
            return Err(CabinError::Config(format!(
                "aisle_column {} out of range for {} columns",
                self.aisle_column, self.columns
            )));
        }
        if self.entrance_length == 0 {
            return Err(CabinError::Config(
                "entrance_length must be at least 1 so the first seat row has an aisle cell in front of it".into(),
            ));
        }
        if self.row_pitch == 0 {
            return Err(CabinError::Config("row_pitch must be positive".into()));
        }
        if self.tail_length < self.max_blockers() {
            return Err(CabinError::Config(format!(
                "tail_length {} leaves no room for {} passengers stepping out of the last row",
                self.tail_length,
                self.max_blockers()
            )));
        }
        // Widened so absurd inputs cannot overflow before the check.
        let rows = u128::from(self.entrance_length)
            + u128::from(self.row_pitch) * u128::from(self.seat_rows - 1)
            + 1
            + u128::from(self.tail_length);
        let cells = rows * u128::from(self.columns);
        if cells > u128::from(MAX_GRID_CELLS) {
            return Err(CabinError::Config(format!(
                "cabin grid of {rows} rows x {} columns exceeds {MAX_GRID_CELLS} cells",
                self.columns
            )));
        }
        Ok(())
    }
}

// ── Seat ──────────────────────────────────────────────────────────────────────

/// One seat.  Owned by the [`Layout`]; the passenger link is a plain id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seat {
    pub id: SeatId,
    /// Seat row index, starting from 0 at the front.
    pub row: u32,
    /// Column index in the cabin (the aisle column is never a seat).
    pub column: u32,
    /// Precomputed grid coordinate.
    pub cell: Cell,
    pub side: Side,
    /// Seats between this one and the aisle, plus one (1 = aisle seat).
    pub aisle_distance: u32,
    /// Letter used in labels (`A` for the leftmost seat column).
    pub letter: char,
    /// `true` while the assigned passenger is sitting in it.
    pub occupied: bool,
    pub assigned: Option<PassengerId>,
    /// Times `occupied` went from `false` to `true`.
    pub times_filled: u32,
    /// Times `occupied` went from `true` to `false`.
    pub times_vacated: u32,
}

impl Seat {
    /// Human-readable label, e.g. `12C`.
    pub fn label(&self) -> String {
        format!("{}{}", self.row + 1, self.letter)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row + 1, self.letter)
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// The cabin: a validated [`LayoutConfig`] plus one [`Seat`] per non-aisle
/// column of every seat row, in row-major order (`SeatId` = flat index).
#[derive(Clone, Debug)]
pub struct Layout {
    config: LayoutConfig,
    seats:  Vec<Seat>,
    /// `seat_row * columns + column` → seat.  `None` on the aisle column.
    by_position: Vec<Option<SeatId>>,
}

impl Layout {
    pub fn new(config: LayoutConfig) -> CabinResult<Self> {
        config.validate()?;

        let columns = config.columns;
        let aisle = config.aisle_column;
        let mut seats = Vec::with_capacity(config.seat_count());
        let mut by_position = vec![None; (config.seat_rows * columns) as usize];

        for row in 0..config.seat_rows {
            let grid_row = config.entrance_length + row * config.row_pitch;
            for column in (0..columns).filter(|&c| c != aisle) {
                let id = SeatId(seats.len() as u32);
                let (side, aisle_distance) = if column < aisle {
                    (Side::Left, aisle - column)
                } else {
                    (Side::Right, column - aisle)
                };
                let letter_index = if column < aisle { column } else { column - 1 };
                seats.push(Seat {
                    id,
                    row,
                    column,
                    cell: Cell::new(grid_row, column),
                    side,
                    aisle_distance,
                    letter: char::from(b'A' + (letter_index % 26) as u8),
                    occupied: false,
                    assigned: None,
                    times_filled: 0,
                    times_vacated: 0,
                });
                by_position[(row * columns + column) as usize] = Some(id);
            }
        }

        Ok(Self { config, seats, by_position })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn seat_rows(&self) -> u32 {
        self.config.seat_rows
    }

    pub fn aisle_column(&self) -> u32 {
        self.config.aisle_column
    }

    pub fn grid_rows(&self) -> u32 {
        self.config.grid_rows()
    }

    pub fn grid_columns(&self) -> u32 {
        self.config.columns
    }

    /// The door: aisle cell of grid row 0.
    #[inline]
    pub fn entrance(&self) -> Cell {
        Cell::new(0, self.config.aisle_column)
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.grid_rows() && cell.col < self.config.columns
    }

    #[inline]
    pub fn is_aisle(&self, cell: Cell) -> bool {
        cell.col == self.config.aisle_column
    }

    /// Aisle cell of grid row `row`.
    #[inline]
    pub fn aisle_cell(&self, row: u32) -> Cell {
        Cell::new(row, self.config.aisle_column)
    }

    // ── Seat lookup ───────────────────────────────────────────────────────

    /// All seats in stable row-major order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, id: SeatId) -> CabinResult<&Seat> {
        self.seats.get(id.index()).ok_or(CabinError::SeatNotFound(id))
    }

    pub fn seat_mut(&mut self, id: SeatId) -> CabinResult<&mut Seat> {
        self.seats.get_mut(id.index()).ok_or(CabinError::SeatNotFound(id))
    }

    /// Seat at `(seat_row, column)`, or `None` for the aisle / out of range.
    pub fn seat_at(&self, seat_row: u32, column: u32) -> Option<&Seat> {
        if seat_row >= self.config.seat_rows || column >= self.config.columns {
            return None;
        }
        self.by_position[(seat_row * self.config.columns + column) as usize]
            .map(|id| &self.seats[id.index()])
    }

    /// Seat whose grid coordinate is `cell`, if any.
    pub fn seat_at_cell(&self, cell: Cell) -> Option<&Seat> {
        let offset = cell.row.checked_sub(self.config.entrance_length)?;
        if offset % self.config.row_pitch != 0 {
            return None;
        }
        self.seat_at(offset / self.config.row_pitch, cell.col)
    }

    /// Seats on the same row and side strictly between the aisle and `seat`,
    /// nearest to `seat` first.
    pub fn seats_between_aisle(&self, seat: SeatId) -> CabinResult<Vec<SeatId>> {
        let target = self.seat(seat)?;
        let aisle = self.config.aisle_column;
        let columns: Vec<u32> = match target.side {
            Side::Left  => (target.column + 1..aisle).collect(),
            Side::Right => (aisle + 1..target.column).rev().collect(),
        };
        Ok(columns
            .into_iter()
            .filter_map(|c| self.seat_at(target.row, c).map(|s| s.id))
            .collect())
    }

    // ── Assignment and occupancy ──────────────────────────────────────────

    /// Link `seat` to `passenger`.  A seat can be assigned only once.
    pub fn assign(&mut self, seat: SeatId, passenger: PassengerId) -> CabinResult<()> {
        let s = self.seat_mut(seat)?;
        if let Some(to) = s.assigned {
            return Err(CabinError::SeatAlreadyAssigned { seat, to });
        }
        s.assigned = Some(passenger);
        Ok(())
    }

    /// Set the occupied flag, counting real transitions only.
    pub fn set_occupied(&mut self, seat: SeatId, occupied: bool) -> CabinResult<()> {
        let s = self.seat_mut(seat)?;
        match (s.occupied, occupied) {
            (false, true) => s.times_filled += 1,
            (true, false) => s.times_vacated += 1,
            _ => {}
        }
        s.occupied = occupied;
        Ok(())
    }

    pub fn assigned_count(&self) -> usize {
        self.seats.iter().filter(|s| s.assigned.is_some()).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.seats.iter().filter(|s| s.occupied).count()
    }

    /// `true` once every assigned seat is occupied.
    pub fn all_assigned_occupied(&self) -> bool {
        self.seats.iter().all(|s| s.assigned.is_none() || s.occupied)
    }
}
