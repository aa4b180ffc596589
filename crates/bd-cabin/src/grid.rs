//! Single-occupancy grid.
//!
//! Two parallel indexes are kept in lockstep: `cells` (coordinate → occupant)
//! and `positions` (passenger → coordinate).  Every mutating method checks
//! first and writes second, so a failed call leaves both untouched and the
//! grid can never hold two passengers on one cell.

use bd_core::PassengerId;

use crate::{CabinError, CabinResult, Cell, Layout};

pub struct Grid {
    rows:      u32,
    columns:   u32,
    /// Row-major occupancy: `cells[row * columns + col]`.
    cells:     Vec<Option<PassengerId>>,
    /// Indexed by `PassengerId`; `None` while queued.
    positions: Vec<Option<Cell>>,
    placed:    usize,
}

impl Grid {
    /// An empty `rows × columns` grid with room for `passengers` ids.
    pub fn new(rows: u32, columns: u32, passengers: usize) -> Self {
        Self {
            rows,
            columns,
            cells:     vec![None; (rows * columns) as usize],
            positions: vec![None; passengers],
            placed:    0,
        }
    }

    /// A grid sized to `layout`.
    pub fn for_layout(layout: &Layout, passengers: usize) -> Self {
        Self::new(layout.grid_rows(), layout.grid_columns(), passengers)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of passengers currently on the grid.
    pub fn len(&self) -> usize {
        self.placed
    }

    pub fn is_empty(&self) -> bool {
        self.placed == 0
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.columns
    }

    #[inline]
    fn slot(&self, cell: Cell) -> usize {
        (cell.row * self.columns + cell.col) as usize
    }

    /// `true` if `cell` is inside the grid and nobody stands on it.
    #[inline]
    pub fn is_empty_cell(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.cells[self.slot(cell)].is_none()
    }

    /// Who stands on `cell`, if anyone.
    pub fn occupant(&self, cell: Cell) -> Option<PassengerId> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.cells[self.slot(cell)]
    }

    /// Where `passenger` stands, or `None` while still queued.
    pub fn position(&self, passenger: PassengerId) -> Option<Cell> {
        self.positions.get(passenger.index()).copied().flatten()
    }

    fn check_free(&self, cell: Cell) -> CabinResult<()> {
        if !self.in_bounds(cell) {
            return Err(CabinError::OutOfBounds(cell));
        }
        match self.cells[self.slot(cell)] {
            Some(by) => Err(CabinError::Occupied { cell, by }),
            None => Ok(()),
        }
    }

    fn ensure_capacity(&mut self, passenger: PassengerId) {
        if passenger.index() >= self.positions.len() {
            self.positions.resize(passenger.index() + 1, None);
        }
    }

    /// Put a passenger that is not yet on the grid onto `cell`.
    pub fn place(&mut self, passenger: PassengerId, cell: Cell) -> CabinResult<()> {
        if self.position(passenger).is_some() {
            return Err(CabinError::AlreadyPlaced(passenger));
        }
        self.check_free(cell)?;
        self.ensure_capacity(passenger);
        let slot = self.slot(cell);
        self.cells[slot] = Some(passenger);
        self.positions[passenger.index()] = Some(cell);
        self.placed += 1;
        Ok(())
    }

    /// Vacate the passenger's current cell and occupy `cell` in one step.
    ///
    /// Moving onto the cell the passenger already stands on is a no-op.
    pub fn move_to(&mut self, passenger: PassengerId, cell: Cell) -> CabinResult<()> {
        let from = self.position(passenger).ok_or(CabinError::NotPlaced(passenger))?;
        if from == cell {
            return Ok(());
        }
        self.check_free(cell)?;
        let (from_slot, to_slot) = (self.slot(from), self.slot(cell));
        self.cells[from_slot] = None;
        self.cells[to_slot] = Some(passenger);
        self.positions[passenger.index()] = Some(cell);
        Ok(())
    }

    /// Take the passenger off the grid, returning the cell it stood on.
    pub fn remove(&mut self, passenger: PassengerId) -> CabinResult<Cell> {
        let from = self.position(passenger).ok_or(CabinError::NotPlaced(passenger))?;
        let slot = self.slot(from);
        self.cells[slot] = None;
        self.positions[passenger.index()] = None;
        self.placed -= 1;
        Ok(from)
    }

    /// Every `(cell, passenger)` pair on the grid, in row-major cell order.
    pub fn occupants(&self) -> impl Iterator<Item = (Cell, PassengerId)> + '_ {
        let columns = self.columns;
        self.cells.iter().enumerate().filter_map(move |(i, occ)| {
            occ.map(|p| (Cell::new(i as u32 / columns, i as u32 % columns), p))
        })
    }

    /// Every coordinate of the grid, row-major.
    pub fn coords(&self) -> impl Iterator<Item = Cell> + '_ {
        let columns = self.columns;
        (0..self.rows).flat_map(move |r| (0..columns).map(move |c| Cell::new(r, c)))
    }
}
