//! One-cell path stepping.
//!
//! Paths are never diagonal.  A passenger outside the aisle first walks
//! sideways to the aisle, walks along the aisle to the target row, then
//! sideways to the target column.

use bd_cabin::Cell;

/// Which throttle applies to a step.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepKind {
    /// Along the aisle (row changes).
    Aisle,
    /// Sideways inside a seat row (column changes).
    Row,
}

/// The next cell on the way from `from` to `to`, or `None` when already there.
pub fn next_cell(from: Cell, to: Cell, aisle_column: u32) -> Option<(Cell, StepKind)> {
    if from.row != to.row {
        if from.col != aisle_column {
            return Some((Cell::new(from.row, toward(from.col, aisle_column)), StepKind::Row));
        }
        return Some((Cell::new(toward(from.row, to.row), from.col), StepKind::Aisle));
    }
    if from.col != to.col {
        return Some((Cell::new(from.row, toward(from.col, to.col)), StepKind::Row));
    }
    None
}

#[inline]
fn toward(from: u32, to: u32) -> u32 {
    if to > from { from + 1 } else { from - 1 }
}
