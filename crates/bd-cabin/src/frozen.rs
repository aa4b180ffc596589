//! Aisle cells reserved by an in-progress seat shuffle.
//!
//! Each aisle row holds at most one owner: the initiator of the shuffle that
//! froze it.  Members of that shuffle may walk through the row; everyone else
//! treats it as blocked.  Reservations are all-or-nothing, so two shuffles
//! never hold overlapping ranges.

use std::ops::RangeInclusive;

use bd_core::PassengerId;

use crate::{CabinError, CabinResult};

#[derive(Clone, Debug)]
pub struct FrozenAisle {
    rows: Vec<Option<PassengerId>>,
}

impl FrozenAisle {
    pub fn new(grid_rows: u32) -> Self {
        Self { rows: vec![None; grid_rows as usize] }
    }

    pub fn is_frozen(&self, row: u32) -> bool {
        self.owner(row).is_some()
    }

    /// Initiator holding `row`, if any.
    pub fn owner(&self, row: u32) -> Option<PassengerId> {
        self.rows.get(row as usize).copied().flatten()
    }

    /// `true` if `row` is frozen by a shuffle other than `group`.
    ///
    /// `group` is the initiator of the shuffle the caller belongs to, or
    /// `None` for passengers outside any shuffle.
    #[inline]
    pub fn blocks(&self, row: u32, group: Option<PassengerId>) -> bool {
        match self.owner(row) {
            None => false,
            Some(owner) => Some(owner) != group,
        }
    }

    /// `true` if every row in `rows` exists and is unfrozen.
    pub fn can_freeze(&self, rows: RangeInclusive<u32>) -> bool {
        rows.into_iter().all(|r| (r as usize) < self.rows.len() && !self.is_frozen(r))
    }

    /// Reserve `rows` for `owner`.  Fails without side effects if any row is
    /// already held.
    pub fn freeze(&mut self, rows: RangeInclusive<u32>, owner: PassengerId) -> CabinResult<()> {
        for r in rows.clone() {
            match self.rows.get(r as usize) {
                None => {
                    return Err(CabinError::Config(format!("aisle row {r} does not exist")));
                }
                Some(Some(held)) => {
                    return Err(CabinError::FrozenConflict { row: r, owner: *held });
                }
                Some(None) => {}
            }
        }
        for r in rows {
            self.rows[r as usize] = Some(owner);
        }
        Ok(())
    }

    /// Clear every row held by `owner`; returns how many were released.
    pub fn release(&mut self, owner: PassengerId) -> usize {
        let mut released = 0;
        for slot in self.rows.iter_mut().filter(|s| **s == Some(owner)) {
            *slot = None;
            released += 1;
        }
        released
    }

    /// Rows currently frozen, ascending.
    pub fn frozen_rows(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_some())
            .map(|(r, _)| r as u32)
    }

    pub fn frozen_count(&self) -> usize {
        self.rows.iter().filter(|o| o.is_some()).count()
    }

    /// Per-row boolean view.
    pub fn flags(&self) -> Vec<bool> {
        self.rows.iter().map(Option::is_some).collect()
    }
}
