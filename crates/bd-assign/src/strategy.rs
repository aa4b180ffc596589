//! Built-in boarding strategies.
//!
//! Each strategy shuffles the chosen seats and then stable-sorts them by a
//! group key, so seats sharing a key board in random order.
//!
//! | Strategy          | Group key (boards first → last)                        |
//! |-------------------|--------------------------------------------------------|
//! | `BackToFront`     | seat row, descending                                   |
//! | `FrontToBack`     | seat row, ascending                                    |
//! | `RandomOrder`     | none                                                   |
//! | `SegmentedRandom` | block of consecutive rows, back block first            |
//! | `OutsideIn`       | distance from the aisle, window first                  |
//! | `SteffenPerfect`  | window → aisle; alternate rows; one side then the other; back → front |

use std::cmp::Reverse;

use bd_cabin::{Layout, Seat, Side};
use bd_core::{SeatId, SimRng};

use crate::policy::choose_seats;
use crate::{AssignError, AssignResult, SeatAssignment};

/// Pick `count` seats, shuffle, then stable-sort by `key`.
fn grouped<K: Ord>(
    layout: &Layout,
    count:  usize,
    rng:    &mut SimRng,
    key:    impl Fn(&Seat) -> K,
) -> AssignResult<Vec<SeatId>> {
    let mut ids = choose_seats(layout, count, rng)?;
    rng.shuffle(&mut ids);
    let mut seats = ids
        .into_iter()
        .map(|id| layout.seat(id).map_err(|_| AssignError::UnknownSeat(id)))
        .collect::<AssignResult<Vec<&Seat>>>()?;
    seats.sort_by_key(|s| key(s));
    Ok(seats.into_iter().map(|s| s.id).collect())
}

/// Rear rows first.
#[derive(Copy, Clone, Debug, Default)]
pub struct BackToFront;

impl SeatAssignment for BackToFront {
    fn name(&self) -> &str {
        "back_to_front"
    }

    fn order(&self, layout: &Layout, count: usize, rng: &mut SimRng) -> AssignResult<Vec<SeatId>> {
        grouped(layout, count, rng, |s| Reverse(s.row))
    }
}

/// Front rows first.
#[derive(Copy, Clone, Debug, Default)]
pub struct FrontToBack;

impl SeatAssignment for FrontToBack {
    fn name(&self) -> &str {
        "front_to_back"
    }

    fn order(&self, layout: &Layout, count: usize, rng: &mut SimRng) -> AssignResult<Vec<SeatId>> {
        grouped(layout, count, rng, |s| s.row)
    }
}

/// Uniformly random order.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomOrder;

impl SeatAssignment for RandomOrder {
    fn name(&self) -> &str {
        "random"
    }

    fn order(&self, layout: &Layout, count: usize, rng: &mut SimRng) -> AssignResult<Vec<SeatId>> {
        grouped(layout, count, rng, |_| ())
    }
}

/// The cabin is cut into `segments` blocks of consecutive rows; blocks board
/// back to front, random inside each block.
#[derive(Copy, Clone, Debug)]
pub struct SegmentedRandom {
    pub segments: u32,
}

impl Default for SegmentedRandom {
    fn default() -> Self {
        Self { segments: 3 }
    }
}

impl SeatAssignment for SegmentedRandom {
    fn name(&self) -> &str {
        "segmented_random"
    }

    fn order(&self, layout: &Layout, count: usize, rng: &mut SimRng) -> AssignResult<Vec<SeatId>> {
        if self.segments == 0 {
            return Err(AssignError::Config("segments must be positive".into()));
        }
        let rows = layout.seat_rows();
        let per_segment = rows.div_ceil(self.segments.min(rows).max(1));
        grouped(layout, count, rng, |s| Reverse(s.row / per_segment))
    }
}

/// Window seats first, then middle, then aisle; random inside each class.
#[derive(Copy, Clone, Debug, Default)]
pub struct OutsideIn;

impl SeatAssignment for OutsideIn {
    fn name(&self) -> &str {
        "outside_in"
    }

    fn order(&self, layout: &Layout, count: usize, rng: &mut SimRng) -> AssignResult<Vec<SeatId>> {
        grouped(layout, count, rng, |s| Reverse(s.aisle_distance))
    }
}

/// Steffen's method: passengers two rows apart board together so that each
/// has a free aisle stretch for its luggage.  Fully deterministic apart from
/// the choice of seats under partial occupancy.
#[derive(Copy, Clone, Debug, Default)]
pub struct SteffenPerfect;

impl SeatAssignment for SteffenPerfect {
    fn name(&self) -> &str {
        "steffen_perfect"
    }

    fn order(&self, layout: &Layout, count: usize, rng: &mut SimRng) -> AssignResult<Vec<SeatId>> {
        let last_row = layout.seat_rows() - 1;
        grouped(layout, count, rng, |s| {
            let side = match s.side {
                Side::Right => 0,
                Side::Left => 1,
            };
            (Reverse(s.aisle_distance), (last_row - s.row) % 2, side, Reverse(s.row))
        })
    }
}
