//! The `SeatAssignment` trait and the policy wrappers.

use bd_cabin::Layout;
use bd_core::{SeatId, SimRng};

use crate::{AssignError, AssignResult};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Produces the boarding order of seats.
///
/// # Contract
///
/// - Returns exactly `count` distinct seats of `layout`.
/// - All randomness comes from `rng`, so a fixed seed gives a fixed order.
/// - Implementations must be `Send + Sync` (runs are swept in parallel).
pub trait SeatAssignment: Send + Sync {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    fn order(&self, layout: &Layout, count: usize, rng: &mut SimRng) -> AssignResult<Vec<SeatId>>;
}

impl<P: SeatAssignment + ?Sized> SeatAssignment for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn order(&self, layout: &Layout, count: usize, rng: &mut SimRng) -> AssignResult<Vec<SeatId>> {
        (**self).order(layout, count, rng)
    }
}

/// `count` seats drawn uniformly at random, or all of them.
pub(crate) fn choose_seats(layout: &Layout, count: usize, rng: &mut SimRng) -> AssignResult<Vec<SeatId>> {
    let available = layout.seat_count();
    if count > available {
        return Err(AssignError::TooManyPassengers { requested: count, available });
    }
    let mut seats: Vec<SeatId> = layout.seats().iter().map(|s| s.id).collect();
    if count < available {
        rng.shuffle(&mut seats);
        seats.truncate(count);
    }
    Ok(seats)
}

// ── Explicit ──────────────────────────────────────────────────────────────────

/// A fixed, caller-supplied order.  The first `count` seats are used.
#[derive(Clone, Debug, Default)]
pub struct Explicit(pub Vec<SeatId>);

impl SeatAssignment for Explicit {
    fn name(&self) -> &str {
        "explicit"
    }

    fn order(&self, layout: &Layout, count: usize, _rng: &mut SimRng) -> AssignResult<Vec<SeatId>> {
        if count > self.0.len() {
            return Err(AssignError::TooManyPassengers { requested: count, available: self.0.len() });
        }
        let mut seen = vec![false; layout.seat_count()];
        for &seat in &self.0[..count] {
            let slot = seen.get_mut(seat.index()).ok_or(AssignError::UnknownSeat(seat))?;
            if *slot {
                return Err(AssignError::DuplicateSeat(seat));
            }
            *slot = true;
        }
        Ok(self.0[..count].to_vec())
    }
}

// ── Conformance ───────────────────────────────────────────────────────────────

/// Wraps a policy so that only `percent` % of passengers keep their place in
/// line.  The rest are picked at random and shuffled among their own
/// positions, the way non-compliant passengers would push in anywhere.
pub struct Conformance<P: SeatAssignment> {
    inner:   P,
    percent: f64,
    name:    String,
}

impl<P: SeatAssignment> Conformance<P> {
    pub fn new(inner: P, percent: f64) -> AssignResult<Self> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(AssignError::Config(format!("conformance must be within 0..=100, got {percent}")));
        }
        let name = format!("{}@{percent}%", inner.name());
        Ok(Self { inner, percent, name })
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }
}

impl<P: SeatAssignment> SeatAssignment for Conformance<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn order(&self, layout: &Layout, count: usize, rng: &mut SimRng) -> AssignResult<Vec<SeatId>> {
        let mut seats = self.inner.order(layout, count, rng)?;
        let deviating = ((100.0 - self.percent) / 100.0 * seats.len() as f64).round() as usize;
        if deviating < 2 {
            return Ok(seats);
        }

        let mut positions: Vec<usize> = (0..seats.len()).collect();
        rng.shuffle(&mut positions);
        positions.truncate(deviating);
        positions.sort_unstable();

        let mut moved: Vec<SeatId> = positions.iter().map(|&i| seats[i]).collect();
        rng.shuffle(&mut moved);
        for (&i, seat) in positions.iter().zip(moved) {
            seats[i] = seat;
        }
        Ok(seats)
    }
}

// ── Extension trait ───────────────────────────────────────────────────────────

pub trait SeatAssignmentExt: SeatAssignment + Sized {
    /// Blend this policy with random line-jumping; see [`Conformance`].
    fn with_conformance(self, percent: f64) -> AssignResult<Conformance<Self>> {
        Conformance::new(self, percent)
    }
}

impl<P: SeatAssignment> SeatAssignmentExt for P {}
