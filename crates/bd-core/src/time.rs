//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  The mapping to real
//! seconds is held in `SimClock`:
//!
//!   elapsed_secs = tick / ticks_per_second
//!
//! Every duration in the model (walking one aisle cell, stowing luggage,
//! reacting to a blocked row) is converted to a whole number of ticks once at
//! setup, so the tick loop itself only does integer arithmetic.

use std::fmt;

use crate::{BdError, BdResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many ticks make up one simulated second.
    pub ticks_per_second: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            ticks_per_second,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.secs_for_ticks(self.current_tick.0)
    }

    /// Seconds spanned by `ticks`.
    #[inline]
    pub fn secs_for_ticks(&self, ticks: u64) -> f64 {
        ticks as f64 / self.ticks_per_second as f64
    }

    /// How many ticks span `secs` seconds? Rounds up so a sampled delay is
    /// never shortened; negative and NaN inputs map to zero.
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        ticks_for_secs(secs, self.ticks_per_second)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s)", self.current_tick, self.elapsed_secs())
    }
}

/// Free-standing form of [`SimClock::ticks_for_secs`], usable before a clock
/// exists (profile sampling happens at setup).
pub fn ticks_for_secs(secs: f64, ticks_per_second: u32) -> u64 {
    let raw = secs * ticks_per_second as f64;
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    // Absorb float noise such as 2.0000000001 so exact multiples stay exact.
    (raw - 1e-9).ceil().max(0.0) as u64
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration consumed by the scheduler.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Seed for the per-tick activation shuffle.  `None` derives it from
    /// `seed`; set it explicitly to vary only the activation order.
    pub activation_seed: Option<u64>,

    /// Simulation resolution.  Default: 2 ticks per second.
    pub ticks_per_second: u32,

    /// Aisle walking speed in grid cells per second.  Default: 0.8.
    pub aisle_speed: f64,

    /// Hard cap on the number of ticks; a run still boarding at this point
    /// is reported as incomplete.
    pub max_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:             42,
            activation_seed:  None,
            ticks_per_second: 2,
            aisle_speed:      0.8,
            max_ticks:        2 * 60 * 60,
        }
    }
}

impl SimConfig {
    /// Reject values that would make the tick arithmetic meaningless.
    pub fn validate(&self) -> BdResult<()> {
        if self.ticks_per_second == 0 {
            return Err(BdError::Config("ticks_per_second must be positive".into()));
        }
        if !(self.aisle_speed.is_finite() && self.aisle_speed > 0.0) {
            return Err(BdError::Config(format!(
                "aisle_speed must be a positive number, got {}",
                self.aisle_speed
            )));
        }
        if self.max_ticks == 0 {
            return Err(BdError::Config("max_ticks must be positive".into()));
        }
        Ok(())
    }

    /// Ticks between two aisle steps at `aisle_speed`.  Never below 1.
    pub fn aisle_step_ticks(&self) -> u32 {
        ticks_for_secs(1.0 / self.aisle_speed, self.ticks_per_second).max(1) as u32
    }

    /// The exclusive upper bound on ticks for this run.
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.max_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.ticks_per_second)
    }
}
