//! Per-passenger timing constants, sampled once at setup.
//!
//! | Quantity              | Distribution                                  |
//! |-----------------------|-----------------------------------------------|
//! | luggage stow time     | Weibull(scale, shape) × bags, bags ∈ {0,1,2}  |
//! | seat reaction time    | Triangular(min, mode, max)                    |
//! | in-row step time      | Triangular(min, mode, max)                    |
//!
//! All samples are in seconds and converted to ticks with
//! [`bd_core::time::ticks_for_secs`] (rounded up).

use rand::distributions::WeightedIndex;
use rand_distr::{Triangular, Weibull};

use bd_core::PassengerRng;
use bd_core::time::ticks_for_secs;

use crate::{PassengerError, PassengerResult};

/// Parameters of a triangular distribution in seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangularSecs {
    pub min:  f64,
    pub mode: f64,
    pub max:  f64,
}

impl TriangularSecs {
    pub const fn new(min: f64, mode: f64, max: f64) -> Self {
        Self { min, mode, max }
    }

    /// A point mass at `secs`.
    pub const fn fixed(secs: f64) -> Self {
        Self { min: secs, mode: secs, max: secs }
    }

    fn sample(&self, rng: &mut PassengerRng, what: &str) -> PassengerResult<f64> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min >= 0.0) {
            return Err(PassengerError::Config(format!("{what}: bounds must be finite and non-negative")));
        }
        if self.min == self.max && self.mode == self.min {
            return Ok(self.min);
        }
        let dist = Triangular::new(self.min, self.max, self.mode)
            .map_err(|e| PassengerError::Config(format!("{what}: {e}")))?;
        Ok(rng.sample(&dist))
    }
}

/// Distributions every passenger's profile is drawn from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileConfig {
    /// Weibull scale (seconds) of stowing one bag.
    pub luggage_scale_secs: f64,
    /// Weibull shape of stowing one bag.
    pub luggage_shape: f64,
    /// Relative weights of carrying 0, 1 or 2 bags.
    pub bag_weights: [f64; 3],
    /// Time to get up when a row-mate needs to pass.
    pub reaction_secs: TriangularSecs,
    /// Time to move one cell sideways inside a seat row.
    pub row_step_secs: TriangularSecs,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            luggage_scale_secs: 7.0,
            luggage_shape:      1.7,
            bag_weights:        [0.2, 0.6, 0.2],
            reaction_secs:      TriangularSecs::new(1.0, 2.0, 4.0),
            row_step_secs:      TriangularSecs::new(0.5, 1.0, 2.0),
        }
    }
}

impl ProfileConfig {
    /// No luggage, no reaction delay, one tick per sideways step.
    pub fn instant() -> Self {
        Self {
            luggage_scale_secs: 1.0,
            luggage_shape:      1.0,
            bag_weights:        [1.0, 0.0, 0.0],
            reaction_secs:      TriangularSecs::fixed(0.0),
            row_step_secs:      TriangularSecs::fixed(0.0),
        }
    }

    /// Draw one passenger's profile.
    pub fn sample(&self, rng: &mut PassengerRng, ticks_per_second: u32) -> PassengerResult<PassengerProfile> {
        let bag_dist = WeightedIndex::new(self.bag_weights)
            .map_err(|e| PassengerError::Config(format!("bag_weights: {e}")))?;
        let bags = rng.sample(&bag_dist) as u8;

        let luggage_secs = if bags == 0 {
            0.0
        } else {
            let weibull = Weibull::new(self.luggage_scale_secs, self.luggage_shape)
                .map_err(|e| PassengerError::Config(format!("luggage Weibull: {e}")))?;
            rng.sample(&weibull) * bags as f64
        };

        let reaction_secs = self.reaction_secs.sample(rng, "reaction_secs")?;
        let row_step_secs = self.row_step_secs.sample(rng, "row_step_secs")?;

        Ok(PassengerProfile {
            bags,
            luggage_ticks:  ticks_for_secs(luggage_secs, ticks_per_second) as u32,
            reaction_ticks: ticks_for_secs(reaction_secs, ticks_per_second) as u32,
            row_step_ticks: (ticks_for_secs(row_step_secs, ticks_per_second) as u32).max(1),
        })
    }
}

/// Fixed timing constants of one passenger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerProfile {
    pub bags: u8,
    /// Ticks spent stowing luggage at the seat row.
    pub luggage_ticks: u32,
    /// Ticks of hesitation before starting a seat shuffle.
    pub reaction_ticks: u32,
    /// Ticks per sideways cell inside a seat row.  Always ≥ 1.
    pub row_step_ticks: u32,
}

impl PassengerProfile {
    /// Zero delays and the fastest in-row speed.
    pub const fn instant() -> Self {
        Self { bags: 0, luggage_ticks: 0, reaction_ticks: 0, row_step_ticks: 1 }
    }
}

impl Default for PassengerProfile {
    fn default() -> Self {
        Self::instant()
    }
}
