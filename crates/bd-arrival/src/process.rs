//! Cumulative exponential arrival process.

use rand_distr::Exp;

use bd_core::time::ticks_for_secs;
use bd_core::{SimRng, Tick};

use crate::{ArrivalError, ArrivalResult};

/// Parameters of the arrival process.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalConfig {
    /// Mean arrivals per second.  `f64::INFINITY` puts everyone at the door
    /// at tick 0.
    pub rate_per_sec: f64,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self { rate_per_sec: 0.5 }
    }
}

impl ArrivalConfig {
    /// Everybody is already waiting when boarding opens.
    pub fn all_at_once() -> Self {
        Self { rate_per_sec: f64::INFINITY }
    }

    pub fn validate(&self) -> ArrivalResult<()> {
        if self.rate_per_sec.is_nan() || self.rate_per_sec <= 0.0 {
            return Err(ArrivalError::Config(format!(
                "rate_per_sec must be positive, got {}",
                self.rate_per_sec
            )));
        }
        Ok(())
    }

    /// Mean gap between two arrivals in ticks (0 for `all_at_once`).
    pub fn mean_gap_ticks(&self, ticks_per_second: u32) -> u64 {
        ticks_for_secs(1.0 / self.rate_per_sec, ticks_per_second)
    }
}

/// Draw `count` arrival ticks: cumulative sums of exponential inter-arrival
/// times, floored to the tick in which they fall.  The result is sorted.
pub fn sample_arrival_ticks(
    config:           &ArrivalConfig,
    count:            usize,
    ticks_per_second: u32,
    rng:              &mut SimRng,
) -> ArrivalResult<Vec<Tick>> {
    config.validate()?;
    if config.rate_per_sec.is_infinite() {
        return Ok(vec![Tick::ZERO; count]);
    }
    let exp = Exp::new(config.rate_per_sec).map_err(|e| ArrivalError::Config(format!("rate_per_sec: {e}")))?;
    let tps = ticks_per_second as f64;

    let mut elapsed_secs = 0.0_f64;
    let mut ticks = Vec::with_capacity(count);
    for _ in 0..count {
        elapsed_secs += rng.sample(&exp);
        ticks.push(Tick((elapsed_secs * tps).floor() as u64));
    }
    Ok(ticks)
}
