//! Fluent builder for constructing a [`BoardingSim`].

use bd_arrival::{ArrivalConfig, BoardingQueue, sample_arrival_ticks};
use bd_assign::{RandomOrder, SeatAssignment};
use bd_cabin::{FrozenAisle, Grid, Layout, LayoutConfig};
use bd_core::{PassengerId, PassengerRng, SimConfig, SimRng, Tick};
use bd_passenger::{Passenger, PassengerProfile, PassengerStore, ProfileConfig};
use tracing::debug;

use crate::{BoardingSim, SimError, SimResult};

/// Independent RNG streams split off the master seed.
const ASSIGN_STREAM: u64 = 1;
const ARRIVAL_STREAM: u64 = 2;
const ACTIVATION_STREAM: u64 = 3;

// ── PassengerCount ────────────────────────────────────────────────────────────

/// How many passengers board.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PassengerCount {
    Exact(usize),
    /// Fraction of the seats, rounded to the nearest passenger.
    Occupancy(f64),
}

impl Default for PassengerCount {
    fn default() -> Self {
        PassengerCount::Occupancy(0.85)
    }
}

impl PassengerCount {
    /// Resolve against a cabin of `seats` seats.
    pub fn resolve(self, seats: usize) -> SimResult<usize> {
        let requested = match self {
            PassengerCount::Exact(n) => n,
            PassengerCount::Occupancy(f) => {
                if !(0.0..=1.0).contains(&f) {
                    return Err(SimError::Config(format!("occupancy must be within 0..=1, got {f}")));
                }
                (f * seats as f64).round() as usize
            }
        };
        if requested > seats {
            return Err(SimError::TooManyPassengers { requested, seats });
        }
        Ok(requested)
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

/// Fluent builder for [`BoardingSim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                               |
/// |----------------------------|---------------------------------------|
/// | `.layout(c)`               | `LayoutConfig::airbus_a320()`         |
/// | `.passengers(n)`           | `PassengerCount::Occupancy(0.85)`     |
/// | `.policy(p)`               | `RandomOrder`                         |
/// | `.profiles(c)`             | `ProfileConfig::default()`            |
/// | `.arrivals(c)`             | `ArrivalConfig::default()`            |
/// | `.passenger_profiles(v)`   | sampled from `.profiles`              |
/// | `.arrival_ticks(v)`        | sampled from `.arrivals`              |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .layout(LayoutConfig::compact(1, 5, 2))
///     .passengers(PassengerCount::Exact(1))
///     .policy(Explicit(vec![SeatId(0)]))
///     .passenger_profiles(vec![PassengerProfile::instant()])
///     .arrival_ticks(vec![Tick(0)])
///     .build()?;
/// ```
pub struct SimBuilder {
    config:        SimConfig,
    layout:        LayoutConfig,
    count:         PassengerCount,
    policy:        Box<dyn SeatAssignment>,
    profiles:      ProfileConfig,
    arrivals:      ArrivalConfig,
    fixed_profiles: Option<Vec<PassengerProfile>>,
    fixed_arrivals: Option<Vec<Tick>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            layout:         LayoutConfig::airbus_a320(),
            count:          PassengerCount::default(),
            policy:         Box::new(RandomOrder),
            profiles:       ProfileConfig::default(),
            arrivals:       ArrivalConfig::default(),
            fixed_profiles: None,
            fixed_arrivals: None,
        }
    }

    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn passengers(mut self, count: PassengerCount) -> Self {
        self.count = count;
        self
    }

    /// Seat-assignment policy; its order is also the boarding order.
    pub fn policy(mut self, policy: impl SeatAssignment + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Same as [`policy`][Self::policy] for an already boxed policy.
    pub fn boxed_policy(mut self, policy: Box<dyn SeatAssignment>) -> Self {
        self.policy = policy;
        self
    }

    pub fn profiles(mut self, profiles: ProfileConfig) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn arrivals(mut self, arrivals: ArrivalConfig) -> Self {
        self.arrivals = arrivals;
        self
    }

    /// Use these profiles (indexed by boarding position) instead of sampling.
    pub fn passenger_profiles(mut self, profiles: Vec<PassengerProfile>) -> Self {
        self.fixed_profiles = Some(profiles);
        self
    }

    /// Use these arrival ticks (indexed by boarding position) instead of
    /// sampling.  They need not be sorted.
    pub fn arrival_ticks(mut self, ticks: Vec<Tick>) -> Self {
        self.fixed_arrivals = Some(ticks);
        self
    }

    /// Validate every input and return a ready-to-run [`BoardingSim`].
    /// Nothing is returned on any configuration error.
    pub fn build(self) -> SimResult<BoardingSim> {
        self.config.validate()?;
        let mut layout = Layout::new(self.layout)?;
        let count = self.count.resolve(layout.seat_count())?;

        let mut master = SimRng::new(self.config.seed);
        let mut assign_rng = master.child(ASSIGN_STREAM);
        let mut arrival_rng = master.child(ARRIVAL_STREAM);
        let default_activation = master.child(ACTIVATION_STREAM);
        let activation_rng = match self.config.activation_seed {
            Some(seed) => SimRng::new(seed),
            None => default_activation,
        };

        // ── Seats ─────────────────────────────────────────────────────────
        let seats = self.policy.order(&layout, count, &mut assign_rng)?;
        if seats.len() != count {
            return Err(SimError::PassengerCountMismatch {
                expected: count,
                got:      seats.len(),
                what:     "seat order",
            });
        }

        // ── Arrival ticks ─────────────────────────────────────────────────
        let arrivals = match self.fixed_arrivals {
            Some(ticks) => {
                check_len(count, ticks.len(), "arrival ticks")?;
                ticks
            }
            None => sample_arrival_ticks(&self.arrivals, count, self.config.ticks_per_second, &mut arrival_rng)?,
        };

        // ── Profiles ──────────────────────────────────────────────────────
        let profiles = match self.fixed_profiles {
            Some(profiles) => {
                check_len(count, profiles.len(), "passenger profiles")?;
                if let Some(bad) = profiles.iter().position(|p| p.row_step_ticks == 0) {
                    return Err(SimError::Config(format!("profile {bad} has a zero row_step_ticks")));
                }
                profiles
            }
            None => {
                let mut sampled = Vec::with_capacity(count);
                for i in 0..count {
                    let mut rng = PassengerRng::new(self.config.seed, PassengerId::from_index(i)?);
                    sampled.push(self.profiles.sample(&mut rng, self.config.ticks_per_second)?);
                }
                sampled
            }
        };

        // ── Passengers ────────────────────────────────────────────────────
        let mut passengers = Vec::with_capacity(count);
        for (i, ((&seat, &arrival), &profile)) in seats.iter().zip(&arrivals).zip(&profiles).enumerate() {
            let id = PassengerId::from_index(i)?;
            layout.assign(seat, id)?;
            let cell = layout.seat(seat)?.cell;
            passengers.push(Passenger::new(id, seat, cell, arrival, profile));
        }

        let grid = Grid::for_layout(&layout, count);
        let frozen = FrozenAisle::new(layout.grid_rows());
        let queue = BoardingQueue::from_arrival_ticks(&arrivals)?;

        debug!(
            policy = self.policy.name(),
            passengers = count,
            seats = layout.seat_count(),
            grid_rows = layout.grid_rows(),
            "boarding sim built"
        );

        Ok(BoardingSim {
            clock:            self.config.make_clock(),
            aisle_step_ticks: self.config.aisle_step_ticks(),
            config:           self.config,
            layout,
            grid,
            frozen,
            passengers:       PassengerStore::new(passengers),
            queue,
            policy_name:      self.policy.name().to_string(),
            activation_rng,
            finished_tick:    None,
            order:            Vec::with_capacity(count),
        })
    }
}

fn check_len(expected: usize, got: usize, what: &'static str) -> SimResult<()> {
    if expected != got {
        return Err(SimError::PassengerCountMismatch { expected, got, what });
    }
    Ok(())
}
