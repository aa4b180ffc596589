//! a320 — boarding-policy comparison on an Airbus A320 cabin.
//!
//! Sweeps every policy over a grid of passenger counts and conformance
//! levels, runs a range of seeds per cell in parallel, and prints the mean
//! boarding time per cell.  The first seed of the first cell is re-run per
//! policy with the CSV sink attached so single runs can be inspected.
//!
//! ```text
//! cargo run -p a320 --release [scenario.json]
//! RUST_LOG=bd_sim=debug cargo run -p a320
//! ```
//!
//! The optional JSON scenario overrides any subset of [`Scenario`]'s fields.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bd_arrival::ArrivalConfig;
use bd_assign::PolicyKind;
use bd_cabin::LayoutConfig;
use bd_core::SimConfig;
use bd_output::{CsvWriter, SimOutputObserver};
use bd_passenger::ProfileConfig;
use bd_sim::{BoardingSim, NoopObserver, PassengerCount, RunOutcome, SimBuilder};

// ── Scenario ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct Scenario {
    sim:         SimConfig,
    layout:      LayoutConfig,
    profiles:    ProfileConfig,
    arrivals:    ArrivalConfig,
    /// Load factors (or exact counts) swept for every policy.
    passengers:  Vec<PassengerCount>,
    policies:    Vec<PolicyKind>,
    /// Percentages of passengers who board in their assigned position.
    conformance: Vec<f64>,
    /// Seeds `sim.seed .. sim.seed + seeds` are run for every sweep cell.
    seeds:       u64,
    output_dir:  PathBuf,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            sim:         SimConfig::default(),
            layout:      LayoutConfig::airbus_a320(),
            profiles:    ProfileConfig::default(),
            arrivals:    ArrivalConfig::default(),
            passengers:  [0.71, 0.76, 0.81].map(PassengerCount::Occupancy).to_vec(),
            policies:    PolicyKind::ALL.to_vec(),
            conformance: (0..=10).map(|c| c as f64 * 10.0).collect(),
            seeds:       10,
            output_dir:  PathBuf::from("output/a320"),
        }
    }
}

impl Scenario {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    fn build(&self, cell: SweepPoint, seed: u64) -> Result<BoardingSim> {
        let config = SimConfig { seed, ..self.sim.clone() };
        let sim = SimBuilder::new(config)
            .layout(self.layout.clone())
            .profiles(self.profiles.clone())
            .arrivals(self.arrivals.clone())
            .passengers(cell.passengers)
            .boxed_policy(cell.policy.build(cell.conformance)?)
            .build()?;
        Ok(sim)
    }

    /// Every (policy, passengers, conformance) combination, policy-major.
    fn cells(&self) -> Vec<SweepPoint> {
        let mut cells = Vec::new();
        for &policy in &self.policies {
            for &passengers in &self.passengers {
                for &conformance in &self.conformance {
                    cells.push(SweepPoint { policy, passengers, conformance });
                }
            }
        }
        cells
    }
}

/// One point of the sweep.
#[derive(Copy, Clone, Debug, PartialEq)]
struct SweepPoint {
    policy:      PolicyKind,
    passengers:  PassengerCount,
    conformance: f64,
}

fn passengers_label(count: PassengerCount) -> String {
    match count {
        PassengerCount::Exact(n) => n.to_string(),
        PassengerCount::Occupancy(f) => format!("{:.0}%", f * 100.0),
    }
}

// ── Batch statistics ──────────────────────────────────────────────────────────

struct CellStats {
    mean_secs:  f64,
    min_secs:   f64,
    max_secs:   f64,
    incomplete: usize,
}

fn summarise(outcomes: &[RunOutcome], ticks_per_second: u32) -> CellStats {
    let secs: Vec<f64> = outcomes
        .iter()
        .filter(|o| o.is_complete())
        .map(|o| o.ticks() as f64 / ticks_per_second as f64)
        .collect();
    let mean_secs = if secs.is_empty() { f64::NAN } else { secs.iter().sum::<f64>() / secs.len() as f64 };
    CellStats {
        mean_secs,
        min_secs: secs.iter().copied().fold(f64::INFINITY, f64::min),
        max_secs: secs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        incomplete: outcomes.len() - secs.len(),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scenario = match std::env::args_os().nth(1) {
        Some(path) => Scenario::load(Path::new(&path))?,
        None => Scenario::default(),
    };
    let base_seed = scenario.sim.seed;
    let cells = scenario.cells();
    if cells.is_empty() {
        anyhow::bail!("scenario needs at least one policy, passenger count and conformance level");
    }
    println!("=== a320 — boarding policy comparison ===");
    println!(
        "Policies: {}  |  Loads: {}  |  Conformance levels: {}  |  Seeds: {}..{}",
        scenario.policies.len(),
        scenario.passengers.len(),
        scenario.conformance.len(),
        base_seed,
        base_seed + scenario.seeds
    );
    println!();

    // 1. Batch: every (cell, seed) pair is an independent run.
    let jobs: Vec<(usize, u64)> = (0..cells.len())
        .flat_map(|c| (base_seed..base_seed + scenario.seeds).map(move |s| (c, s)))
        .collect();

    let t0 = Instant::now();
    let outcomes: Vec<(usize, RunOutcome)> = jobs
        .par_iter()
        .map(|&(c, seed)| -> Result<(usize, RunOutcome)> {
            let mut sim = scenario.build(cells[c], seed)?;
            Ok((c, sim.run(&mut NoopObserver)?))
        })
        .collect::<Result<_>>()?;
    info!(runs = outcomes.len(), secs = t0.elapsed().as_secs_f64(), "batch finished");

    // 2. Per-cell statistics.
    println!(
        "{:<22} {:>6} {:>6} {:>10} {:>10} {:>10} {:>11}",
        "Policy", "Load", "Conf%", "Mean (s)", "Min (s)", "Max (s)", "Incomplete"
    );
    println!("{}", "-".repeat(81));
    for (c, cell) in cells.iter().enumerate() {
        let runs: Vec<RunOutcome> = outcomes.iter().filter(|(i, _)| *i == c).map(|&(_, o)| o).collect();
        let stats = summarise(&runs, scenario.sim.ticks_per_second);
        println!(
            "{:<22} {:>6} {:>6.0} {:>10.1} {:>10.1} {:>10.1} {:>11}",
            cell.policy.to_string(),
            passengers_label(cell.passengers),
            cell.conformance,
            stats.mean_secs,
            stats.min_secs,
            stats.max_secs,
            stats.incomplete
        );
    }
    println!();

    // 3. One detailed run per policy with CSV output.
    let first = cells[0];
    let detailed = cells
        .iter()
        .filter(|c| c.passengers == first.passengers && c.conformance == first.conformance);
    for cell in detailed {
        let dir = scenario.output_dir.join(cell.policy.to_string());
        let mut sim = scenario.build(*cell, base_seed)?;
        let mut obs = SimOutputObserver::new(CsvWriter::new(&dir)?);
        let outcome = sim.run(&mut obs)?;
        if let Some(e) = obs.take_error() {
            eprintln!("output error: {e}");
        }
        println!("{:<22} {outcome}  →  {}", cell.policy.to_string(), dir.display());
    }

    Ok(())
}
