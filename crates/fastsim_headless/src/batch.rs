//! Parallel batch runs for determinism sweeps.
//!
//! Every run of a scenario must end in exactly the same state; a batch
//! builds and resolves the scenario N times on a rayon pool and
//! compares the final hashes. Any disagreement is a simulator bug.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::scenario::Scenario;

/// Outcome of a batch sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Scenario name.
    pub scenario: String,
    /// Runs executed.
    pub runs: usize,
    /// Frames simulated per run.
    pub frames_simulated: i32,
    /// Whether every run produced the same final state.
    pub deterministic: bool,
    /// Distinct final-state hashes observed (one when deterministic).
    pub unique_hashes: Vec<u64>,
}

/// Runs the scenario `runs` times in parallel and compares outcomes.
#[must_use]
pub fn run_batch(scenario: &Scenario, runs: usize) -> BatchReport {
    let results: Vec<(i32, u64)> = (0..runs)
        .into_par_iter()
        .map(|_| {
            let mut sim = scenario.build_simulator();
            let frames = sim.simulate(scenario.frames, scenario.splash);
            (frames, sim.state_hash())
        })
        .collect();

    let frames_simulated = results.first().map_or(0, |r| r.0);
    let mut unique_hashes: Vec<u64> = results.iter().map(|r| r.1).collect();
    unique_hashes.sort_unstable();
    unique_hashes.dedup();

    let deterministic = unique_hashes.len() <= 1
        && results.iter().all(|r| r.0 == frames_simulated);

    info!(
        scenario = %scenario.name,
        runs,
        deterministic,
        "batch complete"
    );

    BatchReport {
        scenario: scenario.name.clone(),
        runs,
        frames_simulated,
        deterministic,
        unique_hashes,
    }
}
