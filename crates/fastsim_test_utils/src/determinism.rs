//! Determinism testing utilities.
//!
//! Combat predictions feed decision-making that must agree across
//! repeated evaluations and across hosts, so the simulation has to be
//! 100% reproducible. Sources of non-determinism guarded against:
//!
//! - **Floating-point math**: different CPUs can produce different
//!   results. The simulation uses fixed-point arithmetic throughout.
//! - **Iteration order**: units are stored and stepped in vectors, in
//!   insertion order; there are no hash maps in the simulation path.
//! - **System randomness**: the model has none.
//!
//! The harness reruns a scenario builder several times (serially and on
//! threads) and compares the final state hashes.

use std::thread;

use fastsim_core::simulator::Simulator;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Final state hash from each run.
    pub hashes: Vec<u64>,
    /// Frames simulated per run.
    pub frames: i32,
}

impl DeterminismResult {
    /// All unique hashes (should be 1 for a deterministic simulation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the simulation was deterministic, with a detailed
    /// error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Simulation is non-deterministic!\n\
                 Runs: {}\n\
                 Frames: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.frames,
                unique.len(),
                self.hashes
            );
        }
    }
}

fn run_once<F>(build: &F, frames: i32, splash: bool) -> u64
where
    F: Fn() -> Simulator,
{
    let mut sim = build();
    sim.simulate(frames, splash);
    sim.state_hash()
}

/// Runs the same scenario `runs` times serially and compares final
/// state hashes.
pub fn check_repeated<F>(build: F, runs: usize, frames: i32, splash: bool) -> DeterminismResult
where
    F: Fn() -> Simulator,
{
    let hashes: Vec<u64> = (0..runs).map(|_| run_once(&build, frames, splash)).collect();
    let is_deterministic = hashes.windows(2).all(|pair| pair[0] == pair[1]);
    DeterminismResult {
        is_deterministic,
        hashes,
        frames,
    }
}

/// Runs the same scenario on `runs` parallel threads and compares final
/// state hashes. Catches accidental dependence on shared mutable state
/// or thread-local behavior.
pub fn check_parallel<F>(build: F, runs: usize, frames: i32, splash: bool) -> DeterminismResult
where
    F: Fn() -> Simulator + Send + Sync,
{
    let hashes: Vec<u64> = thread::scope(|scope| {
        let handles: Vec<_> = (0..runs)
            .map(|_| scope.spawn(|| run_once(&build, frames, splash)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("simulation thread panicked"))
            .collect()
    });
    let is_deterministic = hashes.windows(2).all(|pair| pair[0] == pair[1]);
    DeterminismResult {
        is_deterministic,
        hashes,
        frames,
    }
}
