//! # Fastsim Headless
//!
//! Runs combat scenarios from RON files and reports outcomes as JSON.
//! Used for regression testing, balance sweeps, and CI verification of
//! the simulator's determinism.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod catalog;
pub mod report;
pub mod scenario;
