//! # Fastsim Core
//!
//! Deterministic frame-by-frame combat outcome simulator.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No system randomness
//! - No floating-point math (uses fixed-point)
//!
//! Feed both sides of a hypothetical engagement into a [`simulator::Simulator`],
//! run it for a frame budget, and read the surviving rosters to decide
//! whether the fight is worth taking. The model trades pathfinding and
//! per-projectile fidelity for speed: units walk straight lines through a
//! coarse collision grid and attacks resolve instantly.
//!
//! ## Crate Structure
//!
//! - [`simulator`] - The frame scheduler and public simulation surface
//! - [`unit`] - Unit state and the staged configuration builder
//! - [`kinds`] - Unit kinds, factions, sizes, and damage types
//! - [`targeting`] - Per-unit target selection, movement, and attacks
//! - [`damage`] - Shield/armor/size damage resolution
//! - [`splash`] - Area damage around artillery impacts
//! - [`grid`] - Half-tile collision grid
//! - [`math`] - Fixed-point math and the approximate distance formula

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod damage;
mod death;
pub mod grid;
pub mod kinds;
pub mod math;
pub mod simulator;
pub mod splash;
pub mod targeting;
pub mod unit;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::damage::MIN_DAMAGE;
    pub use crate::grid::{CollisionGrid, MAX_CELL_OCCUPANCY};
    pub use crate::kinds::{
        DamageType, Dimensions, Faction, Side, UnitKind, UnitSize, TILE_SIZE,
    };
    pub use crate::math::{Fixed, HEALTH_SCALE_SHIFT};
    pub use crate::simulator::{FrameState, Simulator};
    pub use crate::unit::{CombatUnit, UnitBuilder, UpgradeState, Weapon};
}
