//! Scenario loading and simulator construction.
//!
//! Scenarios are RON files describing both sides of an engagement plus
//! the frame budget. Unit ids are assigned in file order, attackers
//! first, so reports are stable across runs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fastsim_core::prelude::*;

use crate::catalog;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
}

fn default_frames() -> i32 {
    -1
}

fn default_elevation() -> i32 {
    -1
}

fn default_count() -> u32 {
    1
}

fn default_spacing() -> i32 {
    TILE_SIZE
}

/// One group of identical units placed in a vertical line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitGroup {
    /// Unit kind to place.
    pub kind: UnitKind,
    /// Position of the first unit.
    pub x: i32,
    /// Position of the first unit.
    pub y: i32,
    /// How many to place.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Vertical gap between consecutive units.
    #[serde(default = "default_spacing")]
    pub spacing: i32,
    /// Terrain elevation; negative means unknown.
    #[serde(default = "default_elevation")]
    pub elevation: i32,
    /// Upgrade state applied to every unit in the group.
    #[serde(default)]
    pub upgrades: UpgradeState,
}

/// A complete scenario configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name, echoed into reports.
    pub name: String,
    /// Map dimensions in tiles.
    pub map_size_tiles: (usize, usize),
    /// The engaging force.
    pub attackers: Vec<UnitGroup>,
    /// The opposing force.
    pub defenders: Vec<UnitGroup>,
    /// Frame budget; negative runs until the fight resolves.
    #[serde(default = "default_frames")]
    pub frames: i32,
    /// Whether artillery splash is simulated.
    #[serde(default)]
    pub splash: bool,
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let scenario: Scenario = ron::from_str(&contents)?;
        Ok(scenario)
    }

    /// Load from a RON string (useful for embedded scenarios).
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        Ok(scenario)
    }

    /// A small mirrored infantry skirmish, used when no file is given.
    #[must_use]
    pub fn default_skirmish() -> Self {
        Scenario {
            name: "default_skirmish".to_string(),
            map_size_tiles: (64, 64),
            attackers: vec![UnitGroup {
                kind: UnitKind::Trooper,
                x: 400,
                y: 400,
                count: 8,
                spacing: TILE_SIZE,
                elevation: -1,
                upgrades: UpgradeState::default(),
            }],
            defenders: vec![UnitGroup {
                kind: UnitKind::Trooper,
                x: 1200,
                y: 400,
                count: 8,
                spacing: TILE_SIZE,
                elevation: -1,
                upgrades: UpgradeState::default(),
            }],
            frames: -1,
            splash: false,
        }
    }

    /// Builds a fresh simulator populated with this scenario's units.
    ///
    /// Units that cannot fight or heal are skipped; the simulator
    /// itself does not filter.
    #[must_use]
    pub fn build_simulator(&self) -> Simulator {
        let mut sim = Simulator::new(self.map_size_tiles.0, self.map_size_tiles.1);
        let mut next_id = 0;
        let mut place = |sim: &mut Simulator, side: Side, groups: &[UnitGroup]| {
            for group in groups {
                for n in 0..group.count {
                    let unit = catalog::instantiate(
                        group.kind,
                        next_id,
                        group.x,
                        group.y + (n as i32) * group.spacing,
                        group.elevation,
                        group.upgrades,
                    );
                    next_id += 1;
                    if unit.is_combat_unit() {
                        sim.add_unit(side, unit);
                    } else {
                        tracing::debug!(kind = ?group.kind, "skipping non-combat unit");
                    }
                }
            }
        };
        place(&mut sim, Side::Attacker, &self.attackers);
        place(&mut sim, Side::Defender, &self.defenders);
        sim
    }
}
