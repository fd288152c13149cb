//! The frame scheduler and public simulation surface.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::death::on_death;
use crate::grid::CollisionGrid;
use crate::kinds::{Faction, Side, UnitKind};
use crate::targeting::{medic_step, suicide_step, unit_step};
use crate::unit::CombatUnit;

/// Passive life regeneration per frame, scaled.
const SWARM_LIFE_REGEN: i32 = 4;
/// Passive shield regeneration per frame, scaled.
const LUMINAR_SHIELD_REGEN: i32 = 7;
/// Garrison self-repair per frame, scaled. Assumes a standing repair
/// crew the way observers of real games would.
const GARRISON_REPAIR: i32 = 680;

/// Whether the last simulated frame changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Something moved, attacked, or healed.
    Active,
    /// Nothing happened; further frames would be identical.
    Idle,
}

/// A two-sided engagement simulator.
///
/// Add units to either side, then run frames; the simulator mutates the
/// rosters in place and removes the fallen. `X` is a caller payload
/// carried on every unit, untouched by the simulation.
///
/// Insertion does not filter: callers are expected to skip units that
/// cannot fight or heal (see [`CombatUnit::is_combat_unit`]), otherwise
/// bystanders soak targeting and splash like any other unit.
#[derive(Debug)]
pub struct Simulator<X = ()> {
    attackers: Vec<CombatUnit<X>>,
    defenders: Vec<CombatUnit<X>>,
    grid: CollisionGrid,
    active: bool,
    next_id: u32,
}

impl<X: Clone> Simulator<X> {
    /// Creates a simulator for a map of the given size in tiles.
    #[must_use]
    pub fn new(map_width_tiles: usize, map_height_tiles: usize) -> Self {
        Simulator {
            attackers: Vec::new(),
            defenders: Vec::new(),
            grid: CollisionGrid::new(map_width_tiles, map_height_tiles),
            active: true,
            next_id: 0,
        }
    }

    /// Inserts a unit on the given side, registering it with the
    /// collision grid.
    pub fn add_unit(&mut self, side: Side, mut unit: CombatUnit<X>) {
        self.grid.occupy(&mut unit);
        self.next_id = self.next_id.max(unit.id + 1);
        match side {
            Side::Attacker => self.attackers.push(unit),
            Side::Defender => self.defenders.push(unit),
        }
    }

    /// Runs up to `max_frames` frames; negative means until the
    /// engagement resolves. Returns the number of frames simulated.
    ///
    /// Stops early when either roster empties or a frame passes in
    /// which nothing happens. May be called repeatedly; state carries
    /// over between calls.
    pub fn simulate(&mut self, max_frames: i32, enable_splash: bool) -> i32 {
        let mut remaining = max_frames;
        let mut frames = 0;
        loop {
            if remaining == 0 {
                break;
            }
            if remaining > 0 {
                remaining -= 1;
            }
            if self.attackers.is_empty() || self.defenders.is_empty() {
                break;
            }

            self.active = false;
            self.run_frame(enable_splash);
            frames += 1;

            if !self.active {
                break;
            }
        }
        frames
    }

    /// Both rosters, attacker side first.
    #[must_use]
    pub fn rosters(&self) -> (&[CombatUnit<X>], &[CombatUnit<X>]) {
        (&self.attackers, &self.defenders)
    }

    /// Mutable access to both rosters, attacker side first.
    ///
    /// Intended for inspecting or tweaking unit state between
    /// `simulate` calls. Moving a unit through this does not update the
    /// collision grid; reposition units by re-adding them instead.
    pub fn rosters_mut(&mut self) -> (&mut Vec<CombatUnit<X>>, &mut Vec<CombatUnit<X>>) {
        (&mut self.attackers, &mut self.defenders)
    }

    /// Removes all units and resets the grid, as if freshly built.
    pub fn clear(&mut self) {
        self.attackers.clear();
        self.defenders.clear();
        self.grid.clear();
        self.active = true;
        self.next_id = 0;
    }

    /// State of the most recently simulated frame.
    #[must_use]
    pub fn frame_state(&self) -> FrameState {
        if self.active {
            FrameState::Active
        } else {
            FrameState::Idle
        }
    }

    /// Deterministic digest of all observable unit state, for
    /// reproducibility checks across runs and hosts.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for unit in self.attackers.iter().chain(self.defenders.iter()) {
            unit.id.hash(&mut hasher);
            unit.x.hash(&mut hasher);
            unit.y.hash(&mut hasher);
            unit.health.hash(&mut hasher);
            unit.shields.hash(&mut hasher);
            unit.cooldown_remaining.hash(&mut hasher);
            unit.target.hash(&mut hasher);
        }
        hasher.finish()
    }

    fn run_frame(&mut self, enable_splash: bool) {
        let Simulator {
            attackers,
            defenders,
            grid,
            active,
            next_id,
        } = self;

        Self::run_pass(attackers, defenders, grid, enable_splash, next_id, active);
        Self::run_pass(defenders, attackers, grid, enable_splash, next_id, active);

        Self::end_of_frame(attackers);
        Self::end_of_frame(defenders);

        debug!(
            attackers = self.attackers.len(),
            defenders = self.defenders.len(),
            hash = self.state_hash(),
            "frame complete"
        );
    }

    /// Runs one side's units against the other.
    ///
    /// Iterates over a snapshot of ids so that mid-pass removals are
    /// safe in any order: a unit killed before its turn simply never
    /// acts, and units spawned mid-pass wait until the next frame.
    fn run_pass(
        units: &mut Vec<CombatUnit<X>>,
        enemies: &mut Vec<CombatUnit<X>>,
        grid: &mut CollisionGrid,
        enable_splash: bool,
        next_id: &mut u32,
        active: &mut bool,
    ) {
        let order: Vec<u32> = units.iter().map(|u| u.id).collect();
        for id in order {
            let Some(idx) = units.iter().position(|u| u.id == id) else {
                continue;
            };

            if units[idx].kind.is_suicide() {
                if suicide_step(units, idx, enemies, grid, next_id, active) {
                    let dead = units.swap_remove(idx);
                    on_death(dead, units, enemies, grid, next_id);
                }
            } else if units[idx].kind == UnitKind::Medic {
                medic_step(units, idx, active);
            } else {
                unit_step(units, idx, enemies, grid, enable_splash, next_id, active);
            }
        }
    }

    fn end_of_frame(units: &mut [CombatUnit<X>]) {
        for unit in units.iter_mut() {
            if unit.cooldown_remaining > 0 {
                unit.cooldown_remaining -= 1;
            }
            unit.healed_this_frame = false;

            match unit.kind.faction() {
                Faction::Swarm => {
                    if unit.health < unit.max_health {
                        unit.health = (unit.health + SWARM_LIFE_REGEN).min(unit.max_health);
                    }
                }
                Faction::Luminar => {
                    if unit.shields < unit.max_shields {
                        unit.shields = (unit.shields + LUMINAR_SHIELD_REGEN).min(unit.max_shields);
                    }
                }
                Faction::Dominion => {
                    if unit.kind == UnitKind::Garrison && unit.health < unit.max_health {
                        unit.health = (unit.health + GARRISON_REPAIR).min(unit.max_health);
                    }
                }
            }
        }
    }
}
