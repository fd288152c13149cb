//! Combat unit state and its staged configuration builder.
//!
//! A [`CombatUnit`] is a plain bag of integers once built; all derived
//! values (scaled vitality, squared ranges, upgrade effects) are computed
//! exactly once by the builder. The builder is staged so that forgetting a
//! mandatory field is a compile error rather than a runtime panic: each
//! stage is a distinct type that only exposes the next legal call.

use serde::{Deserialize, Serialize};

use crate::kinds::{
    DamageType, UnitKind, UnitSize, OCCUPANT_COOLDOWN, OCCUPANT_DAMAGE, TILE_SIZE,
};
use crate::math::{Fixed, HEALTH_SCALE_SHIFT};

/// One weapon's base statistics, with linear (unsquared) ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Damage per hit, in whole hit points.
    pub damage: i32,
    /// Frames between attacks.
    pub cooldown: i32,
    /// Maximum range in position units, edge to edge.
    pub max_range: i32,
    /// Minimum range in position units; targets closer than this are dropped.
    pub min_range: i32,
    /// Size-class effectiveness of this weapon.
    pub damage_type: DamageType,
}

impl Weapon {
    /// The absent weapon. Zero damage means the slot is never used.
    pub const NONE: Weapon = Weapon {
        damage: 0,
        cooldown: 0,
        max_range: 0,
        min_range: 0,
        damage_type: DamageType::Normal,
    };
}

/// Upgrade and occupancy state applied when the unit is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpgradeState {
    /// Extends max range by the kind's range bonus.
    pub range_upgrade: bool,
    /// Applies the kind's speed multiplier, if it has one.
    pub speed_upgrade: bool,
    /// Shaves a quarter off both cooldowns.
    pub attack_speed_upgrade: bool,
    /// Combat stimulant: halves cooldowns, half again as fast.
    pub stimmed: bool,
    /// Occupant/drone count for `Garrison` and `Carrier`; their weapons
    /// are derived from this. Ignored for every other kind.
    pub attacker_count: i32,
}

/// A fully configured combatant.
///
/// Vitality fields (`health`, `shields` and their maxima) are stored
/// scaled by `1 << HEALTH_SCALE_SHIFT`. Range fields ending in
/// `_squared` are squares of linear pixel distances; the linear values
/// are kept alongside because the edge-distance and elevation checks
/// need them unsquared.
#[derive(Debug, Clone)]
pub struct CombatUnit<X = ()> {
    /// Type tag driving special-case behavior.
    pub kind: UnitKind,
    /// Stable identifier, unique within one simulation.
    pub id: u32,
    /// Remembered enemy, by id. Cleared when the enemy dies.
    pub target: Option<u32>,
    /// Center position, in position units.
    pub x: i32,
    /// Center position, in position units.
    pub y: i32,
    /// Position to advance toward when no enemy is reachable.
    pub waypoint_x: i32,
    /// Position to advance toward when no enemy is reachable.
    pub waypoint_y: i32,
    /// Collision cell currently occupied. Maintained by the grid.
    pub cell: usize,
    /// Flying units ignore collision and ground-only weapons.
    pub flying: bool,
    /// Terrain elevation at the unit's position; negative means unknown.
    pub elevation: i32,

    /// Current life, scaled.
    pub health: i32,
    /// Maximum life, scaled.
    pub max_health: i32,
    /// Flat damage reduction per hit, in whole hit points.
    pub armor: i32,
    /// Current shields, scaled. Absorb damage before life.
    pub shields: i32,
    /// Maximum shields, scaled.
    pub max_shields: i32,
    /// Flat reduction applied while shields absorb, in whole hit points.
    pub shield_armor: i32,

    /// Movement per frame, in position units.
    pub speed: Fixed,
    /// Cached square of `speed`, for the snap-to-target test.
    pub speed_squared: Fixed,

    /// Anti-ground damage per hit, whole hit points. Zero means unarmed.
    pub ground_damage: i32,
    /// Frames between anti-ground attacks.
    pub ground_cooldown: i32,
    /// Linear anti-ground max range.
    pub ground_max_range: i32,
    /// Linear anti-ground min range.
    pub ground_min_range: i32,
    /// Squared anti-ground max range.
    pub ground_max_range_squared: i32,
    /// Squared anti-ground min range.
    pub ground_min_range_squared: i32,
    /// Anti-ground damage type.
    pub ground_damage_type: DamageType,

    /// Anti-air damage per hit, whole hit points. Zero means unarmed.
    pub air_damage: i32,
    /// Frames between anti-air attacks.
    pub air_cooldown: i32,
    /// Linear anti-air max range.
    pub air_max_range: i32,
    /// Linear anti-air min range.
    pub air_min_range: i32,
    /// Squared anti-air max range.
    pub air_max_range_squared: i32,
    /// Squared anti-air min range.
    pub air_min_range_squared: i32,
    /// Anti-air damage type.
    pub air_damage_type: DamageType,

    /// Size class, consulted by incoming damage.
    pub size: UnitSize,
    /// Organic units can be healed.
    pub organic: bool,
    /// Set when a healer treats this unit; cleared at end of frame.
    pub healed_this_frame: bool,
    /// Occupant count carried through from configuration, for the
    /// garrison death transformation.
    pub attacker_count: i32,
    /// Frames until this unit may attack again.
    pub cooldown_remaining: i32,
    /// Cloaked and unrevealed; cannot be targeted.
    pub undetected: bool,
    /// Caller-defined payload, carried through the simulation untouched.
    pub data: X,
}

impl<X> CombatUnit<X> {
    /// Current life in whole hit points.
    #[must_use]
    pub fn health_hp(&self) -> i32 {
        self.health >> HEALTH_SCALE_SHIFT
    }

    /// Current shields in whole hit points.
    #[must_use]
    pub fn shields_hp(&self) -> i32 {
        self.shields >> HEALTH_SCALE_SHIFT
    }

    /// Whether either weapon slot can deal damage.
    #[must_use]
    pub fn has_weapon(&self) -> bool {
        self.ground_damage > 0 || self.air_damage > 0
    }

    /// Whether this unit participates in combat at all.
    ///
    /// Insertion does not filter; callers use this to skip units that
    /// would only stand around (unarmed, non-healing).
    #[must_use]
    pub fn is_combat_unit(&self) -> bool {
        self.has_weapon() || self.kind == UnitKind::Medic || self.kind.is_suicide()
    }

    /// Squared center-to-center distance to another unit.
    #[must_use]
    pub fn dist_squared(&self, other: &CombatUnit<X>) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Approximate edge-to-edge distance to another unit.
    ///
    /// Measures between the two collision rectangles using the engine's
    /// octagonal distance approximation, less one, never negative.
    #[must_use]
    pub fn edge_distance(&self, other: &CombatUnit<X>) -> i32 {
        let a = self.kind.dimensions();
        let b = other.kind.dimensions();

        let x_dist = if self.x > other.x {
            ((self.x - a.left) - (other.x + b.right) - 1).max(0)
        } else {
            ((other.x - b.left) - (self.x + a.right) - 1).max(0)
        };
        let y_dist = if self.y > other.y {
            ((self.y - a.up) - (other.y + b.down) - 1).max(0)
        } else {
            ((other.y - b.up) - (self.y + a.down) - 1).max(0)
        };

        crate::math::approx_distance(x_dist, y_dist)
    }
}

/// Mandatory fields accumulated across builder stages.
#[derive(Debug, Clone)]
struct Partial {
    kind: UnitKind,
    x: i32,
    y: i32,
    waypoint_x: i32,
    waypoint_y: i32,
    health: i32,
    max_health: i32,
    shields: i32,
    max_shields: i32,
    shield_armor: i32,
    armor: i32,
    speed: Fixed,
    flying: bool,
    elevation: i32,
    ground: Weapon,
    air: Weapon,
    size: UnitSize,
    organic: bool,
    undetected: bool,
    upgrades: UpgradeState,
    cooldown_remaining: i32,
    id: u32,
}

/// Entry point of the staged unit builder.
///
/// ```
/// use fastsim_core::prelude::*;
///
/// let unit = UnitBuilder::new(UnitKind::Trooper)
///     .position(64, 64)
///     .vitals(40, 40)
///     .mobility(Fixed::from_num(4), false, 0)
///     .weapons(
///         Weapon { damage: 6, cooldown: 15, max_range: 128, min_range: 0, damage_type: DamageType::Normal },
///         Weapon { damage: 6, cooldown: 15, max_range: 128, min_range: 0, damage_type: DamageType::Normal },
///     )
///     .profile(UnitSize::Small, true, false)
///     .build();
/// assert_eq!(unit.health_hp(), 40);
/// ```
#[derive(Debug)]
pub struct UnitBuilder;

/// Builder stage: position not yet set.
#[derive(Debug)]
pub struct NeedsPosition(Partial);

/// Builder stage: health not yet set.
#[derive(Debug)]
pub struct NeedsVitals(Partial);

/// Builder stage: movement not yet set.
#[derive(Debug)]
pub struct NeedsMobility(Partial);

/// Builder stage: weapons not yet set.
#[derive(Debug)]
pub struct NeedsWeapons(Partial);

/// Builder stage: size/organic profile not yet set.
#[derive(Debug)]
pub struct NeedsProfile(Partial);

/// Final builder stage; optional fields and `build`.
#[derive(Debug)]
pub struct Ready(Partial);

impl UnitBuilder {
    /// Starts building a unit of the given kind.
    #[must_use]
    pub fn new(kind: UnitKind) -> NeedsPosition {
        NeedsPosition(Partial {
            kind,
            x: 0,
            y: 0,
            waypoint_x: 0,
            waypoint_y: 0,
            health: 0,
            max_health: 0,
            shields: 0,
            max_shields: 0,
            shield_armor: 0,
            armor: 0,
            speed: Fixed::ZERO,
            flying: false,
            elevation: -1,
            ground: Weapon::NONE,
            air: Weapon::NONE,
            size: UnitSize::Small,
            organic: false,
            undetected: false,
            upgrades: UpgradeState::default(),
            cooldown_remaining: 0,
            id: 0,
        })
    }
}

impl NeedsPosition {
    /// Sets the center position. The waypoint defaults to the same spot.
    #[must_use]
    pub fn position(mut self, x: i32, y: i32) -> NeedsVitals {
        self.0.x = x;
        self.0.y = y;
        self.0.waypoint_x = x;
        self.0.waypoint_y = y;
        NeedsVitals(self.0)
    }
}

impl NeedsVitals {
    /// Sets current and maximum life, in whole hit points.
    #[must_use]
    pub fn vitals(mut self, health: i32, max_health: i32) -> NeedsMobility {
        self.0.health = health << HEALTH_SCALE_SHIFT;
        self.0.max_health = max_health << HEALTH_SCALE_SHIFT;
        NeedsMobility(self.0)
    }
}

impl NeedsMobility {
    /// Sets movement speed, flight status, and terrain elevation
    /// (negative when unknown).
    #[must_use]
    pub fn mobility(mut self, speed: Fixed, flying: bool, elevation: i32) -> NeedsWeapons {
        self.0.speed = speed;
        self.0.flying = flying;
        self.0.elevation = elevation;
        NeedsWeapons(self.0)
    }
}

impl NeedsWeapons {
    /// Sets both weapon slots. Use [`Weapon::NONE`] for an empty slot.
    #[must_use]
    pub fn weapons(mut self, ground: Weapon, air: Weapon) -> NeedsProfile {
        self.0.ground = ground;
        self.0.air = air;
        NeedsProfile(self.0)
    }
}

impl NeedsProfile {
    /// Sets size class, organic status, and detectability.
    #[must_use]
    pub fn profile(mut self, size: UnitSize, organic: bool, undetected: bool) -> Ready {
        self.0.size = size;
        self.0.organic = organic;
        self.0.undetected = undetected;
        Ready(self.0)
    }
}

impl Ready {
    /// Overrides the default waypoint (the spawn position).
    #[must_use]
    pub fn waypoint(mut self, x: i32, y: i32) -> Self {
        self.0.waypoint_x = x;
        self.0.waypoint_y = y;
        self
    }

    /// Sets current and maximum shields plus shield armor, in whole
    /// hit points.
    #[must_use]
    pub fn shields(mut self, shields: i32, max_shields: i32, shield_armor: i32) -> Self {
        self.0.shields = shields << HEALTH_SCALE_SHIFT;
        self.0.max_shields = max_shields << HEALTH_SCALE_SHIFT;
        self.0.shield_armor = shield_armor;
        self
    }

    /// Sets flat armor, in whole hit points.
    #[must_use]
    pub fn armor(mut self, armor: i32) -> Self {
        self.0.armor = armor;
        self
    }

    /// Applies upgrades and occupant counts; see [`UpgradeState`].
    #[must_use]
    pub fn upgrades(mut self, upgrades: UpgradeState) -> Self {
        self.0.upgrades = upgrades;
        self
    }

    /// Sets the initial cooldown, for units inserted mid-fight.
    #[must_use]
    pub fn cooldown_remaining(mut self, frames: i32) -> Self {
        self.0.cooldown_remaining = frames;
        self
    }

    /// Sets the caller-chosen identifier.
    #[must_use]
    pub fn id(mut self, id: u32) -> Self {
        self.0.id = id;
        self
    }

    /// Finishes the unit with a caller-defined payload.
    #[must_use]
    pub fn payload<X>(self, data: X) -> CombatUnit<X> {
        let p = self.0;
        let up = p.upgrades;
        let mut ground = p.ground;
        let mut air = p.air;
        let mut speed = p.speed;

        // Garrisons and carriers fight through their occupants; their
        // weapon stats are derived, not configured.
        match p.kind {
            UnitKind::Carrier => {
                if up.attacker_count > 0 {
                    let n = up.attacker_count;
                    ground.damage = OCCUPANT_DAMAGE;
                    air.damage = OCCUPANT_DAMAGE;
                    // Nearest integer to 37.4 / n, in pure integer math.
                    let cooldown = (374 + 5 * n) / (10 * n);
                    ground.cooldown = cooldown;
                    air.cooldown = cooldown;
                } else {
                    ground.damage = 0;
                    air.damage = 0;
                }
            }
            UnitKind::Garrison => {
                if up.attacker_count > 0 {
                    ground.damage = OCCUPANT_DAMAGE;
                    air.damage = OCCUPANT_DAMAGE;
                    ground.cooldown = OCCUPANT_COOLDOWN / up.attacker_count;
                    air.cooldown = OCCUPANT_COOLDOWN / up.attacker_count;
                } else {
                    ground.damage = 0;
                    air.damage = 0;
                }
            }
            _ => {}
        }

        if up.attack_speed_upgrade {
            ground.cooldown -= ground.cooldown / 4;
            air.cooldown -= air.cooldown / 4;
        }

        if up.stimmed {
            ground.cooldown >>= 1;
            air.cooldown >>= 1;
            speed += speed / Fixed::from_num(2);
        }

        if up.speed_upgrade {
            if let Some((num, den)) = p.kind.speed_upgrade_multiplier() {
                speed = speed * Fixed::from_num(num) / Fixed::from_num(den);
            }
        }

        let (ground_max, air_max) = match p.kind {
            UnitKind::Garrison => {
                let range = if up.range_upgrade { 6 * TILE_SIZE } else { 5 * TILE_SIZE };
                (range, range)
            }
            UnitKind::Carrier => (8 * TILE_SIZE, 8 * TILE_SIZE),
            _ if up.range_upgrade => {
                let bonus = p.kind.range_upgrade_bonus();
                (ground.max_range + bonus, air.max_range + bonus)
            }
            _ => (ground.max_range, air.max_range),
        };

        CombatUnit {
            kind: p.kind,
            id: p.id,
            target: None,
            x: p.x,
            y: p.y,
            waypoint_x: p.waypoint_x,
            waypoint_y: p.waypoint_y,
            cell: 0,
            flying: p.flying,
            elevation: p.elevation,
            health: p.health,
            max_health: p.max_health,
            armor: p.armor,
            shields: p.shields,
            max_shields: p.max_shields,
            shield_armor: p.shield_armor,
            speed,
            speed_squared: speed * speed,
            ground_damage: ground.damage,
            ground_cooldown: ground.cooldown,
            ground_max_range: ground_max,
            ground_min_range: ground.min_range,
            ground_max_range_squared: ground_max * ground_max,
            ground_min_range_squared: ground.min_range * ground.min_range,
            ground_damage_type: ground.damage_type,
            air_damage: air.damage,
            air_cooldown: air.cooldown,
            air_max_range: air_max,
            air_min_range: air.min_range,
            air_max_range_squared: air_max * air_max,
            air_min_range_squared: air.min_range * air.min_range,
            air_damage_type: air.damage_type,
            size: p.size,
            organic: p.organic,
            healed_this_frame: false,
            attacker_count: up.attacker_count,
            cooldown_remaining: p.cooldown_remaining,
            undetected: p.undetected,
            data,
        }
    }

    /// Finishes the unit with no payload.
    #[must_use]
    pub fn build(self) -> CombatUnit<()> {
        self.payload(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{DamageType, UnitKind, UnitSize};

    fn rifle() -> Weapon {
        Weapon {
            damage: 6,
            cooldown: 15,
            max_range: 4 * TILE_SIZE,
            min_range: 0,
            damage_type: DamageType::Normal,
        }
    }

    fn basic(kind: UnitKind) -> Ready {
        UnitBuilder::new(kind)
            .position(100, 100)
            .vitals(40, 40)
            .mobility(Fixed::from_num(4), false, 0)
            .weapons(rifle(), rifle())
            .profile(UnitSize::Small, true, false)
    }

    #[test]
    fn test_vitals_scaled() {
        let unit = basic(UnitKind::Trooper).build();
        assert_eq!(unit.health, 40 << HEALTH_SCALE_SHIFT);
        assert_eq!(unit.health_hp(), 40);
    }

    #[test]
    fn test_ranges_squared_at_build() {
        let unit = basic(UnitKind::Trooper).build();
        assert_eq!(unit.ground_max_range, 128);
        assert_eq!(unit.ground_max_range_squared, 128 * 128);
    }

    #[test]
    fn test_stim_halves_cooldown_and_boosts_speed() {
        let unit = basic(UnitKind::Trooper)
            .upgrades(UpgradeState {
                stimmed: true,
                ..UpgradeState::default()
            })
            .build();
        assert_eq!(unit.ground_cooldown, 7);
        assert_eq!(unit.speed, Fixed::from_num(6));
    }

    #[test]
    fn test_attack_speed_upgrade_shaves_quarter() {
        let unit = basic(UnitKind::Trooper)
            .upgrades(UpgradeState {
                attack_speed_upgrade: true,
                ..UpgradeState::default()
            })
            .build();
        // 15 - 15/4 = 12 in integer math.
        assert_eq!(unit.ground_cooldown, 12);
    }

    #[test]
    fn test_range_upgrade_bonus_applied_before_squaring() {
        let unit = basic(UnitKind::Trooper)
            .upgrades(UpgradeState {
                range_upgrade: true,
                ..UpgradeState::default()
            })
            .build();
        assert_eq!(unit.ground_max_range, 160);
        assert_eq!(unit.ground_max_range_squared, 160 * 160);
    }

    #[test]
    fn test_garrison_weapon_derived_from_occupants() {
        let unit = UnitBuilder::new(UnitKind::Garrison)
            .position(100, 100)
            .vitals(350, 350)
            .mobility(Fixed::ZERO, false, 0)
            .weapons(Weapon::NONE, Weapon::NONE)
            .profile(UnitSize::Large, false, false)
            .upgrades(UpgradeState {
                attacker_count: 4,
                ..UpgradeState::default()
            })
            .build();
        assert_eq!(unit.ground_damage, OCCUPANT_DAMAGE);
        assert_eq!(unit.ground_cooldown, OCCUPANT_COOLDOWN / 4);
        assert_eq!(unit.ground_max_range, 5 * TILE_SIZE);
    }

    #[test]
    fn test_empty_garrison_is_unarmed() {
        let unit = UnitBuilder::new(UnitKind::Garrison)
            .position(100, 100)
            .vitals(350, 350)
            .mobility(Fixed::ZERO, false, 0)
            .weapons(rifle(), rifle())
            .profile(UnitSize::Large, false, false)
            .build();
        assert!(!unit.has_weapon());
    }

    #[test]
    fn test_carrier_cooldown_rounds_to_nearest() {
        let two = basic(UnitKind::Carrier)
            .upgrades(UpgradeState {
                attacker_count: 2,
                ..UpgradeState::default()
            })
            .build();
        // 37.4 / 2 = 18.7, rounds to 19.
        assert_eq!(two.ground_cooldown, 19);
        assert_eq!(two.ground_max_range, 8 * TILE_SIZE);

        let eight = basic(UnitKind::Carrier)
            .upgrades(UpgradeState {
                attacker_count: 8,
                ..UpgradeState::default()
            })
            .build();
        // 37.4 / 8 = 4.675, rounds to 5.
        assert_eq!(eight.ground_cooldown, 5);
    }

    #[test]
    fn test_edge_distance_never_negative() {
        let a = basic(UnitKind::Trooper).build();
        let mut b = basic(UnitKind::Trooper).build();
        b.x = a.x + 4;
        b.y = a.y;
        assert_eq!(a.edge_distance(&b), 0);
    }
}
