//! Unit identity: kinds, factions, sizes, and damage types.
//!
//! The [`UnitKind`] tag drives every special-case behavior in the
//! simulation: kiting, healing, suicide attacks, splash, and garrison
//! transformation. Everything else about a unit is plain data supplied
//! through the staged builder in [`crate::unit`].

use serde::{Deserialize, Serialize};

/// One game tile in position units (pixels).
pub const TILE_SIZE: i32 = 32;

/// Frames a `Lancer` must spend on cooldown before it starts kiting.
///
/// Game-specific tuning value; changing it changes combat outcomes.
pub const LANCER_KITE_GRACE: i32 = 6;

/// The `Lancer`'s unupgraded ground cooldown, used as the kite-gate baseline.
pub const LANCER_BASE_COOLDOWN: i32 = 30;

/// A kiter stops retreating when its cooldown is about to expire.
pub const KITE_HOLD_THRESHOLD: i32 = 1;

/// Edge distance within which a `SeekerMine` activates and chases.
pub const SEEKER_MINE_TRIGGER_RANGE: i32 = 96;

/// Health restored by a `Medic` per frame, in scaled vitality units.
pub const MEDIC_HEAL_PER_FRAME: i32 = 150;

/// Base damage of a garrison occupant / carrier drone volley.
pub const OCCUPANT_DAMAGE: i32 = 6;

/// Unupgraded cooldown of a single garrison occupant's weapon, in frames.
pub const OCCUPANT_COOLDOWN: i32 = 15;

/// Maximum health of a freed garrison occupant, in whole hit points.
pub const OCCUPANT_MAX_HEALTH: i32 = 40;

/// The side a unit fights for. Exactly two rosters exist per simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The engaging force (player 1).
    Attacker,
    /// The opposing force (player 2).
    Defender,
}

/// Faction determines passive end-of-frame regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Faction {
    /// Regenerates life slowly every frame.
    Swarm,
    /// Regenerates shields every frame.
    Luminar,
    /// No passive regeneration, except garrisons which self-repair.
    #[default]
    Dominion,
}

/// Target size class, consulted by the damage-type multiplier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UnitSize {
    /// Small targets - infantry, drones.
    #[default]
    Small,
    /// Medium targets - light vehicles.
    Medium,
    /// Large targets - heavy vehicles, buildings.
    Large,
}

/// Weapon damage type. Effectiveness depends on the target's [`UnitSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DamageType {
    /// Full damage against every size class.
    #[default]
    Normal,
    /// Quartered against large targets, halved against medium.
    Concussive,
    /// Halved against small targets, three-quarters against medium.
    Explosive,
}

/// Collision rectangle extents around a unit's center, in position units.
///
/// Used by the edge-to-edge range test; the extents are asymmetric
/// because the engine's sprites are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Extent to the left of center.
    pub left: i32,
    /// Extent to the right of center.
    pub right: i32,
    /// Extent above center.
    pub up: i32,
    /// Extent below center.
    pub down: i32,
}

/// The type tag of a simulated combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Basic infantry; garrison occupant.
    Trooper,
    /// Fast hit-and-run vehicle; kites whenever its weapon is on cooldown.
    Raider,
    /// Ranged walker; kites only late in its cooldown cycle.
    Lancer,
    /// Healer; ignores enemies entirely and never occupies collision cells.
    Medic,
    /// Long-range splash artillery with a minimum range.
    SiegeArtillery,
    /// Defensive structure holding occupants; transforms on death.
    Garrison,
    /// Ground suicide unit; triggers only at close range.
    SeekerMine,
    /// Flying suicide unit.
    Kamikaze,
    /// Flying platform; its weapon is derived from its drone complement.
    Carrier,
    /// Carrier drone; never simulated on its own.
    Interceptor,
    /// Unarmed support flyer; callers filter it out before insertion.
    Observer,
}

impl UnitKind {
    /// Faction this kind belongs to, for regeneration rules.
    #[must_use]
    pub const fn faction(self) -> Faction {
        match self {
            UnitKind::Trooper
            | UnitKind::Raider
            | UnitKind::Medic
            | UnitKind::SiegeArtillery
            | UnitKind::Garrison
            | UnitKind::SeekerMine => Faction::Dominion,
            UnitKind::Lancer | UnitKind::Carrier | UnitKind::Interceptor | UnitKind::Observer => {
                Faction::Luminar
            }
            UnitKind::Kamikaze => Faction::Swarm,
        }
    }

    /// Whether this kind detonates on contact and despawns after one hit.
    #[must_use]
    pub const fn is_suicide(self) -> bool {
        matches!(self, UnitKind::SeekerMine | UnitKind::Kamikaze)
    }

    /// Whether this kind may move while its weapon is on cooldown.
    ///
    /// The `Lancer` additionally gates on how far into its cooldown it is;
    /// see [`LANCER_KITE_GRACE`].
    #[must_use]
    pub const fn can_kite(self) -> bool {
        matches!(self, UnitKind::Raider | UnitKind::Lancer)
    }

    /// Collision rectangle extents for the edge-to-edge range test.
    #[must_use]
    pub const fn dimensions(self) -> Dimensions {
        match self {
            UnitKind::Trooper | UnitKind::Medic => Dimensions {
                left: 8,
                right: 9,
                up: 9,
                down: 10,
            },
            UnitKind::Raider | UnitKind::SiegeArtillery => Dimensions {
                left: 16,
                right: 15,
                up: 16,
                down: 15,
            },
            UnitKind::Lancer | UnitKind::Observer => Dimensions {
                left: 15,
                right: 16,
                up: 15,
                down: 16,
            },
            UnitKind::Garrison => Dimensions {
                left: 32,
                right: 31,
                up: 24,
                down: 23,
            },
            UnitKind::SeekerMine => Dimensions {
                left: 7,
                right: 8,
                up: 7,
                down: 8,
            },
            UnitKind::Kamikaze => Dimensions {
                left: 12,
                right: 11,
                up: 12,
                down: 11,
            },
            UnitKind::Carrier => Dimensions {
                left: 32,
                right: 31,
                up: 28,
                down: 27,
            },
            UnitKind::Interceptor => Dimensions {
                left: 8,
                right: 7,
                up: 8,
                down: 7,
            },
        }
    }

    /// Extra linear range granted by this kind's range upgrade.
    #[must_use]
    pub const fn range_upgrade_bonus(self) -> i32 {
        match self {
            UnitKind::Trooper => TILE_SIZE,
            UnitKind::Lancer => 2 * TILE_SIZE,
            UnitKind::Raider => 3 * TILE_SIZE,
            _ => 0,
        }
    }

    /// Speed multiplier (numerator, denominator) from this kind's speed
    /// upgrade, if it has one.
    #[must_use]
    pub const fn speed_upgrade_multiplier(self) -> Option<(i32, i32)> {
        match self {
            UnitKind::Raider => Some((3, 2)),
            UnitKind::Observer => Some((4, 3)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kite_classification() {
        assert!(UnitKind::Raider.can_kite());
        assert!(UnitKind::Lancer.can_kite());
        assert!(!UnitKind::Trooper.can_kite());
        assert!(!UnitKind::SiegeArtillery.can_kite());
    }

    #[test]
    fn test_suicide_classification() {
        assert!(UnitKind::SeekerMine.is_suicide());
        assert!(UnitKind::Kamikaze.is_suicide());
        assert!(!UnitKind::Raider.is_suicide());
    }

    #[test]
    fn test_faction_regen_groups() {
        assert_eq!(UnitKind::Kamikaze.faction(), Faction::Swarm);
        assert_eq!(UnitKind::Lancer.faction(), Faction::Luminar);
        assert_eq!(UnitKind::Garrison.faction(), Faction::Dominion);
    }
}
