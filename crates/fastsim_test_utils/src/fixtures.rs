//! Canonical unit fixtures.
//!
//! One constructor per kind with fixed, documented stats so that tests
//! across crates agree on what a "trooper" is. Stats are frozen here on
//! purpose: balance tweaks belong in the caller's own catalog, not in
//! the test fixtures.

use fastsim_core::prelude::*;
use fixed::types::I32F32;

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> I32F32 {
    I32F32::from_num(n)
}

/// Create a fixed-point number from a float (for tests only).
///
/// Note: In real simulation code, never use floats.
/// This is only for convenient test setup.
#[must_use]
pub fn fixed_f(n: f64) -> I32F32 {
    I32F32::from_num(n)
}

/// Basic infantry: 40 hp, 6 damage every 15 frames at 4 tiles.
#[must_use]
pub fn trooper(id: u32, x: i32, y: i32) -> CombatUnit<()> {
    let rifle = Weapon {
        damage: 6,
        cooldown: 15,
        max_range: 4 * TILE_SIZE,
        min_range: 0,
        damage_type: DamageType::Normal,
    };
    UnitBuilder::new(UnitKind::Trooper)
        .position(x, y)
        .vitals(40, 40)
        .mobility(fixed(4), false, 0)
        .weapons(rifle, rifle)
        .profile(UnitSize::Small, true, false)
        .id(id)
        .build()
}

/// Fast kiting vehicle: 80 hp, 20 concussive damage, ground only.
#[must_use]
pub fn raider(id: u32, x: i32, y: i32) -> CombatUnit<()> {
    UnitBuilder::new(UnitKind::Raider)
        .position(x, y)
        .vitals(80, 80)
        .mobility(fixed_f(6.4), false, 0)
        .weapons(
            Weapon {
                damage: 20,
                cooldown: 30,
                max_range: 5 * TILE_SIZE,
                min_range: 0,
                damage_type: DamageType::Concussive,
            },
            Weapon::NONE,
        )
        .profile(UnitSize::Medium, false, false)
        .id(id)
        .build()
}

/// Shielded ranged walker: 100 hp plus 80 shields, 20 explosive damage.
#[must_use]
pub fn lancer(id: u32, x: i32, y: i32) -> CombatUnit<()> {
    let cannon = Weapon {
        damage: 20,
        cooldown: 30,
        max_range: 4 * TILE_SIZE,
        min_range: 0,
        damage_type: DamageType::Explosive,
    };
    UnitBuilder::new(UnitKind::Lancer)
        .position(x, y)
        .vitals(100, 100)
        .mobility(fixed(5), false, 0)
        .weapons(cannon, cannon)
        .profile(UnitSize::Large, false, false)
        .shields(80, 80, 0)
        .id(id)
        .build()
}

/// Unarmed healer: 60 hp, follows and heals organic allies.
#[must_use]
pub fn medic(id: u32, x: i32, y: i32) -> CombatUnit<()> {
    UnitBuilder::new(UnitKind::Medic)
        .position(x, y)
        .vitals(60, 60)
        .mobility(fixed(4), false, 0)
        .weapons(Weapon::NONE, Weapon::NONE)
        .profile(UnitSize::Small, true, false)
        .id(id)
        .build()
}

/// Immobile splash artillery: 70 explosive damage, 2-tile dead zone.
#[must_use]
pub fn siege_artillery(id: u32, x: i32, y: i32) -> CombatUnit<()> {
    UnitBuilder::new(UnitKind::SiegeArtillery)
        .position(x, y)
        .vitals(150, 150)
        .mobility(I32F32::ZERO, false, 0)
        .weapons(
            Weapon {
                damage: 70,
                cooldown: 75,
                max_range: 12 * TILE_SIZE,
                min_range: 2 * TILE_SIZE,
                damage_type: DamageType::Explosive,
            },
            Weapon::NONE,
        )
        .profile(UnitSize::Large, false, false)
        .id(id)
        .build()
}

/// Occupied defensive structure. Weapon stats derive from the occupant
/// count; zero occupants leaves it unarmed.
#[must_use]
pub fn garrison(id: u32, x: i32, y: i32, occupants: i32) -> CombatUnit<()> {
    UnitBuilder::new(UnitKind::Garrison)
        .position(x, y)
        .vitals(350, 350)
        .mobility(I32F32::ZERO, false, 0)
        .weapons(Weapon::NONE, Weapon::NONE)
        .profile(UnitSize::Large, false, false)
        .upgrades(UpgradeState {
            attacker_count: occupants,
            ..UpgradeState::default()
        })
        .id(id)
        .build()
}

/// Flying suicide unit: 25 hp, 110 damage against air targets on contact.
#[must_use]
pub fn kamikaze(id: u32, x: i32, y: i32) -> CombatUnit<()> {
    UnitBuilder::new(UnitKind::Kamikaze)
        .position(x, y)
        .vitals(25, 25)
        .mobility(fixed_f(6.7), true, -1)
        .weapons(
            Weapon::NONE,
            Weapon {
                damage: 110,
                cooldown: 1,
                max_range: 3,
                min_range: 0,
                damage_type: DamageType::Normal,
            },
        )
        .profile(UnitSize::Small, true, false)
        .id(id)
        .build()
}

/// Buried ground suicide unit: detonates for 125 explosive damage, only
/// wakes for targets within its trigger radius.
#[must_use]
pub fn seeker_mine(id: u32, x: i32, y: i32) -> CombatUnit<()> {
    UnitBuilder::new(UnitKind::SeekerMine)
        .position(x, y)
        .vitals(20, 20)
        .mobility(fixed(16), false, 0)
        .weapons(
            Weapon {
                damage: 125,
                cooldown: 1,
                max_range: 10,
                min_range: 0,
                damage_type: DamageType::Explosive,
            },
            Weapon::NONE,
        )
        .profile(UnitSize::Small, false, true)
        .id(id)
        .build()
}

/// Flying drone platform. Damage and fire rate derive from the drone
/// complement.
#[must_use]
pub fn carrier(id: u32, x: i32, y: i32, drones: i32) -> CombatUnit<()> {
    UnitBuilder::new(UnitKind::Carrier)
        .position(x, y)
        .vitals(300, 300)
        .mobility(fixed_f(3.3), true, -1)
        .weapons(Weapon::NONE, Weapon::NONE)
        .profile(UnitSize::Large, false, false)
        .shields(150, 150, 0)
        .upgrades(UpgradeState {
            attacker_count: drones,
            ..UpgradeState::default()
        })
        .id(id)
        .build()
}

/// Unarmed, immobile 40 hp punching bag.
#[must_use]
pub fn target_dummy(id: u32, x: i32, y: i32) -> CombatUnit<()> {
    UnitBuilder::new(UnitKind::Trooper)
        .position(x, y)
        .vitals(40, 40)
        .mobility(I32F32::ZERO, false, 0)
        .weapons(Weapon::NONE, Weapon::NONE)
        .profile(UnitSize::Small, true, false)
        .id(id)
        .build()
}
