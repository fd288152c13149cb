//! Base statistics for each unit kind.
//!
//! The simulator core takes fully configured units and knows nothing
//! about balance numbers; this catalog is where the runner keeps them.
//! Values line up with the shared test fixtures so scenario results are
//! comparable with the test suite.

use fastsim_core::prelude::*;

struct BaseStats {
    health: i32,
    shields: i32,
    shield_armor: i32,
    armor: i32,
    speed: Fixed,
    flying: bool,
    ground: Weapon,
    air: Weapon,
    size: UnitSize,
    organic: bool,
    undetected: bool,
}

fn base_stats(kind: UnitKind) -> BaseStats {
    let none = BaseStats {
        health: 1,
        shields: 0,
        shield_armor: 0,
        armor: 0,
        speed: Fixed::ZERO,
        flying: false,
        ground: Weapon::NONE,
        air: Weapon::NONE,
        size: UnitSize::Small,
        organic: false,
        undetected: false,
    };
    match kind {
        UnitKind::Trooper => {
            let rifle = Weapon {
                damage: 6,
                cooldown: 15,
                max_range: 4 * TILE_SIZE,
                min_range: 0,
                damage_type: DamageType::Normal,
            };
            BaseStats {
                health: 40,
                speed: Fixed::from_num(4),
                ground: rifle,
                air: rifle,
                organic: true,
                ..none
            }
        }
        UnitKind::Raider => BaseStats {
            health: 80,
            speed: Fixed::from_num(32) / Fixed::from_num(5),
            ground: Weapon {
                damage: 20,
                cooldown: 30,
                max_range: 5 * TILE_SIZE,
                min_range: 0,
                damage_type: DamageType::Concussive,
            },
            size: UnitSize::Medium,
            ..none
        },
        UnitKind::Lancer => {
            let cannon = Weapon {
                damage: 20,
                cooldown: 30,
                max_range: 4 * TILE_SIZE,
                min_range: 0,
                damage_type: DamageType::Explosive,
            };
            BaseStats {
                health: 100,
                shields: 80,
                speed: Fixed::from_num(5),
                ground: cannon,
                air: cannon,
                size: UnitSize::Large,
                ..none
            }
        }
        UnitKind::Medic => BaseStats {
            health: 60,
            speed: Fixed::from_num(4),
            organic: true,
            ..none
        },
        UnitKind::SiegeArtillery => BaseStats {
            health: 150,
            ground: Weapon {
                damage: 70,
                cooldown: 75,
                max_range: 12 * TILE_SIZE,
                min_range: 2 * TILE_SIZE,
                damage_type: DamageType::Explosive,
            },
            size: UnitSize::Large,
            ..none
        },
        UnitKind::Garrison => BaseStats {
            health: 350,
            size: UnitSize::Large,
            ..none
        },
        UnitKind::SeekerMine => BaseStats {
            health: 20,
            speed: Fixed::from_num(16),
            ground: Weapon {
                damage: 125,
                cooldown: 1,
                max_range: 10,
                min_range: 0,
                damage_type: DamageType::Explosive,
            },
            undetected: true,
            ..none
        },
        UnitKind::Kamikaze => BaseStats {
            health: 25,
            speed: Fixed::from_num(67) / Fixed::from_num(10),
            flying: true,
            air: Weapon {
                damage: 110,
                cooldown: 1,
                max_range: 3,
                min_range: 0,
                damage_type: DamageType::Normal,
            },
            organic: true,
            ..none
        },
        UnitKind::Carrier => BaseStats {
            health: 300,
            shields: 150,
            speed: Fixed::from_num(33) / Fixed::from_num(10),
            flying: true,
            size: UnitSize::Large,
            ..none
        },
        UnitKind::Interceptor => BaseStats {
            health: 40,
            shields: 40,
            speed: Fixed::from_num(13),
            flying: true,
            ..none
        },
        UnitKind::Observer => BaseStats {
            health: 40,
            shields: 20,
            speed: Fixed::from_num(3),
            flying: true,
            ..none
        },
    }
}

/// Builds a combat unit of the given kind at a position, applying the
/// catalog's base stats plus the scenario's upgrade state.
#[must_use]
pub fn instantiate(
    kind: UnitKind,
    id: u32,
    x: i32,
    y: i32,
    elevation: i32,
    upgrades: UpgradeState,
) -> CombatUnit<()> {
    let stats = base_stats(kind);
    UnitBuilder::new(kind)
        .position(x, y)
        .vitals(stats.health, stats.health)
        .mobility(stats.speed, stats.flying, elevation)
        .weapons(stats.ground, stats.air)
        .profile(stats.size, stats.organic, stats.undetected)
        .shields(stats.shields, stats.shields, stats.shield_armor)
        .armor(stats.armor)
        .upgrades(upgrades)
        .id(id)
        .build()
}
