//! Area damage around an artillery shell's point of impact.
//!
//! Splash is indiscriminate: every ground unit near the impact takes
//! ring-scaled damage, friend and foe alike, including the firing unit.
//! Only the primary target is exempt here, because it already took the
//! direct hit.

use crate::damage::apply_damage;
use crate::death::on_death;
use crate::grid::CollisionGrid;
use crate::kinds::DamageType;
use crate::unit::CombatUnit;

/// Squared radius of the full-damage ring.
pub const SPLASH_INNER_RADIUS_SQUARED: i32 = 100;
/// Squared radius of the half-damage ring.
pub const SPLASH_MEDIAN_RADIUS_SQUARED: i32 = 625;
/// Squared radius of the quarter-damage ring.
pub const SPLASH_OUTER_RADIUS_SQUARED: i32 = 1600;

/// Ring-scaled splash damage for a unit at the given squared distance
/// from the impact point, or `None` when out of the blast entirely.
///
/// The squared distance is quartered before the ring comparison, an
/// engine approximation for measuring from the shell to the unit's
/// edge rather than its center.
#[must_use]
pub fn ring_damage(dist_squared: i32, damage: i32) -> Option<i32> {
    let effective = dist_squared / 4;
    if effective <= SPLASH_INNER_RADIUS_SQUARED {
        Some(damage)
    } else if effective <= SPLASH_MEDIAN_RADIUS_SQUARED {
        Some(damage >> 1)
    } else if effective <= SPLASH_OUTER_RADIUS_SQUARED {
        Some(damage >> 2)
    } else {
        None
    }
}

/// Applies splash around an impact to both rosters and processes any
/// resulting deaths.
///
/// `attackers` is the firing unit's roster, `defenders` the primary
/// target's. The primary target is excluded by id; the firing unit is
/// not and can die to its own shell. Damage is applied to everyone
/// first, then casualties are removed, so units spawned by a death
/// transformation never take splash from the shell that killed their
/// host.
pub(crate) fn resolve_splash<X: Clone>(
    impact_x: i32,
    impact_y: i32,
    primary_id: u32,
    damage: i32,
    damage_type: DamageType,
    attackers: &mut Vec<CombatUnit<X>>,
    defenders: &mut Vec<CombatUnit<X>>,
    grid: &mut CollisionGrid,
    next_id: &mut u32,
) {
    fn splash_roster<X>(
        roster: &mut [CombatUnit<X>],
        exempt: Option<u32>,
        impact_x: i32,
        impact_y: i32,
        damage: i32,
        damage_type: DamageType,
        casualties: &mut Vec<u32>,
    ) {
        for unit in roster.iter_mut() {
            if unit.flying || Some(unit.id) == exempt {
                continue;
            }
            let dx = unit.x - impact_x;
            let dy = unit.y - impact_y;
            if let Some(scaled) = ring_damage(dx * dx + dy * dy, damage) {
                apply_damage(unit, scaled, damage_type);
                if unit.health == 0 {
                    casualties.push(unit.id);
                }
            }
        }
    }

    let mut casualties: Vec<u32> = Vec::new();
    splash_roster(
        defenders,
        Some(primary_id),
        impact_x,
        impact_y,
        damage,
        damage_type,
        &mut casualties,
    );
    let defender_casualties = casualties.len();
    splash_roster(
        attackers,
        None,
        impact_x,
        impact_y,
        damage,
        damage_type,
        &mut casualties,
    );

    for (n, id) in casualties.into_iter().enumerate() {
        if n < defender_casualties {
            if let Some(j) = defenders.iter().position(|u| u.id == id) {
                let dead = defenders.swap_remove(j);
                on_death(dead, defenders, attackers, grid, next_id);
            }
        } else if let Some(j) = attackers.iter().position(|u| u.id == id) {
            let dead = attackers.swap_remove(j);
            on_death(dead, attackers, defenders, grid, next_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{UnitKind, UnitSize};
    use crate::math::Fixed;
    use crate::unit::{UnitBuilder, Weapon};

    fn bystander(id: u32, x: i32, y: i32, health: i32) -> CombatUnit<()> {
        UnitBuilder::new(UnitKind::Trooper)
            .position(x, y)
            .vitals(health, health)
            .mobility(Fixed::ZERO, false, 0)
            .weapons(Weapon::NONE, Weapon::NONE)
            .profile(UnitSize::Small, true, false)
            .id(id)
            .build()
    }

    #[test]
    fn test_blast_removes_casualties_from_both_rosters() {
        let mut grid = CollisionGrid::new(16, 16);
        let mut attackers = vec![bystander(1, 100, 100, 5), bystander(2, 300, 300, 40)];
        let mut defenders = vec![bystander(10, 100, 110, 40), bystander(11, 100, 105, 5)];
        for unit in attackers.iter_mut().chain(defenders.iter_mut()) {
            grid.occupy(unit);
        }
        let mut next_id = 20;

        // 70 explosive at the primary's feet; the primary itself is exempt.
        resolve_splash(
            100,
            100,
            10,
            70,
            DamageType::Explosive,
            &mut attackers,
            &mut defenders,
            &mut grid,
            &mut next_id,
        );

        // The fragile units on each side die and are removed at once.
        assert_eq!(attackers.len(), 1);
        assert_eq!(attackers[0].id, 2);
        assert_eq!(defenders.len(), 1);
        assert_eq!(defenders[0].id, 10);
        assert_eq!(defenders[0].health_hp(), 40);
    }

    #[test]
    fn test_ring_boundaries() {
        // Squared distances are quartered before ring lookup.
        assert_eq!(ring_damage(400, 40), Some(40));
        assert_eq!(ring_damage(404, 40), Some(20));
        assert_eq!(ring_damage(2500, 40), Some(20));
        assert_eq!(ring_damage(2504, 40), Some(10));
        assert_eq!(ring_damage(6400, 40), Some(10));
        assert_eq!(ring_damage(6404, 40), None);
    }

    #[test]
    fn test_point_blank_is_full_damage() {
        assert_eq!(ring_damage(0, 70), Some(70));
    }
}
