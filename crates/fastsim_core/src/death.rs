//! Death processing: cleanup and the garrison transformation.

use crate::grid::CollisionGrid;
use crate::kinds::{UnitKind, UnitSize, OCCUPANT_MAX_HEALTH, TILE_SIZE};
use crate::math::HEALTH_SCALE_SHIFT;
use crate::unit::CombatUnit;

/// Processes a unit's death after it has been removed from its roster.
///
/// Releases the dead unit's collision cell and clears it as a remembered
/// target so no enemy ever aims at a unit that no longer exists. A
/// garrison with occupants does not simply vanish: its occupants spill
/// out as individual infantry at its position, the first reusing the
/// garrison's id and the rest drawing fresh ids.
pub(crate) fn on_death<X: Clone>(
    mut dead: CombatUnit<X>,
    its_friendlies: &mut Vec<CombatUnit<X>>,
    its_enemies: &mut [CombatUnit<X>],
    grid: &mut CollisionGrid,
    next_id: &mut u32,
) {
    grid.release(&dead);

    for enemy in its_enemies.iter_mut() {
        if enemy.target == Some(dead.id) {
            enemy.target = None;
        }
    }

    if dead.kind != UnitKind::Garrison || dead.attacker_count < 1 {
        return;
    }

    // Occupants fight on foot at one tile less range and their own,
    // slower, individual fire rate.
    let occupants = dead.attacker_count;
    dead.kind = UnitKind::Trooper;
    dead.attacker_count = 0;

    let unupgraded = 5 * TILE_SIZE;
    let upgraded = 6 * TILE_SIZE;
    dead.ground_max_range = match dead.ground_max_range {
        r if r == unupgraded => 4 * TILE_SIZE,
        r if r == upgraded => 5 * TILE_SIZE,
        r => r,
    };
    dead.ground_max_range_squared = dead.ground_max_range * dead.ground_max_range;
    dead.air_max_range = dead.ground_max_range;
    dead.air_max_range_squared = dead.ground_max_range_squared;

    dead.armor = 0;
    dead.max_health = OCCUPANT_MAX_HEALTH << HEALTH_SCALE_SHIFT;
    dead.health = dead.max_health;
    dead.ground_cooldown *= 4;
    dead.air_cooldown *= 4;
    dead.size = UnitSize::Small;
    dead.organic = true;

    for spawned in 0..occupants {
        let mut trooper = dead.clone();
        if spawned > 0 {
            trooper.id = *next_id;
            *next_id += 1;
        }
        grid.occupy(&mut trooper);
        its_friendlies.push(trooper);
    }
}
