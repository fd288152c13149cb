//! Per-unit frame behavior: target selection, movement, and attacks.
//!
//! Each function advances one unit for one frame, mutating both rosters
//! through indices so that deaths can be processed the instant they
//! happen. The behavioral quirks here (keeping an out-of-range target
//! when nothing better exists, closing on siege artillery while kiting,
//! the snap-to-target shortcut) reproduce the engine being modeled;
//! "fixing" them would change predicted combat outcomes.

use tracing::trace;

use crate::damage::apply_damage;
use crate::death::on_death;
use crate::grid::CollisionGrid;
use crate::kinds::{
    UnitKind, KITE_HOLD_THRESHOLD, LANCER_BASE_COOLDOWN, LANCER_KITE_GRACE,
    MEDIC_HEAL_PER_FRAME, SEEKER_MINE_TRIGGER_RANGE, TILE_SIZE,
};
use crate::math::{fixed_sqrt, Fixed};
use crate::splash::resolve_splash;
use crate::unit::CombatUnit;

/// Edge-to-edge range test against linear min and max ranges.
#[must_use]
pub fn is_in_range<X>(
    attacker: &CombatUnit<X>,
    target: &CombatUnit<X>,
    min_range: i32,
    max_range: i32,
) -> bool {
    let dist = attacker.edge_distance(target);
    dist >= min_range && dist <= max_range
}

/// Moves a unit one frame's travel along the given direction vector,
/// subject to collision. Returns whether the position changed.
pub(crate) fn move_towards<X>(
    grid: &mut CollisionGrid,
    unit: &mut CombatUnit<X>,
    dx: i32,
    dy: i32,
) -> bool {
    let dist_squared = dx * dx + dy * dy;
    if dist_squared <= 0 {
        return false;
    }
    let ratio = unit.speed / fixed_sqrt(Fixed::from_num(dist_squared));
    let step_x = (Fixed::from_num(dx) * ratio).to_num::<i32>();
    let step_y = (Fixed::from_num(dy) * ratio).to_num::<i32>();
    grid.try_move(unit, unit.x + step_x, unit.y + step_y)
}

/// Whether a landed ground hit fires uphill at a dug-in defender.
///
/// Shooting up a ledge is unreliable; the model charges the attacker
/// extra cooldown for it. Only applies to ranged ground weapons between
/// two ground units with known elevations.
fn uphill_shot<X>(attacker: &CombatUnit<X>, target: &CombatUnit<X>) -> bool {
    !attacker.flying
        && !target.flying
        && attacker.ground_max_range > TILE_SIZE
        && attacker.elevation >= 0
        && target.elevation >= 0
        && target.elevation > attacker.elevation
}

/// Advances one fighting unit by a frame.
///
/// `friendlies[idx]` is the acting unit. Sets `active` whenever the
/// unit did something that keeps the engagement going.
pub(crate) fn unit_step<X: Clone>(
    friendlies: &mut Vec<CombatUnit<X>>,
    idx: usize,
    enemies: &mut Vec<CombatUnit<X>>,
    grid: &mut CollisionGrid,
    splash_enabled: bool,
    next_id: &mut u32,
    active: &mut bool,
) {
    // Units on cooldown hold still unless their kind kites.
    let kite = {
        let unit = &friendlies[idx];
        if unit.cooldown_remaining > 0 {
            let kites = match unit.kind {
                UnitKind::Raider => true,
                UnitKind::Lancer => {
                    unit.cooldown_remaining <= LANCER_BASE_COOLDOWN - LANCER_KITE_GRACE
                }
                _ => false,
            };
            if !kites {
                *active = true;
                return;
            }
            true
        } else {
            false
        }
    };

    if !friendlies[idx].has_weapon() {
        return;
    }

    // Fetch the remembered target, dropping it if it died or slipped
    // inside minimum range. The too-close target still anchors this
    // frame's distance comparison even though the memory is cleared.
    let mut current: Option<usize> = None;
    let mut current_dist = i32::MAX;
    if let Some(target_id) = friendlies[idx].target {
        if let Some(j) = enemies
            .iter()
            .position(|e| e.health > 0 && e.id == target_id)
        {
            current = Some(j);
            current_dist = friendlies[idx].dist_squared(&enemies[j]);
        }
        if current.is_none() || current_dist < friendlies[idx].ground_min_range_squared {
            friendlies[idx].target = None;
        }
    }

    let mut closest = current;
    let mut closest_dist = current_dist;

    let needs_scan = match closest {
        None => true,
        Some(j) => {
            let max_squared = if enemies[j].flying {
                friendlies[idx].air_max_range_squared
            } else {
                friendlies[idx].ground_max_range_squared
            };
            closest_dist > max_squared && !kite
        }
    };

    if needs_scan {
        for j in 0..enemies.len() {
            if Some(j) == current {
                continue;
            }
            let enemy = &enemies[j];
            if enemy.health < 1 || enemy.undetected {
                continue;
            }
            let (damage, min_squared) = if enemy.flying {
                (friendlies[idx].air_damage, friendlies[idx].air_min_range_squared)
            } else {
                (
                    friendlies[idx].ground_damage,
                    friendlies[idx].ground_min_range_squared,
                )
            };
            if damage == 0 {
                continue;
            }
            let d = friendlies[idx].dist_squared(enemy);
            if d < closest_dist && d >= min_squared {
                closest_dist = d;
                closest = Some(j);
            }
        }

        match (current, closest) {
            (Some(_), Some(j)) => {
                let max_squared = if enemies[j].flying {
                    friendlies[idx].air_max_range_squared
                } else {
                    friendlies[idx].ground_max_range_squared
                };
                if closest_dist > max_squared {
                    // Nothing reachable is better; stay on the old target.
                    closest = current;
                    closest_dist = current_dist;
                } else {
                    friendlies[idx].target = Some(enemies[j].id);
                }
            }
            (None, Some(j)) => {
                friendlies[idx].target = Some(enemies[j].id);
            }
            _ => {}
        }
    }

    // Nobody to fight: advance toward the waypoint. Only actual motion
    // keeps the engagement alive, so a blocked or arrived unit cannot
    // stall termination.
    let Some(target_idx) = closest else {
        let dx = friendlies[idx].waypoint_x - friendlies[idx].x;
        let dy = friendlies[idx].waypoint_y - friendlies[idx].y;
        if move_towards(grid, &mut friendlies[idx], dx, dy) {
            *active = true;
        }
        return;
    };

    if kite {
        *active = true;
        let (min_range, max_range) = if enemies[target_idx].flying {
            (0, friendlies[idx].air_max_range)
        } else {
            (
                friendlies[idx].ground_min_range,
                friendlies[idx].ground_max_range,
            )
        };
        let out_of_range = !is_in_range(
            &friendlies[idx],
            &enemies[target_idx],
            min_range,
            max_range,
        );
        // Always close on siege artillery; standing at its preferred
        // range is the worst place to be.
        if out_of_range || enemies[target_idx].kind == UnitKind::SiegeArtillery {
            let dx = enemies[target_idx].x - friendlies[idx].x;
            let dy = enemies[target_idx].y - friendlies[idx].y;
            move_towards(grid, &mut friendlies[idx], dx, dy);
        } else {
            let our_range = if enemies[target_idx].flying {
                friendlies[idx].air_max_range
            } else {
                friendlies[idx].ground_max_range
            };
            let their_range = if friendlies[idx].flying {
                enemies[target_idx].air_max_range
            } else {
                enemies[target_idx].ground_max_range
            };
            if friendlies[idx].cooldown_remaining > KITE_HOLD_THRESHOLD && our_range > their_range
            {
                let dx = friendlies[idx].x - enemies[target_idx].x;
                let dy = friendlies[idx].y - enemies[target_idx].y;
                move_towards(grid, &mut friendlies[idx], dx, dy);
            }
        }
        return;
    }

    // Within one frame's travel: snap onto the target.
    if Fixed::from_num(closest_dist) <= friendlies[idx].speed_squared
        && !(friendlies[idx].x == enemies[target_idx].x
            && friendlies[idx].y == enemies[target_idx].y)
    {
        let (tx, ty) = (enemies[target_idx].x, enemies[target_idx].y);
        grid.try_move(&mut friendlies[idx], tx, ty);
        closest_dist = 0;
        *active = true;
    }

    let (min_range, max_range) = if enemies[target_idx].flying {
        (0, friendlies[idx].air_max_range)
    } else {
        (
            friendlies[idx].ground_min_range,
            friendlies[idx].ground_max_range,
        )
    };

    if is_in_range(&friendlies[idx], &enemies[target_idx], min_range, max_range) {
        let attacker_id = friendlies[idx].id;
        let primary_id = enemies[target_idx].id;

        if enemies[target_idx].flying {
            let (damage, damage_type) =
                (friendlies[idx].air_damage, friendlies[idx].air_damage_type);
            apply_damage(&mut enemies[target_idx], damage, damage_type);
            friendlies[idx].cooldown_remaining = friendlies[idx].air_cooldown;
            if enemies[target_idx].health == 0 {
                trace!(victim = primary_id, killer = attacker_id, "unit destroyed");
                let dead = enemies.swap_remove(target_idx);
                on_death(dead, enemies, friendlies, grid, next_id);
            }
        } else {
            let (damage, damage_type) = (
                friendlies[idx].ground_damage,
                friendlies[idx].ground_damage_type,
            );
            let uphill = uphill_shot(&friendlies[idx], &enemies[target_idx]);
            let (impact_x, impact_y) = (enemies[target_idx].x, enemies[target_idx].y);
            apply_damage(&mut enemies[target_idx], damage, damage_type);

            if splash_enabled && friendlies[idx].kind == UnitKind::SiegeArtillery {
                resolve_splash(
                    impact_x, impact_y, primary_id, damage, damage_type, friendlies, enemies,
                    grid, next_id,
                );
            }

            if let Some(j) = enemies.iter().position(|e| e.id == primary_id) {
                if enemies[j].health == 0 {
                    trace!(victim = primary_id, killer = attacker_id, "unit destroyed");
                    let dead = enemies.swap_remove(j);
                    on_death(dead, enemies, friendlies, grid, next_id);
                }
            }

            // The attacker may have died to its own splash.
            if let Some(i) = friendlies.iter().position(|u| u.id == attacker_id) {
                friendlies[i].cooldown_remaining = if uphill {
                    friendlies[i].ground_cooldown * 2
                } else {
                    friendlies[i].ground_cooldown
                };
            }
        }
        *active = true;
    } else if closest_dist > 0 && friendlies[idx].speed >= Fixed::ONE {
        *active = true;
        let dx = enemies[target_idx].x - friendlies[idx].x;
        let dy = enemies[target_idx].y - friendlies[idx].y;
        move_towards(grid, &mut friendlies[idx], dx, dy);
    }
}

/// Advances a healer by a frame: teleport to the most wounded-adjacent
/// ally and patch it up.
pub(crate) fn medic_step<X>(friendlies: &mut [CombatUnit<X>], idx: usize, active: &mut bool) {
    let (medic_x, medic_y) = (friendlies[idx].x, friendlies[idx].y);

    let mut best: Option<usize> = None;
    let mut best_dist = i32::MAX;
    for j in 0..friendlies.len() {
        let ally = &friendlies[j];
        if ally.organic && ally.health < ally.max_health && !ally.healed_this_frame {
            let dx = medic_x - ally.x;
            let dy = medic_y - ally.y;
            let d = dx * dx + dy * dy;
            if d < best_dist {
                best = Some(j);
                best_dist = d;
            }
        }
    }

    if let Some(j) = best {
        let (x, y) = (friendlies[j].x, friendlies[j].y);
        friendlies[idx].x = x;
        friendlies[idx].y = y;

        let patient = &mut friendlies[j];
        patient.health = (patient.health + MEDIC_HEAL_PER_FRAME).min(patient.max_health);
        patient.healed_this_frame = true;
        *active = true;
    }
}

/// Advances a suicide unit by a frame. Returns `true` when it attacked
/// and must now die; the caller removes it and routes it through death
/// processing.
pub(crate) fn suicide_step<X: Clone>(
    friendlies: &mut [CombatUnit<X>],
    idx: usize,
    enemies: &mut Vec<CombatUnit<X>>,
    grid: &mut CollisionGrid,
    next_id: &mut u32,
    active: &mut bool,
) -> bool {
    let mut closest: Option<usize> = None;
    let mut closest_dist = i32::MAX;
    for j in 0..enemies.len() {
        let enemy = &enemies[j];
        if enemy.health < 1 || enemy.undetected {
            continue;
        }
        let (damage, min_squared) = if enemy.flying {
            (friendlies[idx].air_damage, friendlies[idx].air_min_range_squared)
        } else {
            (
                friendlies[idx].ground_damage,
                friendlies[idx].ground_min_range_squared,
            )
        };
        if damage == 0 {
            continue;
        }
        let d = friendlies[idx].dist_squared(enemy);
        if d < closest_dist && d >= min_squared {
            closest_dist = d;
            closest = Some(j);
        }
    }

    let Some(j) = closest else {
        return false;
    };

    let edge_dist = friendlies[idx].edge_distance(&enemies[j]);
    if edge_dist <= friendlies[idx].ground_max_range {
        let (damage, damage_type) = if enemies[j].flying {
            (friendlies[idx].air_damage, friendlies[idx].air_damage_type)
        } else {
            (
                friendlies[idx].ground_damage,
                friendlies[idx].ground_damage_type,
            )
        };
        apply_damage(&mut enemies[j], damage, damage_type);
        if enemies[j].health == 0 {
            let dead = enemies.swap_remove(j);
            on_death(dead, enemies, friendlies, grid, next_id);
        }
        *active = true;
        return true;
    }

    // Seeker mines stay buried until something wanders close.
    let chases =
        friendlies[idx].kind != UnitKind::SeekerMine || edge_dist <= SEEKER_MINE_TRIGGER_RANGE;
    if Fixed::from_num(closest_dist) > friendlies[idx].speed_squared && chases {
        let dx = enemies[j].x - friendlies[idx].x;
        let dy = enemies[j].y - friendlies[idx].y;
        let ratio = friendlies[idx].speed / fixed_sqrt(Fixed::from_num(dx * dx + dy * dy));
        friendlies[idx].x += (Fixed::from_num(dx) * ratio).to_num::<i32>();
        friendlies[idx].y += (Fixed::from_num(dy) * ratio).to_num::<i32>();
        *active = true;
    }

    false
}
