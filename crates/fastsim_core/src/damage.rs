//! Damage application: shields first, then armor, then size modifiers.

use crate::kinds::{DamageType, UnitSize};
use crate::math::HEALTH_SCALE_SHIFT;
use crate::unit::CombatUnit;

/// Every landed hit removes at least this much scaled life (half a hit
/// point), no matter how much armor soaks.
pub const MIN_DAMAGE: i32 = 128;

/// Scales raw weapon damage by the size/type effectiveness table.
#[must_use]
pub fn size_modifier(damage: i32, damage_type: DamageType, size: UnitSize) -> i32 {
    match (damage_type, size) {
        (DamageType::Concussive, UnitSize::Large) => damage / 4,
        (DamageType::Concussive, UnitSize::Medium) => damage / 2,
        (DamageType::Explosive, UnitSize::Small) => damage / 2,
        (DamageType::Explosive, UnitSize::Medium) => damage * 3 / 4,
        _ => damage,
    }
}

/// Applies one hit to a target.
///
/// `raw_damage` is in whole hit points. Shields absorb first, with
/// shield armor reducing the absorbed amount; whatever spills through
/// is reduced by regular armor and the size modifier, floored at
/// [`MIN_DAMAGE`]. Neither shields nor health ever go negative.
pub fn apply_damage<X>(target: &mut CombatUnit<X>, raw_damage: i32, damage_type: DamageType) {
    let mut damage = raw_damage << HEALTH_SCALE_SHIFT;

    if target.shields > 0 {
        let shield_soak = target.shields + (target.shield_armor << HEALTH_SCALE_SHIFT);
        let remaining_shields = target.shields - damage + (target.shield_armor << HEALTH_SCALE_SHIFT);
        if remaining_shields > 0 {
            target.shields = remaining_shields;
            return;
        }
        damage -= shield_soak;
        target.shields = 0;
    }

    if damage <= 0 {
        return;
    }

    damage -= target.armor << HEALTH_SCALE_SHIFT;
    damage = size_modifier(damage, damage_type, target.size);

    target.health -= damage.max(MIN_DAMAGE);
    if target.health < 0 {
        target.health = 0;
    }
}
