//! End-to-end engagement scenarios exercising one mechanic each.

use fastsim_core::prelude::*;
use fastsim_test_utils::fixtures;

#[test]
fn shields_absorb_before_life() {
    let mut sim = Simulator::new(64, 64);
    sim.add_unit(Side::Attacker, fixtures::trooper(1, 100, 100));
    sim.add_unit(Side::Defender, fixtures::lancer(2, 150, 100));
    sim.simulate(1, false);

    let (_, defenders) = sim.rosters();
    let lancer = &defenders[0];
    // 6 damage into the shield layer, then +7 scaled regeneration.
    assert_eq!(lancer.shields, (80 << HEALTH_SCALE_SHIFT) - (6 << HEALTH_SCALE_SHIFT) + 7);
    assert_eq!(lancer.health_hp(), 100);
}

#[test]
fn splash_damage_falls_off_by_ring() {
    let mut sim = Simulator::new(64, 64);
    sim.add_unit(Side::Attacker, fixtures::siege_artillery(1, 100, 100));
    // A friendly bystander standing next to the shell's landing spot.
    sim.add_unit(Side::Attacker, fixtures::target_dummy(2, 400, 120));

    sim.add_unit(Side::Defender, fixtures::target_dummy(10, 400, 100));
    sim.add_unit(Side::Defender, fixtures::target_dummy(11, 400, 110));
    sim.add_unit(Side::Defender, fixtures::target_dummy(12, 400, 150));
    sim.add_unit(Side::Defender, fixtures::target_dummy(13, 400, 180));
    sim.add_unit(Side::Defender, fixtures::target_dummy(14, 400, 190));
    // A flyer hovering right at the impact point.
    sim.add_unit(Side::Defender, fixtures::kamikaze(15, 400, 100));

    sim.simulate(1, true);
    let (attackers, defenders) = sim.rosters();

    let hp = |id: u32| {
        defenders
            .iter()
            .find(|u| u.id == id)
            .map(CombatUnit::health_hp)
            .expect("defender survived")
    };
    // Primary: 70 explosive against small, halved to 35.
    assert_eq!(hp(10), 5);
    // Inner ring: full 70 through the same size modifier.
    assert_eq!(hp(11), 5);
    // Median ring: 35 base, 17.5 after the modifier.
    assert_eq!(hp(12), 22);
    // Outer ring: 17 base, 8.5 after the modifier.
    assert_eq!(hp(13), 31);
    // Beyond the blast.
    assert_eq!(hp(14), 40);
    // Splash never touches flyers, even at ground zero.
    assert_eq!(hp(15), 25);

    // Friendly fire: the bystander sits in the inner ring.
    let bystander = attackers.iter().find(|u| u.id == 2).expect("bystander");
    assert_eq!(bystander.health_hp(), 5);
}

#[test]
fn splash_disabled_hits_only_the_primary() {
    let mut sim = Simulator::new(64, 64);
    sim.add_unit(Side::Attacker, fixtures::siege_artillery(1, 100, 100));
    sim.add_unit(Side::Defender, fixtures::target_dummy(10, 400, 100));
    sim.add_unit(Side::Defender, fixtures::target_dummy(11, 400, 110));
    sim.simulate(1, false);

    let (_, defenders) = sim.rosters();
    let neighbor = defenders.iter().find(|u| u.id == 11).expect("neighbor");
    assert_eq!(neighbor.health_hp(), 40);
}

#[test]
fn destroyed_garrison_spills_fighting_occupants() {
    let mut sim = Simulator::new(64, 64);
    sim.add_unit(Side::Attacker, fixtures::lancer(1, 100, 100));
    sim.add_unit(Side::Defender, fixtures::garrison(50, 200, 100, 4));

    // One volley away from destruction.
    sim.rosters_mut().1[0].health = 1 << HEALTH_SCALE_SHIFT;
    sim.simulate(1, false);

    let (attackers, defenders) = sim.rosters();
    assert_eq!(defenders.len(), 4);
    let mut ids: Vec<u32> = defenders.iter().map(|u| u.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4, "occupant ids must be unique");

    for occupant in defenders {
        assert_eq!(occupant.kind, UnitKind::Trooper);
        assert_eq!(occupant.health_hp(), 40);
        assert_eq!(occupant.ground_max_range, 4 * TILE_SIZE);
        assert_eq!(occupant.armor, 0);
    }

    // The occupants acted in their own pass and shot back.
    let lancer = &attackers[0];
    assert!(lancer.shields < 80 << HEALTH_SCALE_SHIFT);
}

#[test]
fn kiter_retreats_from_shorter_ranged_chaser() {
    let mut sim = Simulator::new(64, 64);
    sim.add_unit(Side::Attacker, fixtures::raider(1, 300, 100));
    sim.add_unit(Side::Defender, fixtures::trooper(2, 120, 100));
    sim.simulate(2, false);

    let (attackers, _) = sim.rosters();
    // Fired on frame one, then opened distance while on cooldown.
    assert!(attackers[0].x > 300, "raider should back away, x = {}", attackers[0].x);
}

#[test]
fn kiter_closes_on_siege_artillery() {
    let mut sim = Simulator::new(64, 64);
    let mut raider = fixtures::raider(1, 300, 100);
    raider.cooldown_remaining = 20;
    sim.add_unit(Side::Attacker, raider);
    sim.add_unit(Side::Defender, fixtures::siege_artillery(2, 120, 100));
    sim.simulate(1, false);

    let (attackers, _) = sim.rosters();
    // Standing at an artillery piece's preferred range is suicide, so
    // the kiter advances even while in range and on cooldown.
    assert!(attackers[0].x < 300, "raider should close, x = {}", attackers[0].x);
}

#[test]
fn medic_heals_and_shadows_the_patient() {
    let mut sim = Simulator::new(64, 64);
    sim.add_unit(Side::Attacker, fixtures::target_dummy(1, 1800, 1800));

    let mut patient = fixtures::target_dummy(2, 200, 200);
    patient.health = 30 << HEALTH_SCALE_SHIFT;
    sim.add_unit(Side::Defender, patient);
    sim.add_unit(Side::Defender, fixtures::medic(3, 300, 300));

    sim.simulate(2, false);
    let (_, defenders) = sim.rosters();
    let patient = defenders.iter().find(|u| u.id == 2).expect("patient");
    let medic = defenders.iter().find(|u| u.id == 3).expect("medic");

    // Two frames of healing; the healed flag resets between frames.
    assert_eq!(patient.health, (30 << HEALTH_SCALE_SHIFT) + 300);
    assert_eq!((medic.x, medic.y), (patient.x, patient.y));
}

#[test]
fn seeker_mine_ignores_distant_targets() {
    let mut sim = Simulator::new(64, 64);
    sim.add_unit(Side::Attacker, fixtures::seeker_mine(1, 100, 100));
    sim.add_unit(Side::Defender, fixtures::trooper(2, 300, 100));
    let frames = sim.simulate(-1, false);

    // The mine is out of trigger range and undetected, so neither side
    // can act and the engagement goes quiet immediately.
    assert_eq!(frames, 1);
    let (attackers, defenders) = sim.rosters();
    assert_eq!((attackers[0].x, attackers[0].y), (100, 100));
    assert_eq!(defenders[0].health_hp(), 40);
}

#[test]
fn seeker_mine_chases_and_detonates() {
    let mut sim = Simulator::new(64, 64);
    sim.add_unit(Side::Attacker, fixtures::seeker_mine(1, 100, 100));
    sim.add_unit(Side::Defender, fixtures::trooper(2, 150, 100));
    sim.simulate(-1, false);

    let (attackers, defenders) = sim.rosters();
    assert!(defenders.is_empty(), "trooper should die to the mine");
    assert!(attackers.is_empty(), "mine dies with its attack");
}

#[test]
fn artillery_cannot_fire_inside_minimum_range() {
    let mut sim = Simulator::new(64, 64);
    sim.add_unit(Side::Attacker, fixtures::siege_artillery(1, 100, 100));
    sim.add_unit(Side::Defender, fixtures::target_dummy(2, 150, 100));
    let frames = sim.simulate(-1, false);

    // Too close to target, immobile, nothing else to do.
    assert_eq!(frames, 1);
    let (_, defenders) = sim.rosters();
    assert_eq!(defenders[0].health_hp(), 40);
}

#[test]
fn uphill_shots_double_the_cooldown() {
    let mut sim = Simulator::new(64, 64);
    let mut uphill_shooter = fixtures::trooper(1, 100, 100);
    uphill_shooter.elevation = 0;
    sim.add_unit(Side::Attacker, uphill_shooter);
    let mut high_ground = fixtures::target_dummy(2, 150, 100);
    high_ground.elevation = 2;
    sim.add_unit(Side::Defender, high_ground);
    sim.simulate(1, false);

    let (attackers, _) = sim.rosters();
    // Doubled 15-frame cooldown, minus the end-of-frame tick.
    assert_eq!(attackers[0].cooldown_remaining, 29);
}

#[test]
fn level_shots_use_the_normal_cooldown() {
    let mut sim = Simulator::new(64, 64);
    sim.add_unit(Side::Attacker, fixtures::trooper(1, 100, 100));
    sim.add_unit(Side::Defender, fixtures::target_dummy(2, 150, 100));
    sim.simulate(1, false);

    let (attackers, _) = sim.rosters();
    assert_eq!(attackers[0].cooldown_remaining, 14);
}

#[test]
fn carrier_fights_with_its_drone_complement() {
    let mut sim = Simulator::new(64, 64);
    sim.add_unit(Side::Attacker, fixtures::carrier(1, 100, 100, 8));
    sim.add_unit(Side::Defender, fixtures::target_dummy(2, 300, 100));
    sim.simulate(1, false);

    let (attackers, defenders) = sim.rosters();
    assert_eq!(defenders[0].health_hp(), 34);
    // 37.4 / 8 rounds to 5, minus the end-of-frame tick.
    assert_eq!(attackers[0].cooldown_remaining, 4);
}
