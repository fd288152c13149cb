//! Benchmarks for full-engagement simulation throughput.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fastsim_core::prelude::*;

fn rifle() -> Weapon {
    Weapon {
        damage: 6,
        cooldown: 15,
        max_range: 4 * TILE_SIZE,
        min_range: 0,
        damage_type: DamageType::Normal,
    }
}

fn trooper(id: u32, x: i32, y: i32) -> CombatUnit<()> {
    UnitBuilder::new(UnitKind::Trooper)
        .position(x, y)
        .vitals(40, 40)
        .mobility(Fixed::from_num(4), false, 0)
        .weapons(rifle(), rifle())
        .profile(UnitSize::Small, true, false)
        .id(id)
        .build()
}

fn mirrored_sim(per_side: i32) -> Simulator {
    let mut sim: Simulator = Simulator::new(128, 128);
    for i in 0..per_side {
        sim.add_unit(
            Side::Attacker,
            trooper(i as u32, 400, 800 + i * 20),
        );
        sim.add_unit(
            Side::Defender,
            trooper((per_side + i) as u32, 1200, 800 + i * 20),
        );
    }
    sim
}

fn bench_engagements(c: &mut Criterion) {
    c.bench_function("mirrored_12v12_96_frames", |b| {
        b.iter(|| {
            let mut sim = mirrored_sim(12);
            sim.simulate(96, false);
            black_box(sim.state_hash())
        });
    });

    c.bench_function("mirrored_48v48_to_resolution", |b| {
        b.iter(|| {
            let mut sim = mirrored_sim(48);
            sim.simulate(-1, true);
            black_box(sim.state_hash())
        });
    });
}

criterion_group!(benches, bench_engagements);
criterion_main!(benches);
