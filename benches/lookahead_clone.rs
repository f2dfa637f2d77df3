//! Benchmarks for AI lookahead support
//!
//! Measures `clone_state()` on a mid-game match and the cost of a
//! speculative resolve on the copy.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use frontier_rules::core::PlayerId;
use frontier_rules::engine::{MatchBuilder, MatchEngine, ResolveOptions};
use frontier_rules::facilities::FacilityId;
use frontier_rules::ships::ShipId;
use frontier_rules::territories::TerritoryId;

fn mid_game() -> MatchEngine {
    let mut engine = MatchBuilder::new()
        .player_count(4)
        .seed(42)
        .dice([1, 2, 3])
        .build()
        .unwrap();
    for (i, territory) in TerritoryId::ALL.iter().enumerate() {
        let player = PlayerId::new((i % 4) as u8);
        let _ = engine.place_colony_on_territory(player, *territory);
    }
    for p in 0..4 {
        let _ = engine.draw_tech_card(PlayerId::new(p));
    }
    engine.roll_dice().unwrap();
    engine
}

fn bench_clone_state(c: &mut Criterion) {
    let engine = mid_game();

    c.bench_function("clone_state", |b| {
        b.iter(|| black_box(engine.clone_state()))
    });
}

fn bench_speculative_resolve(c: &mut Criterion) {
    let engine = mid_game();
    let p0 = PlayerId::new(0);
    let fleet = [ShipId::new(p0, 0), ShipId::new(p0, 1), ShipId::new(p0, 2)];

    c.bench_function("speculative_resolve", |b| {
        b.iter(|| {
            let mut copy = engine.clone_state();
            let _ = copy.dock_ships_at_facility(FacilityId::RaidersOutpost, &fleet, None);
            black_box(copy.resolve_actions(&ResolveOptions::new()))
        })
    });
}

fn bench_serialize(c: &mut Criterion) {
    let engine = mid_game();

    c.bench_function("serialize", |b| {
        b.iter(|| black_box(engine.serialize()))
    });
}

criterion_group!(benches, bench_clone_state, bench_speculative_resolve, bench_serialize);
criterion_main!(benches);
