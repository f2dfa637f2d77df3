//! Majority control, field generators and territory bonuses.

use frontier_rules::core::{MatchConfig, PlayerId, Resources, RuleViolation};
use frontier_rules::engine::{MatchBuilder, MatchEngine, ResolveOptions, TurnPhase};
use frontier_rules::facilities::FacilityId;
use frontier_rules::ships::ShipId;
use frontier_rules::territories::{FieldGenerator, TerritoryId};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);

fn engine(players: usize, resources: Resources) -> MatchEngine {
    let config = MatchConfig {
        starting_resources: resources,
        seat_fuel_bonus: 0,
        ..MatchConfig::with_seed(9)
    };
    MatchBuilder::new()
        .config(config)
        .player_count(players)
        .build()
        .unwrap()
}

fn place(engine: &mut MatchEngine, player: PlayerId, territory: TerritoryId) {
    engine
        .place_colony_on_territory(player, territory)
        .unwrap()
        .unwrap();
}

fn to_phase(engine: &mut MatchEngine, phase: TurnPhase) {
    while engine.phase() != phase {
        engine.advance_phase();
    }
}

fn vp(engine: &MatchEngine, player: PlayerId) -> u32 {
    engine.players().get(player).unwrap().victory_points().total()
}

#[test]
fn test_tie_displaces_controller() {
    let mut engine = engine(3, Resources::default());
    let lem = TerritoryId::LemBadlands;

    place(&mut engine, P0, lem);
    assert_eq!(engine.territories().controller(lem), Some(P0));

    place(&mut engine, P1, lem);
    assert_eq!(engine.territories().controller(lem), None);
    assert_eq!(vp(&engine, P0), 1);

    place(&mut engine, P1, lem);
    assert_eq!(engine.territories().controller(lem), Some(P1));
    assert_eq!(vp(&engine, P1), 3);
}

#[test]
fn test_three_way_tie_has_no_controller() {
    let mut engine = engine(3, Resources::default());
    let crater = TerritoryId::AsimovCrater;
    for p in [P0, P1, P2] {
        place(&mut engine, p, crater);
    }
    assert_eq!(engine.territories().controller(crater), None);
    assert_eq!(
        engine.place_colony_on_territory(P0, crater).unwrap(),
        Err(RuleViolation::TerritoryFull(crater))
    );
    assert_eq!(engine.territories().get(crater).occupants().len(), 3);
}

#[test]
fn test_repulsor_blocks_placement() {
    let mut engine = engine(2, Resources::energy(3));
    to_phase(&mut engine, TurnPhase::Purchase);

    let previous = engine
        .place_field_generator(P0, FieldGenerator::Repulsor, TerritoryId::HerbertValley)
        .unwrap()
        .unwrap();
    assert_eq!(previous, None);
    assert_eq!(engine.players().get(P0).unwrap().resources.energy, 0);

    assert_eq!(
        engine
            .place_colony_on_territory(P1, TerritoryId::HerbertValley)
            .unwrap(),
        Err(RuleViolation::TerritoryRepulsed(TerritoryId::HerbertValley))
    );
}

#[test]
fn test_positron_adds_one_point() {
    let mut engine = engine(2, Resources::energy(6));
    let plains = TerritoryId::HeinleinPlains;
    place(&mut engine, P0, plains);
    place(&mut engine, P0, plains);
    assert_eq!(vp(&engine, P0), 3);

    to_phase(&mut engine, TurnPhase::Purchase);
    engine
        .place_field_generator(P0, FieldGenerator::Positron, plains)
        .unwrap()
        .unwrap();
    assert_eq!(vp(&engine, P0), 4);

    let moved_from = engine
        .place_field_generator(P0, FieldGenerator::Positron, TerritoryId::LemBadlands)
        .unwrap()
        .unwrap();
    assert_eq!(moved_from, Some(plains));
    assert_eq!(vp(&engine, P0), 3);
}

#[test]
fn test_generator_rules() {
    let mut engine = engine(2, Resources::energy(5));
    to_phase(&mut engine, TurnPhase::Purchase);

    assert_eq!(
        engine
            .place_field_generator(P1, FieldGenerator::Isolation, TerritoryId::LemBadlands)
            .unwrap(),
        Err(RuleViolation::NotActivePlayer)
    );

    engine
        .place_field_generator(P0, FieldGenerator::Isolation, TerritoryId::LemBadlands)
        .unwrap()
        .unwrap();
    assert_eq!(
        engine
            .place_field_generator(P0, FieldGenerator::Isolation, TerritoryId::LemBadlands)
            .unwrap(),
        Err(RuleViolation::SameTerritory)
    );
    assert!(matches!(
        engine
            .place_field_generator(P0, FieldGenerator::Positron, TerritoryId::PohlFoothills)
            .unwrap(),
        Err(RuleViolation::InsufficientResources { .. })
    ));
}

#[test]
fn test_income_paid_at_turn_start() {
    let mut engine = engine(2, Resources::default());
    place(&mut engine, P0, TerritoryId::HeinleinPlains);
    place(&mut engine, P0, TerritoryId::LemBadlands);

    // Player 0's turn, then player 1's, then back to player 0.
    for _ in 0..12 {
        engine.advance_phase();
    }
    assert_eq!(engine.active_player(), P0);
    assert_eq!(engine.players().get(P0).unwrap().resources, Resources::new(1, 1, 0));
    assert_eq!(engine.players().get(P1).unwrap().resources, Resources::default());
}

#[test]
fn test_isolation_suppresses_income_but_not_control() {
    let mut engine = engine(2, Resources::energy(3));
    place(&mut engine, P0, TerritoryId::LemBadlands);

    to_phase(&mut engine, TurnPhase::Purchase);
    engine
        .place_field_generator(P0, FieldGenerator::Isolation, TerritoryId::LemBadlands)
        .unwrap()
        .unwrap();

    for _ in 0..8 {
        engine.advance_phase();
    }
    assert_eq!(engine.active_player(), P0);
    assert_eq!(engine.phase(), TurnPhase::RollDice);
    assert_eq!(engine.players().get(P0).unwrap().resources.fuel, 0);
    assert_eq!(engine.territories().controller(TerritoryId::LemBadlands), Some(P0));
    assert_eq!(vp(&engine, P0), 2);
}

#[test]
fn test_asimov_crater_discounts_constructor() {
    let config = MatchConfig {
        starting_resources: Resources::ore(2),
        seat_fuel_bonus: 0,
        ..MatchConfig::with_seed(9)
    };
    let mut engine = MatchBuilder::new()
        .config(config)
        .player_count(2)
        .dice([5, 5, 5])
        .build()
        .unwrap();
    place(&mut engine, P0, TerritoryId::AsimovCrater);

    engine.roll_dice().unwrap();
    let fleet = [ShipId::new(P0, 0), ShipId::new(P0, 1), ShipId::new(P0, 2)];
    engine
        .dock_ships_at_facility(FacilityId::ColonyConstructor, &fleet, None)
        .unwrap()
        .unwrap();
    let options = ResolveOptions::new().select(FacilityId::ColonyConstructor, TerritoryId::BurroughsDesert);
    let report = engine.resolve_actions(&options).unwrap();

    assert!(report.all_succeeded());
    assert_eq!(engine.players().get(P0).unwrap().resources.ore, 0);
    assert_eq!(
        engine.players().get(P0).unwrap().colonies(),
        &[TerritoryId::AsimovCrater, TerritoryId::BurroughsDesert]
    );
}

#[test]
fn test_control_never_exceeds_capacity() {
    let mut engine = engine(2, Resources::default());
    let valley = TerritoryId::HerbertValley;
    place(&mut engine, P0, valley);
    place(&mut engine, P1, valley);
    place(&mut engine, P0, valley);
    assert_eq!(
        engine.place_colony_on_territory(P1, valley).unwrap(),
        Err(RuleViolation::TerritoryFull(valley))
    );
    assert_eq!(engine.territories().controller(valley), Some(P0));
    assert!(engine.validate().is_empty());
}
