//! Match context: every registry of one match, owned together.
//!
//! The context is plain data. It derives `Clone` cheaply because the large
//! tables are `im` vectors, which is what makes scratch-copy atomicity and
//! lookahead clones affordable.

use serde::{Deserialize, Serialize};

use super::phase::GamePhase;
use crate::core::{GameRng, MatchConfig, Outcome, PlayerId, PlayerSpec, RuleViolation};
use crate::facilities::{ArtifactRight, FacilityId, FacilityRegistry};
use crate::players::{PlayerRegistry, VictoryPoints};
use crate::ships::ShipRegistry;
use crate::techcards::{TechCardCatalog, TechCardId};
use crate::territories::{TerritoryId, TerritoryRegistry};

/// Rights and flags that last until the active player's turn ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnState {
    /// Earned at the Raiders' Outpost, spent by a raid.
    pub raid_right: bool,
    /// Earned at the Alien Artifact.
    pub artifact: Option<ArtifactRight>,
    /// The Van Vogt Mountains re-roll was taken.
    pub reroll_used: bool,
}

/// All registries of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchContext {
    pub config: MatchConfig,
    pub clock: GamePhase,
    pub ships: ShipRegistry,
    pub players: PlayerRegistry,
    pub territories: TerritoryRegistry,
    pub facilities: FacilityRegistry,
    pub cards: TechCardCatalog,
    pub turn: TurnState,
}

impl MatchContext {
    /// Seat `specs` and set up the board. The deck is shuffled with `rng`.
    #[must_use]
    pub fn new(config: MatchConfig, specs: &[PlayerSpec], rng: &mut GameRng) -> Self {
        let player_count = specs.len();
        let mut ctx = Self {
            clock: GamePhase::default(),
            ships: ShipRegistry::new(player_count, config.starting_ships),
            players: PlayerRegistry::new(specs, &config),
            territories: TerritoryRegistry::new(config.territory_capacity),
            facilities: FacilityRegistry::new(player_count),
            cards: TechCardCatalog::new(config.visible_cards, rng),
            turn: TurnState::default(),
            config,
        };
        ctx.refresh_scores();
        ctx
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.clock.active
    }

    /// Colonies each player starts with.
    #[must_use]
    pub fn colony_supply(&self) -> usize {
        usize::from(self.config.colony_supply(self.player_count()))
    }

    /// Colonies `player` has yet to place.
    #[must_use]
    pub fn colonies_left(&self, player: PlayerId) -> usize {
        let placed = self.players.get(player).map_or(0, |p| p.colonies().len());
        self.colony_supply().saturating_sub(placed)
    }

    /// True if `player` controls `territory` and its bonus is not isolated.
    #[must_use]
    pub fn bonus_active(&self, player: PlayerId, territory: TerritoryId) -> bool {
        self.territories.bonus_active(territory, player)
    }

    /// True if `player` gets `facility` at a discount.
    #[must_use]
    pub fn discounted(&self, player: PlayerId, facility: FacilityId) -> bool {
        facility
            .discounted_by()
            .is_some_and(|t| self.bonus_active(player, t))
    }

    /// Place a colony from `player`'s supply.
    pub fn place_colony(&mut self, player: PlayerId, territory: TerritoryId) -> Outcome<()> {
        if self.colonies_left(player) == 0 {
            return Err(RuleViolation::NoColoniesLeft);
        }
        self.territories.place_colony(player, territory)?;
        if let Some(p) = self.players.get_mut(player) {
            p.add_colony(territory);
        }
        log::info!("{player} founded a colony on {territory}");
        self.refresh_scores();
        Ok(())
    }

    /// Move one of `player`'s colonies.
    pub fn move_colony(&mut self, player: PlayerId, from: TerritoryId, to: TerritoryId) -> Outcome<()> {
        self.territories.move_colony(player, from, to)?;
        if let Some(p) = self.players.get_mut(player) {
            p.relocate_colony(from, to);
        }
        self.refresh_scores();
        Ok(())
    }

    /// Exchange `a`'s colony on `a_at` with `b`'s colony on `b_at`.
    pub fn swap_colonies(
        &mut self,
        a: PlayerId,
        a_at: TerritoryId,
        b: PlayerId,
        b_at: TerritoryId,
    ) -> Outcome<()> {
        if a == b {
            return Err(RuleViolation::InvalidTarget("cannot swap with yourself".into()));
        }
        self.territories.swap_colonies(a, a_at, b, b_at)?;
        if let Some(p) = self.players.get_mut(a) {
            p.relocate_colony(a_at, b_at);
        }
        if let Some(p) = self.players.get_mut(b) {
            p.relocate_colony(b_at, a_at);
        }
        self.refresh_scores();
        Ok(())
    }

    /// Record that `player` now holds `card`.
    pub(crate) fn take_card(&mut self, player: PlayerId, card: TechCardId) {
        if let Some(p) = self.players.get_mut(player) {
            p.add_card(card);
        }
        self.refresh_scores();
    }

    /// Record that `player` no longer holds `card`.
    pub(crate) fn release_card(&mut self, player: PlayerId, card: TechCardId) {
        if let Some(p) = self.players.get_mut(player) {
            p.remove_card(card);
        }
        self.refresh_scores();
    }

    /// Recompute every player's victory points from the board.
    pub fn refresh_scores(&mut self) {
        for id in PlayerId::all(self.player_count()) {
            let colonies = self.players.get(id).map_or(0, |p| p.colonies().len() as u32);
            let alien_tech = self.cards.victory_points_of(id);
            let (territories, bonuses) = self.territories.score_for(id);
            self.players
                .set_victory_points(id, VictoryPoints::new(colonies, alien_tech, territories, bonuses));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(players: usize) -> MatchContext {
        let specs: Vec<_> = (0..players).map(|i| PlayerSpec::human(format!("P{i}"))).collect();
        MatchContext::new(MatchConfig::with_seed(11), &specs, &mut GameRng::new(11))
    }

    #[test]
    fn test_new_context() {
        let ctx = context(3);
        assert_eq!(ctx.player_count(), 3);
        assert_eq!(ctx.ships.len(), 9);
        assert_eq!(ctx.colony_supply(), 7);
        assert_eq!(ctx.cards.visible().len(), 3);
    }

    #[test]
    fn test_colony_updates_both_sides() {
        let mut ctx = context(2);
        let p0 = PlayerId::new(0);
        ctx.place_colony(p0, TerritoryId::HerbertValley).unwrap();

        assert_eq!(ctx.players.get(p0).unwrap().colonies(), &[TerritoryId::HerbertValley]);
        assert_eq!(ctx.territories.controller(TerritoryId::HerbertValley), Some(p0));
        assert_eq!(ctx.players.get(p0).unwrap().victory_points().total(), 2);
        assert!(ctx.discounted(p0, FacilityId::Shipyard));
    }

    #[test]
    fn test_supply_runs_out() {
        let specs = vec![PlayerSpec::human("A"), PlayerSpec::human("B")];
        let config = MatchConfig {
            colonies_per_player: Some(1),
            ..MatchConfig::with_seed(1)
        };
        let mut ctx = MatchContext::new(config, &specs, &mut GameRng::new(1));
        let p1 = PlayerId::new(1);

        ctx.place_colony(p1, TerritoryId::LemBadlands).unwrap();
        assert_eq!(
            ctx.place_colony(p1, TerritoryId::PohlFoothills),
            Err(RuleViolation::NoColoniesLeft)
        );
    }

    #[test]
    fn test_swap_keeps_player_lists_in_step() {
        let mut ctx = context(2);
        let (a, b) = (PlayerId::new(0), PlayerId::new(1));
        ctx.place_colony(a, TerritoryId::AsimovCrater).unwrap();
        ctx.place_colony(b, TerritoryId::LemBadlands).unwrap();

        ctx.swap_colonies(a, TerritoryId::AsimovCrater, b, TerritoryId::LemBadlands)
            .unwrap();

        assert_eq!(ctx.players.get(a).unwrap().colonies(), &[TerritoryId::LemBadlands]);
        assert_eq!(ctx.players.get(b).unwrap().colonies(), &[TerritoryId::AsimovCrater]);
        assert_eq!(ctx.territories.controller(TerritoryId::LemBadlands), Some(a));
    }
}
