//! Consistency checks over a whole match.
//!
//! `validate` is a diagnostic query. The engine never calls it on its own;
//! tests and collaborators run it after restoring or mutating a match.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::MatchEngine;
use crate::core::{PlayerId, MAX_PLAYERS, MIN_PLAYERS};
use crate::facilities::{FacilityId, FacilityRegistry};
use crate::techcards::TechCardId;
use crate::territories::TerritoryId;

/// One broken invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("{0} players is outside the supported range")]
    PlayerCount(usize),

    #[error("{player} has {count} ships")]
    ShipCount { player: PlayerId, count: usize },

    #[error("{0} has a victory point total that is not the sum of its parts")]
    VictoryPointSum(PlayerId),

    #[error("{0} has victory points that do not match the board")]
    VictoryPointsStale(PlayerId),

    #[error("{0} holds more colonies than its capacity")]
    TerritoryOverCapacity(TerritoryId),

    #[error("{0} has a controller without a strict majority")]
    ControllerMismatch(TerritoryId),

    #[error("{player}'s colony list disagrees with {territory}")]
    ColonyMismatch { player: PlayerId, territory: TerritoryId },

    #[error("{player} placed more colonies than the supply allows")]
    ColonySupplyExceeded { player: PlayerId },

    #[error("{0} is both owned and in a pile, or in neither")]
    CardLocation(TechCardId),

    #[error("{facility} group {group} holds more ships than slots")]
    DockOverCapacity { facility: FacilityId, group: usize },
}

impl MatchEngine {
    /// Every invariant the match currently violates. Empty means healthy.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let ctx = &self.ctx;
        let mut issues = Vec::new();

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&ctx.player_count()) {
            issues.push(ValidationIssue::PlayerCount(ctx.player_count()));
        }

        let min_ships = usize::from(ctx.config.starting_ships);
        let max_ships = usize::from(ctx.config.max_ships);
        for player in ctx.players.iter() {
            // Retired ships leave the fleet but keep their registry entry.
            let built = ctx.ships.owned_by(player.id).count();
            if !(min_ships..=max_ships).contains(&built) {
                issues.push(ValidationIssue::ShipCount {
                    player: player.id,
                    count: ctx.ships.count_for(player.id),
                });
            }

            let vp = player.victory_points();
            if !vp.is_consistent() {
                issues.push(ValidationIssue::VictoryPointSum(player.id));
            }
            let (territories, bonuses) = ctx.territories.score_for(player.id);
            let expected = (
                player.colonies().len() as u32,
                ctx.cards.victory_points_of(player.id),
                territories,
                bonuses,
            );
            if (vp.colonies(), vp.alien_tech(), vp.territories(), vp.bonuses()) != expected {
                issues.push(ValidationIssue::VictoryPointsStale(player.id));
            }

            if player.colonies().len() > ctx.colony_supply() {
                issues.push(ValidationIssue::ColonySupplyExceeded { player: player.id });
            }
        }

        for territory in ctx.territories.iter() {
            if territory.occupants().len() > territory.capacity {
                issues.push(ValidationIssue::TerritoryOverCapacity(territory.id));
            }

            let mut tally: FxHashMap<PlayerId, usize> = FxHashMap::default();
            for &p in territory.occupants() {
                *tally.entry(p).or_default() += 1;
            }
            let top = tally.values().copied().max().unwrap_or(0);
            let leaders: Vec<PlayerId> = tally
                .iter()
                .filter(|&(_, &n)| n == top)
                .map(|(&p, _)| p)
                .collect();
            let expected = if leaders.len() == 1 { Some(leaders[0]) } else { None };
            if territory.controller() != expected {
                issues.push(ValidationIssue::ControllerMismatch(territory.id));
            }

            for player in ctx.players.iter() {
                if player.colonies_on(territory.id) != territory.colonies_of(player.id) {
                    issues.push(ValidationIssue::ColonyMismatch {
                        player: player.id,
                        territory: territory.id,
                    });
                }
            }
        }

        for card in ctx.cards.iter() {
            let in_pile = ctx.cards.piles().locate(card.id).is_some();
            let held = card
                .owner
                .and_then(|o| ctx.players.get(o))
                .is_some_and(|p| p.owns_card(card.id));
            if in_pile == held || (card.owner.is_some() != held) {
                issues.push(ValidationIssue::CardLocation(card.id));
            }
        }

        for facility in FacilityId::ALL {
            for (group, spec) in FacilityRegistry::rule(facility).dock_groups().iter().enumerate() {
                if ctx.ships.docked_in(facility, group).len() > spec.slots {
                    issues.push(ValidationIssue::DockOverCapacity { facility, group });
                }
            }
        }

        issues
    }
}
