//! Player entities and victory-point breakdown.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerColor, PlayerId, Resources};
use crate::techcards::TechCardId;
use crate::territories::TerritoryId;

/// Victory-point breakdown.
///
/// `total` is always the sum of the four categories; the only way to build
/// one is through [`VictoryPoints::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VictoryPoints {
    colonies: u32,
    alien_tech: u32,
    territories: u32,
    bonuses: u32,
    total: u32,
}

impl VictoryPoints {
    #[must_use]
    pub const fn new(colonies: u32, alien_tech: u32, territories: u32, bonuses: u32) -> Self {
        Self {
            colonies,
            alien_tech,
            territories,
            bonuses,
            total: colonies + alien_tech + territories + bonuses,
        }
    }

    #[must_use]
    pub const fn colonies(&self) -> u32 {
        self.colonies
    }

    #[must_use]
    pub const fn alien_tech(&self) -> u32 {
        self.alien_tech
    }

    #[must_use]
    pub const fn territories(&self) -> u32 {
        self.territories
    }

    #[must_use]
    pub const fn bonuses(&self) -> u32 {
        self.bonuses
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Recheck the sum; only fails on a corrupted snapshot.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.total == self.colonies + self.alien_tech + self.territories + self.bonuses
    }
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub resources: Resources,
    pub(crate) victory_points: VictoryPoints,
    /// Territories holding this player's colonies, in placement order.
    pub(crate) colonies: Vec<TerritoryId>,
    pub(crate) tech_cards: Vec<TechCardId>,
    pub turn_order: usize,
    pub is_ai: bool,
}

impl Player {
    /// Create a player with no colonies or cards.
    pub fn new(id: PlayerId, name: impl Into<String>, color: PlayerColor, is_ai: bool) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            resources: Resources::default(),
            victory_points: VictoryPoints::default(),
            colonies: Vec::new(),
            tech_cards: Vec::new(),
            turn_order: id.index(),
            is_ai,
        }
    }

    #[must_use]
    pub fn victory_points(&self) -> VictoryPoints {
        self.victory_points
    }

    /// Territories with this player's colonies, one entry per colony.
    #[must_use]
    pub fn colonies(&self) -> &[TerritoryId] {
        &self.colonies
    }

    /// Owned tech cards, in acquisition order.
    #[must_use]
    pub fn tech_cards(&self) -> &[TechCardId] {
        &self.tech_cards
    }

    #[must_use]
    pub fn owns_card(&self, card: TechCardId) -> bool {
        self.tech_cards.contains(&card)
    }

    /// Colonies on one territory.
    #[must_use]
    pub fn colonies_on(&self, territory: TerritoryId) -> usize {
        self.colonies.iter().filter(|&&t| t == territory).count()
    }

    pub(crate) fn add_colony(&mut self, territory: TerritoryId) {
        self.colonies.push(territory);
    }

    /// Re-point one colony record from `from` to `to`, keeping its position.
    pub(crate) fn relocate_colony(&mut self, from: TerritoryId, to: TerritoryId) -> bool {
        match self.colonies.iter_mut().find(|t| **t == from) {
            Some(slot) => {
                *slot = to;
                true
            }
            None => false,
        }
    }

    pub(crate) fn add_card(&mut self, card: TechCardId) {
        if !self.tech_cards.contains(&card) {
            self.tech_cards.push(card);
        }
    }

    pub(crate) fn remove_card(&mut self, card: TechCardId) -> bool {
        let before = self.tech_cards.len();
        self.tech_cards.retain(|&c| c != card);
        self.tech_cards.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_victory_points_total() {
        let vp = VictoryPoints::new(5, 2, 3, 1);
        assert_eq!(vp.total(), 11);
        assert!(vp.is_consistent());
    }

    #[test]
    fn test_colony_bookkeeping() {
        let mut player = Player::new(PlayerId::new(0), "Ada", PlayerColor::Red, false);
        player.add_colony(TerritoryId::AsimovCrater);
        player.add_colony(TerritoryId::LemBadlands);
        player.add_colony(TerritoryId::AsimovCrater);

        assert_eq!(player.colonies_on(TerritoryId::AsimovCrater), 2);
        assert!(player.relocate_colony(TerritoryId::LemBadlands, TerritoryId::HerbertValley));
        assert_eq!(
            player.colonies(),
            &[
                TerritoryId::AsimovCrater,
                TerritoryId::HerbertValley,
                TerritoryId::AsimovCrater
            ]
        );
        assert!(!player.relocate_colony(TerritoryId::BurroughsDesert, TerritoryId::LemBadlands));
        assert_eq!(player.colonies().len(), 3);
    }

    #[test]
    fn test_card_list_has_no_duplicates() {
        let mut player = Player::new(PlayerId::new(1), "Bo", PlayerColor::Blue, true);
        player.add_card(TechCardId::new(4));
        player.add_card(TechCardId::new(4));
        assert_eq!(player.tech_cards().len(), 1);
        assert!(player.remove_card(TechCardId::new(4)));
        assert!(!player.owns_card(TechCardId::new(4)));
    }
}
