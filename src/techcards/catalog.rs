//! The tech card catalog: 22 physical cards and where each one is.
//!
//! A card is either in one of the shared piles or owned by a player, never
//! both. Ownership moves; cards are never copied or destroyed.

use serde::{Deserialize, Serialize};

use super::definition::{TechCard, TechCardId, TechKind};
use super::piles::CardPiles;
use crate::core::{GameRng, Outcome, PlayerId, RuleViolation};

/// All tech cards of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechCardCatalog {
    cards: im::Vector<TechCard>,
    piles: CardPiles,
    window_size: usize,
}

impl TechCardCatalog {
    /// Build the standard deck, shuffle it and deal the visible window.
    pub fn new(window_size: usize, rng: &mut GameRng) -> Self {
        let mut cards = im::Vector::new();
        let mut next = 0u8;
        for kind in TechKind::ALL {
            for _ in 0..kind.copies() {
                cards.push_back(TechCard::new(TechCardId::new(next), kind));
                next += 1;
            }
        }

        let mut piles = CardPiles::new(cards.iter().map(|c: &TechCard| c.id), rng);
        piles.refill_window(window_size, rng);

        Self {
            cards,
            piles,
            window_size,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: TechCardId) -> Option<&TechCard> {
        self.cards.get(usize::from(id.raw()))
    }

    fn get_mut(&mut self, id: TechCardId) -> Option<&mut TechCard> {
        self.cards.get_mut(usize::from(id.raw()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TechCard> {
        self.cards.iter()
    }

    #[must_use]
    pub fn piles(&self) -> &CardPiles {
        &self.piles
    }

    /// Face-up cards available to claim.
    #[must_use]
    pub fn visible(&self) -> &[TechCardId] {
        self.piles.window()
    }

    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = &TechCard> {
        self.cards.iter().filter(move |c| c.owner == Some(player))
    }

    /// True if `player` holds a card that blocks raids.
    #[must_use]
    pub fn protects_from_raids(&self, player: PlayerId) -> bool {
        self.owned_by(player).any(|c| c.kind.blocks_raids())
    }

    /// Victory points from owned cards.
    #[must_use]
    pub fn victory_points_of(&self, player: PlayerId) -> u32 {
        self.owned_by(player).map(TechCard::victory_points).sum()
    }

    /// Take a visible card into `player`'s hand and refill the window.
    pub fn claim(&mut self, player: PlayerId, card: TechCardId, rng: &mut GameRng) -> Outcome<()> {
        if !self.piles.take_from_window(card) {
            return Err(RuleViolation::CardNotVisible(card));
        }
        self.give(card, player);
        self.piles.refill_window(self.window_size, rng);
        Ok(())
    }

    /// Draw the top card of the deck into `player`'s hand.
    pub fn draw(&mut self, player: PlayerId, rng: &mut GameRng) -> Outcome<TechCardId> {
        let card = self.piles.draw(rng).ok_or(RuleViolation::DeckExhausted)?;
        self.give(card, player);
        Ok(card)
    }

    /// Move an owned card to the discard pile.
    pub fn discard(&mut self, card: TechCardId) {
        if let Some(c) = self.get_mut(card) {
            c.owner = None;
            c.used_this_turn = false;
            self.piles.push_discard(card);
        }
    }

    /// Replace the visible window with fresh cards.
    pub fn cycle_window(&mut self, rng: &mut GameRng) {
        self.piles.cycle_window(self.window_size, rng);
    }

    /// Reassign an owned card, e.g. after a raid.
    pub fn transfer(&mut self, card: TechCardId, to: PlayerId) {
        self.give(card, to);
    }

    pub fn mark_used(&mut self, card: TechCardId) {
        if let Some(c) = self.get_mut(card) {
            c.used_this_turn = true;
        }
    }

    /// Clear used flags on every card `player` owns.
    pub fn reset_used(&mut self, player: PlayerId) {
        for card in self.cards.iter_mut().filter(|c| c.owner == Some(player)) {
            card.used_this_turn = false;
        }
    }

    fn give(&mut self, card: TechCardId, player: PlayerId) {
        if let Some(c) = self.get_mut(card) {
            c.owner = Some(player);
            c.used_this_turn = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_catalog() {
        let mut rng = GameRng::new(5);
        let catalog = TechCardCatalog::new(3, &mut rng);

        assert_eq!(catalog.len(), 22);
        assert_eq!(catalog.visible().len(), 3);
        assert_eq!(catalog.piles().deck().len(), 19);
        assert!(catalog.iter().all(|c| c.owner.is_none()));
    }

    #[test]
    fn test_claim_refills_window() {
        let mut rng = GameRng::new(6);
        let mut catalog = TechCardCatalog::new(3, &mut rng);
        let p1 = PlayerId::new(1);
        let card = catalog.visible()[1];

        catalog.claim(p1, card, &mut rng).unwrap();

        assert_eq!(catalog.get(card).unwrap().owner, Some(p1));
        assert_eq!(catalog.visible().len(), 3);
        assert!(!catalog.visible().contains(&card));
        assert_eq!(catalog.piles().len() + catalog.owned_by(p1).count(), 22);
    }

    #[test]
    fn test_claim_invisible_card_fails() {
        let mut rng = GameRng::new(7);
        let mut catalog = TechCardCatalog::new(3, &mut rng);
        let hidden = catalog.piles().deck()[0];

        assert_eq!(
            catalog.claim(PlayerId::new(0), hidden, &mut rng),
            Err(RuleViolation::CardNotVisible(hidden))
        );
    }

    #[test]
    fn test_discard_returns_card_to_piles() {
        let mut rng = GameRng::new(8);
        let mut catalog = TechCardCatalog::new(3, &mut rng);
        let p0 = PlayerId::new(0);
        let card = catalog.draw(p0, &mut rng).unwrap();
        catalog.mark_used(card);

        catalog.discard(card);

        let c = catalog.get(card).unwrap();
        assert_eq!(c.owner, None);
        assert!(!c.used_this_turn);
        assert_eq!(catalog.piles().discard(), &[card]);
    }

    #[test]
    fn test_deck_exhaustion() {
        let mut rng = GameRng::new(9);
        let mut catalog = TechCardCatalog::new(3, &mut rng);
        let p0 = PlayerId::new(0);
        for _ in 0..19 {
            catalog.draw(p0, &mut rng).unwrap();
        }
        assert_eq!(catalog.draw(p0, &mut rng), Err(RuleViolation::DeckExhausted));
        assert_eq!(catalog.owned_by(p0).count(), 19);
    }

    #[test]
    fn test_reset_used_only_touches_owner() {
        let mut rng = GameRng::new(10);
        let mut catalog = TechCardCatalog::new(3, &mut rng);
        let a = catalog.draw(PlayerId::new(0), &mut rng).unwrap();
        let b = catalog.draw(PlayerId::new(1), &mut rng).unwrap();
        catalog.mark_used(a);
        catalog.mark_used(b);

        catalog.reset_used(PlayerId::new(0));

        assert!(!catalog.get(a).unwrap().used_this_turn);
        assert!(catalog.get(b).unwrap().used_this_turn);
    }
}
