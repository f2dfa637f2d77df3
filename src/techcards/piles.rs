//! Card piles: deck, discard and the visible window.
//!
//! Every card not in a player's hand is in exactly one pile. The deck is
//! ordered with its top at the end of the vec. Drawing from an empty deck
//! first shuffles the discard pile back in; if both are empty the draw
//! comes back empty and the window stays short.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::TechCardId;
use crate::core::GameRng;

/// Which pile a card sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    Deck,
    Discard,
    Window,
}

/// The shared card piles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPiles {
    deck: Vec<TechCardId>,
    discard: Vec<TechCardId>,
    window: SmallVec<[TechCardId; 3]>,
}

impl CardPiles {
    /// Shuffle `cards` into a fresh deck.
    pub fn new(cards: impl IntoIterator<Item = TechCardId>, rng: &mut GameRng) -> Self {
        let mut deck: Vec<TechCardId> = cards.into_iter().collect();
        rng.shuffle(&mut deck);
        Self {
            deck,
            discard: Vec::new(),
            window: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn deck(&self) -> &[TechCardId] {
        &self.deck
    }

    #[must_use]
    pub fn discard(&self) -> &[TechCardId] {
        &self.discard
    }

    #[must_use]
    pub fn window(&self) -> &[TechCardId] {
        &self.window
    }

    /// The pile holding `card`, if any.
    #[must_use]
    pub fn locate(&self, card: TechCardId) -> Option<Pile> {
        if self.window.contains(&card) {
            Some(Pile::Window)
        } else if self.deck.contains(&card) {
            Some(Pile::Deck)
        } else if self.discard.contains(&card) {
            Some(Pile::Discard)
        } else {
            None
        }
    }

    /// Take the top card, reshuffling the discard pile in when the deck is empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<TechCardId> {
        if self.deck.is_empty() && !self.discard.is_empty() {
            self.deck.append(&mut self.discard);
            rng.shuffle(&mut self.deck);
            log::debug!("reshuffled {} cards into the deck", self.deck.len());
        }
        self.deck.pop()
    }

    /// Top the window up to `size` cards.
    pub fn refill_window(&mut self, size: usize, rng: &mut GameRng) {
        while self.window.len() < size {
            match self.draw(rng) {
                Some(card) => self.window.push(card),
                None => break,
            }
        }
    }

    /// Remove `card` from the window. Returns false if it was not there.
    pub fn take_from_window(&mut self, card: TechCardId) -> bool {
        match self.window.iter().position(|&c| c == card) {
            Some(pos) => {
                self.window.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Put a card on the discard pile.
    pub fn push_discard(&mut self, card: TechCardId) {
        self.discard.push(card);
    }

    /// Discard the whole window and deal a new one.
    ///
    /// The old window goes to the discard pile first, so it can come back
    /// when the deck is short.
    pub fn cycle_window(&mut self, size: usize, rng: &mut GameRng) {
        self.discard.extend(self.window.drain(..));
        self.refill_window(size, rng);
    }

    /// Cards across all three piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deck.len() + self.discard.len() + self.window.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
