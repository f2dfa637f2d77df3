//! Tech card operations: drawing, claiming, cycling and playing cards.

use super::{MatchEngine, TurnPhase};
use crate::core::{EngineError, Outcome, PlayerId, RuleViolation};
use crate::facilities::ArtifactRight;
use crate::techcards::powers;
use crate::techcards::{Ability, CardArgs, TechCardId};
use crate::territories::TerritoryId;

impl MatchEngine {
    /// Draw the top card of the deck for `player`. Not phase-gated.
    ///
    /// An unknown player fails before the deck is touched.
    pub fn draw_tech_card(&mut self, player: PlayerId) -> Result<Outcome<TechCardId>, EngineError> {
        self.require_player(player)?;
        let card = match self.ctx.cards.draw(player, &mut self.rng) {
            Ok(card) => card,
            Err(violation) => return Ok(Err(violation)),
        };
        self.ctx.take_card(player, card);
        log::debug!("{player} drew {card}");
        Ok(Ok(card))
    }

    /// Take a visible card with this turn's Alien Artifact claim right.
    ///
    /// Returns every card gained, including the Pohl Foothills extra draw.
    pub fn claim_tech_card(
        &mut self,
        player: PlayerId,
        card: TechCardId,
    ) -> Result<Outcome<Vec<TechCardId>>, EngineError> {
        self.require_phase(TurnPhase::ARTIFACT_PHASES)?;
        self.require_player(player)?;
        self.require_card(card)?;
        if player != self.active_player() {
            return Ok(Err(RuleViolation::NotActivePlayer));
        }
        if self.ctx.turn.artifact != Some(ArtifactRight::Claim) {
            return Ok(Err(RuleViolation::NoArtifactRight));
        }

        if let Err(violation) = self.ctx.cards.claim(player, card, &mut self.rng) {
            return Ok(Err(violation));
        }
        self.ctx.take_card(player, card);
        self.ctx.turn.artifact = None;
        let mut gained = vec![card];

        if self.ctx.bonus_active(player, TerritoryId::PohlFoothills) {
            if let Ok(extra) = self.ctx.cards.draw(player, &mut self.rng) {
                self.ctx.take_card(player, extra);
                gained.push(extra);
            }
        }

        log::info!("{player} claimed {gained:?}");
        Ok(Ok(gained))
    }

    /// Replace the visible window, spending this turn's artifact right.
    pub fn cycle_tech_window(&mut self, player: PlayerId) -> Result<Outcome<()>, EngineError> {
        self.require_phase(TurnPhase::ARTIFACT_PHASES)?;
        self.require_player(player)?;
        if player != self.active_player() {
            return Ok(Err(RuleViolation::NotActivePlayer));
        }
        if self.ctx.turn.artifact.is_none() {
            return Ok(Err(RuleViolation::NoArtifactRight));
        }

        self.ctx.cards.cycle_window(&mut self.rng);
        self.ctx.turn.artifact = None;
        log::debug!("{player} cycled the tech window");
        Ok(Ok(()))
    }

    /// Use a card's power. Costs fuel; the card is then used for this turn.
    pub fn use_tech_card(
        &mut self,
        player: PlayerId,
        card: TechCardId,
        args: &CardArgs,
    ) -> Result<Outcome<()>, EngineError> {
        self.invoke_card(player, card, Ability::Power, args)
    }

    /// Use a card's discard power. Free; the card goes to the discard pile.
    pub fn discard_tech_card(
        &mut self,
        player: PlayerId,
        card: TechCardId,
        args: &CardArgs,
    ) -> Result<Outcome<()>, EngineError> {
        self.invoke_card(player, card, Ability::Discard, args)
    }

    fn invoke_card(
        &mut self,
        player: PlayerId,
        card: TechCardId,
        ability: Ability,
        args: &CardArgs,
    ) -> Result<Outcome<()>, EngineError> {
        self.require_phase(TurnPhase::CARD_PHASES)?;
        self.require_player(player)?;
        let (kind, owner, used) = {
            let c = self.require_card(card)?;
            (c.kind, c.owner, c.used_this_turn)
        };

        if player != self.active_player() {
            return Ok(Err(RuleViolation::NotActivePlayer));
        }
        if owner != Some(player) {
            return Ok(Err(RuleViolation::CardNotOwned(card)));
        }
        if used {
            return Ok(Err(RuleViolation::CardAlreadyUsed(card)));
        }
        let Some(cost) = kind.ability_cost(ability) else {
            return Ok(Err(RuleViolation::NoSuchAbility(card)));
        };

        let mut scratch = self.ctx.clone();
        let mut rng = self.rng.clone();
        let applied = scratch
            .players
            .spend(player, cost)
            .and_then(|()| powers::apply(&mut scratch, &mut rng, player, kind, ability, args));
        if let Err(violation) = applied {
            log::debug!("{player} could not use {kind}: {violation}");
            return Ok(Err(violation));
        }

        match ability {
            Ability::Power => scratch.cards.mark_used(card),
            Ability::Discard => {
                scratch.cards.discard(card);
                scratch.release_card(player, card);
            }
        }

        self.ctx = scratch;
        self.rng = rng;
        log::debug!("{player} used {kind} ({ability:?})");
        Ok(Ok(()))
    }

    fn require_card(&self, card: TechCardId) -> Result<&crate::techcards::TechCard, EngineError> {
        self.ctx.cards.get(card).ok_or(EngineError::UnknownCard(card))
    }
}
