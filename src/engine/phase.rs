//! Turn phases and the match clock.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// The six stages of a player's turn, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    RollDice,
    PlaceShips,
    ResolveActions,
    CollectResources,
    Purchase,
    EndTurn,
}

impl TurnPhase {
    pub const ALL: [TurnPhase; 6] = [
        TurnPhase::RollDice,
        TurnPhase::PlaceShips,
        TurnPhase::ResolveActions,
        TurnPhase::CollectResources,
        TurnPhase::Purchase,
        TurnPhase::EndTurn,
    ];

    /// Phases in which the active player may play tech cards.
    pub const CARD_PHASES: &'static [TurnPhase] = &[
        TurnPhase::PlaceShips,
        TurnPhase::ResolveActions,
        TurnPhase::CollectResources,
        TurnPhase::Purchase,
    ];

    /// Phases after the facilities have run, when artifact rights apply.
    pub const ARTIFACT_PHASES: &'static [TurnPhase] =
        &[TurnPhase::CollectResources, TurnPhase::Purchase];

    /// The following phase; `EndTurn` wraps to `RollDice`.
    #[must_use]
    pub const fn next(self) -> TurnPhase {
        match self {
            TurnPhase::RollDice => TurnPhase::PlaceShips,
            TurnPhase::PlaceShips => TurnPhase::ResolveActions,
            TurnPhase::ResolveActions => TurnPhase::CollectResources,
            TurnPhase::CollectResources => TurnPhase::Purchase,
            TurnPhase::Purchase => TurnPhase::EndTurn,
            TurnPhase::EndTurn => TurnPhase::RollDice,
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TurnPhase::RollDice => "roll dice",
            TurnPhase::PlaceShips => "place ships",
            TurnPhase::ResolveActions => "resolve actions",
            TurnPhase::CollectResources => "collect resources",
            TurnPhase::Purchase => "purchase",
            TurnPhase::EndTurn => "end turn",
        };
        f.write_str(name)
    }
}

/// Where the match is: phase, whose turn, which round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GamePhase {
    pub phase: TurnPhase,
    pub active: PlayerId,
    /// Starts at 1; increments when turn order wraps.
    pub round: u32,
}

impl Default for GamePhase {
    fn default() -> Self {
        Self {
            phase: TurnPhase::RollDice,
            active: PlayerId::new(0),
            round: 1,
        }
    }
}

impl GamePhase {
    /// Step forward one phase, handing the turn on after `EndTurn`.
    pub fn advance(&mut self, player_count: usize) {
        if self.phase == TurnPhase::EndTurn {
            let next = self.active.next(player_count);
            if next.index() == 0 {
                self.round += 1;
            }
            self.active = next;
        }
        self.phase = self.phase.next();
    }

    #[must_use]
    pub fn is_in(&self, phases: &[TurnPhase]) -> bool {
        phases.contains(&self.phase)
    }
}
