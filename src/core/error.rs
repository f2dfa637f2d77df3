//! Error types.
//!
//! Two classes of failure:
//!
//! - [`EngineError`]: precondition violations by the caller (unknown ids,
//!   operations issued in a phase where they are meaningless). Nothing is
//!   mutated when one is returned.
//! - [`RuleViolation`]: the request was well formed but the game rules say
//!   no (insufficient resources, mismatched dice, full territory, card
//!   already used). Returned inside an [`Outcome`] and never partially
//!   applied.
//!
//! Operations that can fail either way return
//! `Result<Outcome<T>, EngineError>`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;
use super::resources::Resources;
use crate::engine::TurnPhase;
use crate::facilities::FacilityId;
use crate::ships::ShipId;
use crate::techcards::TechCardId;
use crate::territories::{FieldGenerator, TerritoryId};

/// Result of a rules-checked operation.
pub type Outcome<T> = std::result::Result<T, RuleViolation>;

/// Hard failures: the caller asked for something structurally meaningless.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("operation requires phase {expected:?}, match is in {actual:?}")]
    InvalidPhase {
        expected: &'static [TurnPhase],
        actual: TurnPhase,
    },

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("unknown ship {0}")]
    UnknownShip(ShipId),

    #[error("ship {ship} is not owned by the active player {player}")]
    ShipNotOwned { ship: ShipId, player: PlayerId },

    #[error("unknown tech card {0}")]
    UnknownCard(TechCardId),

    #[error("{facility} has no dock group {group}")]
    UnknownDockGroup { facility: FacilityId, group: usize },

    #[error("player count {0} is outside the supported 2-4")]
    InvalidPlayerCount(usize),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Business-rule failures. Returned as data; the match state is untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RuleViolation {
    #[error("needs {needed}, has {available}")]
    InsufficientResources {
        needed: Resources,
        available: Resources,
    },

    #[error("dock group is full ({capacity} slots)")]
    DockGroupFull { capacity: usize },

    #[error("dock group needs {expected} ships at once, got {actual}")]
    WrongShipCount { expected: String, actual: usize },

    #[error("die values {values:?} do not satisfy {rule}")]
    InvalidCombination { values: Vec<u8>, rule: String },

    #[error("no dock group at {0} accepts these ships")]
    NoGroupAccepts(FacilityId),

    #[error("ship {0} has not been rolled")]
    ShipNotRolled(ShipId),

    #[error("ship {0} is already docked")]
    ShipAlreadyDocked(ShipId),

    #[error("ship {0} is not docked")]
    ShipNotDocked(ShipId),

    #[error("no ships supplied")]
    NoShips,

    #[error("no unlocked ships of the active player in that group")]
    NothingToUndock,

    #[error("{0} is full")]
    TerritoryFull(TerritoryId),

    #[error("{0} is protected by a repulsor field")]
    TerritoryRepulsed(TerritoryId),

    #[error("player has no colony on {0}")]
    NoColonyThere(TerritoryId),

    #[error("colony source and destination are the same territory")]
    SameTerritory,

    #[error("player has no colonies left to place")]
    NoColoniesLeft,

    #[error("a territory must be selected for {0}")]
    TerritoryRequired(FacilityId),

    #[error("fleet is already at its maximum of {0} ships")]
    FleetFull(usize),

    #[error("card {0} is not owned by this player")]
    CardNotOwned(TechCardId),

    #[error("card {0} was already used this turn")]
    CardAlreadyUsed(TechCardId),

    #[error("card {0} has no such ability")]
    NoSuchAbility(TechCardId),

    #[error("card {0} is not in the visible window")]
    CardNotVisible(TechCardId),

    #[error("value {0} is outside 1-6")]
    ValueOutOfRange(u8),

    #[error("ability target is missing or invalid: {0}")]
    InvalidTarget(String),

    #[error("{0} is not placed on any territory")]
    GeneratorNotPlaced(FieldGenerator),

    #[error("player {0} is protected from raids")]
    RaidBlocked(PlayerId),

    #[error("raid takes {0} resources, the limit is 4")]
    RaidTooLarge(u32),

    #[error("no raid right this turn")]
    NoRaidRight,

    #[error("no alien artifact right this turn")]
    NoArtifactRight,

    #[error("the deck and discard pile are empty")]
    DeckExhausted,

    #[error("only the active player may do that")]
    NotActivePlayer,

    #[error("the re-roll right is not available")]
    RerollUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        let v = RuleViolation::InsufficientResources {
            needed: Resources::ore(3),
            available: Resources::ore(1),
        };
        assert_eq!(
            v.to_string(),
            "needs 3 ore, 0 fuel, 0 energy, has 1 ore, 0 fuel, 0 energy"
        );
    }

    #[test]
    fn test_violation_serde() {
        let v = RuleViolation::TerritoryFull(TerritoryId::AsimovCrater);
        let json = serde_json::to_string(&v).unwrap();
        let back: RuleViolation = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
