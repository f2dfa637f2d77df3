//! # frontier-rules
//!
//! Deterministic rules engine for a dice-placement colonization board game.
//!
//! Players roll ships, dock them at orbital facilities, turn the results
//! into resources and colonies, and fight for majority control of eight
//! territories. Alien tech cards bend the rules along the way.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: one seeded `GameRng` drives every roll and shuffle,
//!    so a seed plus a list of operations replays a match exactly.
//!
//! 2. **N-Player First**: two to four players, no special case for two.
//!
//! 3. **Two kinds of failure**: structural misuse (wrong phase, unknown
//!    ids) is an `EngineError`; an illegal move by the rules is a
//!    `RuleViolation` the caller can show to the player.
//!
//! ## Architecture
//!
//! - **Registries**: ships, players, territories, facilities and tech cards
//!   each own their data; `MatchContext` holds them together.
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, used both for
//!   AI lookahead and to apply every effect all-or-nothing.
//!
//! - **Rules as data producers**: facilities and cards describe what should
//!   happen as an `EffectBatch`; only the `EffectResolver` writes.
//!
//! ## Modules
//!
//! - `core`: player ids, resources, RNG, configuration, errors
//! - `ships`: die-valued ships and where they are docked
//! - `players`: resources, colonies, cards and victory points per player
//! - `territories`: colonies, majority control and field generators
//! - `facilities`: dock groups, docking checks and execution
//! - `techcards`: alien tech cards, their piles and abilities
//! - `effects`: effect batches and the atomic resolver
//! - `engine`: the turn state machine and every public operation

pub mod core;
pub mod effects;
pub mod engine;
pub mod facilities;
pub mod players;
pub mod ships;
pub mod techcards;
pub mod territories;

// Re-export commonly used types
pub use crate::core::{
    EngineError, GameRng, GameRngState, MatchConfig, Outcome, PlayerColor, PlayerId, PlayerMap,
    PlayerSpec, ResourceKind, Resources, RuleViolation,
};

pub use crate::ships::{Ship, ShipId, ShipLocation, ShipRegistry};

pub use crate::players::{Player, PlayerRegistry, VictoryPoints};

pub use crate::territories::{FieldGenerator, Territory, TerritoryBonus, TerritoryId, TerritoryRegistry};

pub use crate::facilities::{
    ArtifactRight, DockGroupSpec, FacilityId, FacilityRegistry, FacilityRule, MarketTrade,
};

pub use crate::techcards::{Ability, CardArgs, TechCard, TechCardCatalog, TechCardId, TechKind};

pub use crate::effects::{Effect, EffectBatch, EffectResolver, Resolution};

pub use crate::engine::{
    GamePhase, MatchBuilder, MatchContext, MatchEngine, MatchResult, MatchSnapshot, RaidChoice,
    ResolutionReport, ResolveOptions, TurnPhase, ValidationIssue,
};
