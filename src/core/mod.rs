//! Core types shared by every registry: player ids, resources, RNG,
//! configuration and errors.
//!
//! Nothing here knows about facilities or cards beyond their ids.

pub mod config;
pub mod error;
pub mod player;
pub mod resources;
pub mod rng;

pub use config::{MatchConfig, PlayerColor, PlayerSpec, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{EngineError, Outcome, RuleViolation};
pub use player::{PlayerId, PlayerMap};
pub use resources::{ResourceKind, Resources};
pub use rng::{GameRng, GameRngState, DIE_MAX, DIE_MIN};
