//! Player registry: resources, colonies, owned tech cards and victory points.

pub mod player;
pub mod registry;

pub use player::{Player, VictoryPoints};
pub use registry::PlayerRegistry;
