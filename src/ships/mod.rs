//! Ship registry: die-valued ships, their placement and lock state.
//!
//! ## Key Types
//!
//! - `ShipId`: owner + build index, stable for the match
//! - `Ship`: die value, location, locked flag
//! - `ShipRegistry`: all ships, with roll/dock/recall bookkeeping

pub mod registry;
pub mod ship;

pub use registry::{DockedShips, ShipRegistry};
pub use ship::{DockSlot, Ship, ShipId, ShipLocation};
