//! Territory registry: the eight shared territories, majority control and
//! field generator overrides.
//!
//! ## Control
//!
//! After every occupancy change the controller is recomputed: the player with
//! strictly more colonies than anyone else controls; a tie at the top leaves
//! the territory uncontrolled.
//!
//! ## Field generators
//!
//! - Isolation: controller loses the bonus, control itself is unchanged
//! - Positron: controller scores one extra point
//! - Repulsor: no colonies may be placed

pub mod registry;
pub mod territory;

pub use registry::TerritoryRegistry;
pub use territory::{FieldGenerator, Territory, TerritoryBonus, TerritoryId};
