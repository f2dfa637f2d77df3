//! Ship entities.
//!
//! A ship is a die: it carries a value for the current turn and a location.
//! The location is the only record of dock membership; facilities derive
//! their slot contents from it. A retired ship stays in the registry so the
//! Shipyard can bring it back, but it is not part of its owner's fleet.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::facilities::FacilityId;

/// Stable ship identifier: owner plus build index.
///
/// Index 0-2 are the starting fleet, 3-5 are built at the Shipyard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipId {
    pub owner: PlayerId,
    pub index: u8,
}

impl ShipId {
    /// Create a ship ID.
    #[must_use]
    pub const fn new(owner: PlayerId, index: u8) -> Self {
        Self { owner, index }
    }
}

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}-S{}", self.owner.0, self.index)
    }
}

/// A single slot in a facility dock group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DockSlot {
    pub facility: FacilityId,
    pub group: usize,
    pub slot: usize,
}

/// Where a ship currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipLocation {
    /// With its owner, available to roll and dock.
    #[default]
    Pool,
    /// Occupying a facility slot.
    Docked(DockSlot),
    /// Back in the general supply; not rolled, docked or counted.
    Retired,
}

/// A ship.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    /// Die value for this turn; `None` until rolled.
    pub die: Option<u8>,
    pub location: ShipLocation,
    /// Committed ships stay docked until their owner's next roll.
    pub locked: bool,
}

impl Ship {
    /// A fresh, unrolled ship in the pool.
    #[must_use]
    pub fn new(id: ShipId) -> Self {
        Self {
            id,
            die: None,
            location: ShipLocation::Pool,
            locked: false,
        }
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.id.owner
    }

    #[must_use]
    pub fn is_docked(&self) -> bool {
        matches!(self.location, ShipLocation::Docked(_))
    }

    /// The dock slot, if docked.
    #[must_use]
    pub fn dock(&self) -> Option<DockSlot> {
        match self.location {
            ShipLocation::Docked(slot) => Some(slot),
            ShipLocation::Pool | ShipLocation::Retired => None,
        }
    }

    /// True if docked anywhere in `facility`.
    #[must_use]
    pub fn is_at(&self, facility: FacilityId) -> bool {
        self.dock().is_some_and(|d| d.facility == facility)
    }

    #[must_use]
    pub fn is_retired(&self) -> bool {
        self.location == ShipLocation::Retired
    }

    /// Rolled and sitting in the pool, i.e. free to dock or modify.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.die.is_some() && self.location == ShipLocation::Pool
    }
}
