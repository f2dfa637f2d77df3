//! Facility system: dock groups, docking legality and execution.
//!
//! ## Key Types
//!
//! - `FacilityId`: the eleven fixed facilities
//! - `DockGroupSpec`: slots plus count and value requirements
//! - `FacilityRule`: the capability set every facility implements
//!   (describe groups, check docking, execute)
//! - `FacilityRegistry`: rule lookup by id and Colonist Hub tracks
//!
//! Rules are stateless strategy objects. Execution reads an
//! `ExecutionContext` and returns an `EffectBatch`; it never mutates the
//! match. Expected rule failures come back as `RuleViolation`.

pub mod colonization;
pub mod commerce;
pub mod docking;
pub mod production;
pub mod registry;
pub mod special;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Outcome, PlayerId, RuleViolation};
use crate::effects::EffectBatch;
use crate::players::Player;
use crate::ships::ShipId;
use crate::territories::{TerritoryId, TerritoryRegistry};

pub use colonization::{ColonistHub, ColonyConstructor, TerraformingStation, HUB_TRACK_LENGTH};
pub use commerce::{MarketTrade, OrbitalMarket, Shipyard};
pub use docking::{CountRule, DockGroupSpec, ValueRule};
pub use production::{LunarMine, RadonCollector, SolarConverter};
pub use registry::FacilityRegistry;
pub use special::{can_claim_tech_card, AlienArtifact, ArtifactRight, MaintenanceBay, RaidersOutpost};

/// The fixed facilities on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FacilityId {
    SolarConverter,
    LunarMine,
    RadonCollector,
    ColonyConstructor,
    TerraformingStation,
    ColonistHub,
    OrbitalMarket,
    RaidersOutpost,
    AlienArtifact,
    MaintenanceBay,
    Shipyard,
}

impl FacilityId {
    /// All facilities, in resolution order.
    pub const ALL: [FacilityId; 11] = [
        FacilityId::SolarConverter,
        FacilityId::LunarMine,
        FacilityId::RadonCollector,
        FacilityId::ColonyConstructor,
        FacilityId::TerraformingStation,
        FacilityId::ColonistHub,
        FacilityId::OrbitalMarket,
        FacilityId::RaidersOutpost,
        FacilityId::AlienArtifact,
        FacilityId::MaintenanceBay,
        FacilityId::Shipyard,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            FacilityId::SolarConverter => "Solar Converter",
            FacilityId::LunarMine => "Lunar Mine",
            FacilityId::RadonCollector => "Radon Collector",
            FacilityId::ColonyConstructor => "Colony Constructor",
            FacilityId::TerraformingStation => "Terraforming Station",
            FacilityId::ColonistHub => "Colonist Hub",
            FacilityId::OrbitalMarket => "Orbital Market",
            FacilityId::RaidersOutpost => "Raiders' Outpost",
            FacilityId::AlienArtifact => "Alien Artifact",
            FacilityId::MaintenanceBay => "Maintenance Bay",
            FacilityId::Shipyard => "Shipyard",
        }
    }

    /// Territory whose controller gets this facility at a discount.
    #[must_use]
    pub const fn discounted_by(self) -> Option<TerritoryId> {
        match self {
            FacilityId::ColonyConstructor => Some(TerritoryId::AsimovCrater),
            FacilityId::Shipyard => Some(TerritoryId::HerbertValley),
            FacilityId::OrbitalMarket => Some(TerritoryId::BradburyPlateau),
            _ => None,
        }
    }
}

impl std::fmt::Display for FacilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A docking request against one group.
#[derive(Clone, Copy, Debug)]
pub struct DockRequest<'a> {
    pub player: PlayerId,
    pub group: usize,
    /// Values of every ship already in the group, any owner.
    pub docked: &'a [u8],
    /// Values of the arriving ships.
    pub incoming: &'a [u8],
}

/// The active player's ships in one dock group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DockedGroup {
    pub group: usize,
    pub ships: SmallVec<[(ShipId, u8); 6]>,
}

impl DockedGroup {
    /// Die values, in slot order.
    #[must_use]
    pub fn values(&self) -> SmallVec<[u8; 6]> {
        self.ships.iter().map(|&(_, v)| v).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }
}

/// Everything a facility may read while executing.
#[derive(Clone, Copy, Debug)]
pub struct ExecutionContext<'a> {
    pub player: &'a Player,
    /// Groups holding the active player's ships, in group order.
    pub groups: &'a [DockedGroup],
    pub fleet_size: usize,
    pub max_ships: usize,
    pub hub_track: u8,
    /// The player controls this facility's discount territory.
    pub discounted: bool,
    /// Territories chosen for colonies, consumed in group order.
    pub selections: &'a [TerritoryId],
    pub market: MarketTrade,
    pub territories: &'a TerritoryRegistry,
    /// Colonies the player has yet to place.
    pub colonies_left: usize,
}

impl ExecutionContext<'_> {
    /// The `n`th territory selection, or a failure naming `facility`.
    pub fn selection(&self, n: usize, facility: FacilityId) -> Outcome<TerritoryId> {
        self.selections
            .get(n)
            .copied()
            .ok_or(RuleViolation::TerritoryRequired(facility))
    }

    /// Fail unless the player can pay `cost`.
    pub fn require(&self, cost: crate::core::Resources) -> Outcome<()> {
        if self.player.resources.covers(&cost) {
            Ok(())
        } else {
            Err(RuleViolation::InsufficientResources {
                needed: cost,
                available: self.player.resources,
            })
        }
    }

    /// Fail unless a colony could be founded on `territory` right now.
    pub fn can_colonize(&self, territory: TerritoryId) -> Outcome<()> {
        if self.colonies_left == 0 {
            return Err(RuleViolation::NoColoniesLeft);
        }
        self.territories.can_place(territory)
    }

    /// Total ships the player has docked here.
    #[must_use]
    pub fn ship_count(&self) -> usize {
        self.groups.iter().map(DockedGroup::len).sum()
    }
}

/// The capability set shared by all facilities.
pub trait FacilityRule: std::fmt::Debug + Sync {
    /// Which facility this rule implements.
    fn id(&self) -> FacilityId;

    /// Dock groups, indexed by group id.
    fn dock_groups(&self) -> &'static [DockGroupSpec];

    /// Check whether the request may dock.
    ///
    /// Default: the group's own capacity/count/value checks.
    fn can_dock(&self, request: &DockRequest<'_>) -> Outcome<()> {
        let spec = self
            .dock_groups()
            .get(request.group)
            .ok_or(RuleViolation::NoGroupAccepts(self.id()))?;
        spec.check(request.docked, request.incoming)
    }

    /// Decide the effects of the active player's docked ships.
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch>;
}
