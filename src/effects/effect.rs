//! Effect definitions.
//!
//! Effects are the atomic changes a facility or tech card asks for. Rules
//! only *describe* what should happen; the resolver applies a whole batch
//! or nothing.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, Resources};
use crate::facilities::ArtifactRight;
use crate::ships::ShipId;
use crate::territories::TerritoryId;

/// An atomic match effect, always on behalf of the batch's player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    // === Resources ===

    /// Add resources.
    Gain(Resources),

    /// Remove resources; fails the batch if the player cannot cover them.
    Spend(Resources),

    // === Colonies ===

    /// Place one colony from the player's supply.
    PlaceColony(TerritoryId),

    // === Ships ===

    /// Take a docked ship out of the fleet and back to the supply.
    RetireShip(ShipId),

    /// Add a ship to the player's fleet, reusing a retired one first.
    BuildShip,

    // === Facility state ===

    /// Set the player's Colonist Hub track position.
    SetHubTrack(u8),

    /// Player may raid this turn.
    GrantRaid,

    /// Player may use the Alien Artifact window this turn.
    GrantArtifact(ArtifactRight),
}

impl Effect {
    /// Gain fuel.
    #[must_use]
    pub fn fuel(amount: u32) -> Self {
        Self::Gain(Resources::fuel(amount))
    }

    /// Gain ore.
    #[must_use]
    pub fn ore(amount: u32) -> Self {
        Self::Gain(Resources::ore(amount))
    }

    /// Spend resources.
    #[must_use]
    pub fn spend(cost: Resources) -> Self {
        Self::Spend(cost)
    }
}

/// Effects for one player, applied in order as a unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectBatch {
    pub player: PlayerId,
    effects: SmallVec<[Effect; 4]>,
}

impl EffectBatch {
    /// Create an empty batch.
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            effects: SmallVec::new(),
        }
    }

    /// Append an effect.
    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Builder-style append.
    #[must_use]
    pub fn with(mut self, effect: Effect) -> Self {
        self.push(effect);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Net resources gained (ignoring spends).
    #[must_use]
    pub fn total_gain(&self) -> Resources {
        self.effects
            .iter()
            .filter_map(|e| match e {
                Effect::Gain(r) => Some(*r),
                _ => None,
            })
            .fold(Resources::default(), |acc, r| acc + r)
    }

    /// Total resources spent.
    #[must_use]
    pub fn total_cost(&self) -> Resources {
        self.effects
            .iter()
            .filter_map(|e| match e {
                Effect::Spend(r) => Some(*r),
                _ => None,
            })
            .fold(Resources::default(), |acc, r| acc + r)
    }

    /// Territories receiving colonies.
    pub fn colonies(&self) -> impl Iterator<Item = TerritoryId> + '_ {
        self.effects.iter().filter_map(|e| match e {
            Effect::PlaceColony(t) => Some(*t),
            _ => None,
        })
    }
}

impl Extend<Effect> for EffectBatch {
    fn extend<I: IntoIterator<Item = Effect>>(&mut self, iter: I) {
        self.effects.extend(iter);
    }
}
