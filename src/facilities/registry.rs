//! Facility registry: rule lookup and per-player Colonist Hub tracks.
//!
//! The registry stores no dock occupancy. Slot contents are read from the
//! ship table every time, so a cloned or restored match can never disagree
//! with itself about who is docked where.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::colonization::{ColonistHub, ColonyConstructor, TerraformingStation};
use super::commerce::{OrbitalMarket, Shipyard};
use super::production::{LunarMine, RadonCollector, SolarConverter};
use super::special::{AlienArtifact, MaintenanceBay, RaidersOutpost};
use super::{DockRequest, DockedGroup, FacilityId, FacilityRule};
use crate::core::{EngineError, Outcome, PlayerId, PlayerMap, RuleViolation};
use crate::ships::ShipRegistry;

/// Per-match facility state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityRegistry {
    hub_tracks: PlayerMap<u8>,
}

impl FacilityRegistry {
    /// Every player's hub track at the start.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            hub_tracks: PlayerMap::with_value(player_count, 0),
        }
    }

    /// The rule implementing `id`.
    #[must_use]
    pub fn rule(id: FacilityId) -> &'static dyn FacilityRule {
        match id {
            FacilityId::SolarConverter => &SolarConverter,
            FacilityId::LunarMine => &LunarMine,
            FacilityId::RadonCollector => &RadonCollector,
            FacilityId::ColonyConstructor => &ColonyConstructor,
            FacilityId::TerraformingStation => &TerraformingStation,
            FacilityId::ColonistHub => &ColonistHub,
            FacilityId::OrbitalMarket => &OrbitalMarket,
            FacilityId::RaidersOutpost => &RaidersOutpost,
            FacilityId::AlienArtifact => &AlienArtifact,
            FacilityId::MaintenanceBay => &MaintenanceBay,
            FacilityId::Shipyard => &Shipyard,
        }
    }

    /// Colonist Hub progress for `player`.
    #[must_use]
    pub fn hub_track(&self, player: PlayerId) -> u8 {
        self.hub_tracks.get(player).copied().unwrap_or(0)
    }

    pub fn set_hub_track(&mut self, player: PlayerId, position: u8) {
        if let Some(track) = self.hub_tracks.get_mut(player) {
            *track = position;
        }
    }

    pub fn hub_tracks(&self) -> impl Iterator<Item = (PlayerId, u8)> + '_ {
        self.hub_tracks.iter().map(|(p, &t)| (p, t))
    }

    /// Check a docking request against the live ship table.
    ///
    /// With `group` given, only that group is tried; an out-of-range group
    /// is a caller error. Without it, the first group that accepts the
    /// ships is chosen. Returns the chosen group.
    pub fn can_dock(
        &self,
        id: FacilityId,
        ships: &ShipRegistry,
        player: PlayerId,
        group: Option<usize>,
        incoming: &[u8],
    ) -> Result<Outcome<usize>, EngineError> {
        let rule = Self::rule(id);
        let groups = rule.dock_groups();

        let check = |g: usize| {
            let docked: SmallVec<[u8; 8]> = ships
                .docked_in(id, g)
                .iter()
                .filter_map(|s| s.die)
                .collect();
            rule.can_dock(&DockRequest {
                player,
                group: g,
                docked: &docked,
                incoming,
            })
        };

        if let Some(g) = group {
            if g >= groups.len() {
                return Err(EngineError::UnknownDockGroup {
                    facility: id,
                    group: g,
                });
            }
            return Ok(check(g).map(|()| g));
        }

        let mut first_failure = None;
        for g in 0..groups.len() {
            match check(g) {
                Ok(()) => return Ok(Ok(g)),
                Err(violation) => {
                    first_failure.get_or_insert(violation);
                }
            }
        }

        Ok(Err(match first_failure {
            Some(violation) if groups.len() == 1 => violation,
            _ => RuleViolation::NoGroupAccepts(id),
        }))
    }

    /// The groups holding `player`'s ships at `id`, in group order.
    #[must_use]
    pub fn docked_groups(id: FacilityId, ships: &ShipRegistry, player: PlayerId) -> Vec<DockedGroup> {
        (0..Self::rule(id).dock_groups().len())
            .filter_map(|g| {
                let own: SmallVec<[_; 6]> = ships
                    .docked_in(id, g)
                    .iter()
                    .filter(|s| s.owner() == player)
                    .filter_map(|s| s.die.map(|v| (s.id, v)))
                    .collect();
                (!own.is_empty()).then_some(DockedGroup {
                    group: g,
                    ships: own,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;
    use crate::ships::ShipId;

    fn fleet(faces: &[u8]) -> ShipRegistry {
        let mut ships = ShipRegistry::new(2, 3);
        let mut rng = GameRng::new(0).with_script(faces.iter().copied());
        ships.recall_and_roll(PlayerId::new(0), &mut rng);
        ships
    }

    #[test]
    fn test_picks_first_accepting_group() {
        let mut ships = fleet(&[4, 4, 4]);
        let p0 = PlayerId::new(0);
        let registry = FacilityRegistry::new(2);

        let g = registry
            .can_dock(FacilityId::ColonyConstructor, &ships, p0, None, &[4, 4, 4])
            .unwrap()
            .unwrap();
        assert_eq!(g, 0);

        let ids: Vec<ShipId> = ships.owned_by(p0).map(|s| s.id).collect();
        ships.dock(&ids, FacilityId::ColonyConstructor, 0, 3);

        let g = registry
            .can_dock(FacilityId::ColonyConstructor, &ships, p0, None, &[2, 2, 2])
            .unwrap()
            .unwrap();
        assert_eq!(g, 1);
    }

    #[test]
    fn test_unknown_group_is_a_hard_error() {
        let ships = fleet(&[1, 2, 3]);
        let registry = FacilityRegistry::new(2);
        let result = registry.can_dock(FacilityId::LunarMine, &ships, PlayerId::new(0), Some(3), &[1]);
        assert!(matches!(result, Err(EngineError::UnknownDockGroup { group: 3, .. })));
    }

    #[test]
    fn test_single_group_keeps_specific_violation() {
        let ships = fleet(&[1, 2, 3]);
        let registry = FacilityRegistry::new(2);
        let result = registry
            .can_dock(FacilityId::TerraformingStation, &ships, PlayerId::new(0), None, &[5])
            .unwrap();
        assert!(matches!(result, Err(RuleViolation::InvalidCombination { .. })));
    }

    #[test]
    fn test_docked_groups_only_lists_own_ships() {
        let mut ships = fleet(&[3, 5, 6]);
        let p0 = PlayerId::new(0);
        let first = ShipId::new(p0, 0);
        ships.dock(&[first], FacilityId::SolarConverter, 0, 5);

        let groups = FacilityRegistry::docked_groups(FacilityId::SolarConverter, &ships, p0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].values().as_slice(), &[3]);
        assert!(FacilityRegistry::docked_groups(FacilityId::SolarConverter, &ships, PlayerId::new(1)).is_empty());
    }

    #[test]
    fn test_hub_tracks() {
        let mut registry = FacilityRegistry::new(3);
        registry.set_hub_track(PlayerId::new(2), 5);
        assert_eq!(registry.hub_track(PlayerId::new(2)), 5);
        assert_eq!(registry.hub_track(PlayerId::new(9)), 0);
    }
}
