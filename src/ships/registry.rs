//! Ship registry: every ship in the match, keyed by `ShipId`.
//!
//! Backed by an `im::Vector` so cloning the registry for lookahead is O(1)
//! and later writes on either copy never leak into the other.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ship::{DockSlot, Ship, ShipId, ShipLocation};
use crate::core::{GameRng, PlayerId};
use crate::facilities::FacilityId;

/// Ships docked in one group, ordered by slot.
pub type DockedShips<'a> = SmallVec<[&'a Ship; 6]>;

/// Owns all ship entities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipRegistry {
    ships: Vector<Ship>,
}

impl ShipRegistry {
    /// Create `per_player` unrolled ships for each of `player_count` players.
    #[must_use]
    pub fn new(player_count: usize, per_player: u8) -> Self {
        let ships = PlayerId::all(player_count)
            .flat_map(|p| (0..per_player).map(move |i| Ship::new(ShipId::new(p, i))))
            .collect();
        Self { ships }
    }

    /// Total ships across all players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Look up a ship.
    #[must_use]
    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    /// Look up a ship for mutation.
    pub fn get_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        let pos = self.ships.iter().position(|s| s.id == id)?;
        self.ships.get_mut(pos)
    }

    #[must_use]
    pub fn contains(&self, id: ShipId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over every ship.
    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// Iterate over one player's ships, retired ones included.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(move |s| s.owner() == player)
    }

    /// Iterate over one player's active fleet.
    pub fn fleet(&self, player: PlayerId) -> impl Iterator<Item = &Ship> {
        self.owned_by(player).filter(|s| !s.is_retired())
    }

    /// Fleet size of one player.
    #[must_use]
    pub fn count_for(&self, player: PlayerId) -> usize {
        self.fleet(player).count()
    }

    /// Grow `player`'s fleet by one ship, in the pool and unrolled.
    ///
    /// A retired ship is brought back before a new one is made.
    pub fn add_ship(&mut self, player: PlayerId) -> ShipId {
        if let Some(ship) = self
            .ships
            .iter_mut()
            .find(|s| s.owner() == player && s.is_retired())
        {
            ship.location = ShipLocation::Pool;
            return ship.id;
        }

        let index = self
            .owned_by(player)
            .map(|s| s.id.index + 1)
            .max()
            .unwrap_or(0);
        let id = ShipId::new(player, index);
        self.ships.push_back(Ship::new(id));
        id
    }

    /// Bring all of `player`'s active ships home and roll each of them.
    pub fn recall_and_roll(&mut self, player: PlayerId, rng: &mut GameRng) {
        for ship in self
            .ships
            .iter_mut()
            .filter(|s| s.owner() == player && !s.is_retired())
        {
            ship.location = ShipLocation::Pool;
            ship.locked = false;
            ship.die = Some(rng.roll_die());
        }
    }

    /// Re-roll a single ship.
    pub fn reroll(&mut self, id: ShipId, rng: &mut GameRng) -> Option<u8> {
        let ship = self.get_mut(id)?;
        let face = rng.roll_die();
        ship.die = Some(face);
        Some(face)
    }

    /// Set a ship's die value directly.
    pub fn set_value(&mut self, id: ShipId, value: u8) -> bool {
        match self.get_mut(id) {
            Some(ship) => {
                ship.die = Some(value);
                true
            }
            None => false,
        }
    }

    /// Ships docked in one group, ordered by slot.
    #[must_use]
    pub fn docked_in(&self, facility: FacilityId, group: usize) -> DockedShips<'_> {
        let mut docked: DockedShips<'_> = self
            .ships
            .iter()
            .filter(|s| matches!(s.dock(), Some(d) if d.facility == facility && d.group == group))
            .collect();
        docked.sort_by_key(|s| s.dock().map_or(0, |d| d.slot));
        docked
    }

    /// Ships docked anywhere in `facility`.
    pub fn docked_at(&self, facility: FacilityId) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(move |s| s.is_at(facility))
    }

    /// Place ships into the lowest free slots of a group.
    ///
    /// Callers check capacity beforehand; ships beyond `capacity` are left
    /// in the pool.
    pub fn dock(&mut self, ids: &[ShipId], facility: FacilityId, group: usize, capacity: usize) {
        let taken: SmallVec<[usize; 8]> = self
            .docked_in(facility, group)
            .iter()
            .filter_map(|s| s.dock().map(|d| d.slot))
            .collect();
        let mut free = (0..capacity).filter(|slot| !taken.contains(slot));

        for &id in ids {
            let Some(slot) = free.next() else { break };
            if let Some(ship) = self.get_mut(id) {
                ship.location = ShipLocation::Docked(DockSlot {
                    facility,
                    group,
                    slot,
                });
            }
        }
    }

    /// Return a ship to its owner's pool.
    pub fn return_to_pool(&mut self, id: ShipId) -> bool {
        match self.get_mut(id) {
            Some(ship) => {
                ship.location = ShipLocation::Pool;
                ship.locked = false;
                true
            }
            None => false,
        }
    }

    /// Take a ship out of its owner's fleet.
    pub fn retire(&mut self, id: ShipId) -> bool {
        match self.get_mut(id) {
            Some(ship) => {
                ship.location = ShipLocation::Retired;
                ship.locked = false;
                ship.die = None;
                true
            }
            None => false,
        }
    }

    /// Lock every docked ship of `player`.
    pub fn lock_docked(&mut self, player: PlayerId) {
        for ship in self
            .ships
            .iter_mut()
            .filter(|s| s.owner() == player && s.is_docked())
        {
            ship.locked = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_new_registry() {
        let ships = ShipRegistry::new(3, 3);
        assert_eq!(ships.len(), 9);
        assert_eq!(ships.count_for(p(2)), 3);
        assert!(ships.contains(ShipId::new(p(1), 2)));
        assert!(!ships.contains(ShipId::new(p(1), 3)));
    }

    #[test]
    fn test_add_ship_uses_next_index() {
        let mut ships = ShipRegistry::new(2, 3);
        let id = ships.add_ship(p(0));
        assert_eq!(id, ShipId::new(p(0), 3));
        assert_eq!(ships.count_for(p(0)), 4);
        assert_eq!(ships.count_for(p(1)), 3);
    }

    #[test]
    fn test_recall_and_roll() {
        let mut ships = ShipRegistry::new(2, 3);
        let mut rng = GameRng::new(1).with_script([1, 2, 3]);

        ships.dock(&[ShipId::new(p(0), 0)], FacilityId::MaintenanceBay, 0, 20);
        ships.lock_docked(p(0));

        ships.recall_and_roll(p(0), &mut rng);

        let values: Vec<_> = ships.owned_by(p(0)).map(|s| s.die).collect();
        assert_eq!(values, vec![Some(1), Some(2), Some(3)]);
        assert!(ships.owned_by(p(0)).all(|s| !s.is_docked() && !s.locked));
        assert!(ships.owned_by(p(1)).all(|s| s.die.is_none()));
    }

    #[test]
    fn test_retired_ship_leaves_fleet_until_rebuilt() {
        let mut ships = ShipRegistry::new(2, 3);
        let mut rng = GameRng::new(1);
        let gone = ShipId::new(p(0), 1);

        ships.dock(&[gone], FacilityId::TerraformingStation, 0, 1);
        ships.retire(gone);
        assert_eq!(ships.count_for(p(0)), 2);
        assert_eq!(ships.docked_at(FacilityId::TerraformingStation).count(), 0);

        ships.recall_and_roll(p(0), &mut rng);
        assert_eq!(ships.get(gone).and_then(|s| s.die), None);
        assert_eq!(ships.fleet(p(0)).filter(|s| s.die.is_some()).count(), 2);

        assert_eq!(ships.add_ship(p(0)), gone);
        assert_eq!(ships.count_for(p(0)), 3);
        assert_eq!(ships.len(), 6);
        assert_eq!(ships.add_ship(p(0)), ShipId::new(p(0), 3));
    }

    #[test]
    fn test_dock_fills_lowest_free_slots() {
        let mut ships = ShipRegistry::new(2, 3);
        let a = ShipId::new(p(0), 0);
        let b = ShipId::new(p(0), 1);
        let c = ShipId::new(p(1), 0);

        ships.dock(&[a, b], FacilityId::SolarConverter, 0, 5);
        ships.return_to_pool(a);
        ships.dock(&[c], FacilityId::SolarConverter, 0, 5);

        let docked = ships.docked_in(FacilityId::SolarConverter, 0);
        let ids: Vec<_> = docked.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![c, b]);
        assert_eq!(ships.get(c).and_then(Ship::dock).map(|d| d.slot), Some(0));
    }

    #[test]
    fn test_dock_respects_capacity() {
        let mut ships = ShipRegistry::new(1, 3);
        let ids: Vec<_> = ships.owned_by(p(0)).map(|s| s.id).collect();

        ships.dock(&ids, FacilityId::TerraformingStation, 0, 1);

        assert_eq!(ships.docked_at(FacilityId::TerraformingStation).count(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut ships = ShipRegistry::new(2, 3);
        let snapshot = ships.clone();
        ships.set_value(ShipId::new(p(0), 0), 6);

        assert_eq!(ships.get(ShipId::new(p(0), 0)).and_then(|s| s.die), Some(6));
        assert_eq!(snapshot.get(ShipId::new(p(0), 0)).and_then(|s| s.die), None);
    }
}
