//! Territory registry: colony placement, removal, moves, swaps and field
//! generators.
//!
//! Only territory-side occupancy lives here. The matching entry in the
//! player's own colony list is kept in step by the engine.

use serde::{Deserialize, Serialize};

use super::territory::{FieldGenerator, Territory, TerritoryId};
use crate::core::{Outcome, PlayerId, RuleViolation};

/// Owns the eight territories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryRegistry {
    territories: Vec<Territory>,
}

impl Default for TerritoryRegistry {
    fn default() -> Self {
        Self::new(3)
    }
}

impl TerritoryRegistry {
    /// All territories empty, each holding `capacity` colonies.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            territories: TerritoryId::ALL
                .iter()
                .map(|&id| Territory::new(id, capacity))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: TerritoryId) -> &Territory {
        &self.territories[id as usize]
    }

    fn get_mut(&mut self, id: TerritoryId) -> &mut Territory {
        &mut self.territories[id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Territory> {
        self.territories.iter()
    }

    #[must_use]
    pub fn controller(&self, id: TerritoryId) -> Option<PlayerId> {
        self.get(id).controller()
    }

    /// Territories `player` controls.
    pub fn controlled_by(&self, player: PlayerId) -> impl Iterator<Item = &Territory> {
        self.territories
            .iter()
            .filter(move |t| t.controller() == Some(player))
    }

    /// True if `player` currently enjoys the bonus of `id`.
    #[must_use]
    pub fn bonus_active(&self, id: TerritoryId, player: PlayerId) -> bool {
        self.get(id).grants_bonus_to(player)
    }

    /// Where a field generator sits, if placed.
    #[must_use]
    pub fn generator_location(&self, kind: FieldGenerator) -> Option<TerritoryId> {
        self.territories
            .iter()
            .find(|t| t.field == Some(kind))
            .map(|t| t.id)
    }

    /// Check whether a colony could be placed, without placing it.
    pub fn can_place(&self, id: TerritoryId) -> Outcome<()> {
        let territory = self.get(id);
        if territory.field == Some(FieldGenerator::Repulsor) {
            return Err(RuleViolation::TerritoryRepulsed(id));
        }
        if territory.is_full() {
            return Err(RuleViolation::TerritoryFull(id));
        }
        Ok(())
    }

    /// Add a colony for `player`.
    pub fn place_colony(&mut self, player: PlayerId, id: TerritoryId) -> Outcome<()> {
        self.can_place(id)?;
        let territory = self.get_mut(id);
        territory.occupants.push(player);
        territory.recompute_control();
        Ok(())
    }

    /// Remove one of `player`'s colonies.
    pub fn remove_colony(&mut self, player: PlayerId, id: TerritoryId) -> Outcome<()> {
        let territory = self.get_mut(id);
        let pos = territory
            .occupants
            .iter()
            .rposition(|&p| p == player)
            .ok_or(RuleViolation::NoColonyThere(id))?;
        territory.occupants.remove(pos);
        territory.recompute_control();
        Ok(())
    }

    /// Move one colony. A rejected destination leaves the source untouched.
    pub fn move_colony(&mut self, player: PlayerId, from: TerritoryId, to: TerritoryId) -> Outcome<()> {
        if from == to {
            return Err(RuleViolation::SameTerritory);
        }
        if self.get(from).colonies_of(player) == 0 {
            return Err(RuleViolation::NoColonyThere(from));
        }
        self.can_place(to)?;

        self.remove_colony(player, from)?;
        self.place_colony(player, to)
    }

    /// Exchange owner tags: `a`'s colony on `a_at` becomes `b`'s and
    /// `b`'s colony on `b_at` becomes `a`'s. Counts per territory do not change.
    pub fn swap_colonies(
        &mut self,
        a: PlayerId,
        a_at: TerritoryId,
        b: PlayerId,
        b_at: TerritoryId,
    ) -> Outcome<()> {
        if a_at == b_at {
            return Err(RuleViolation::SameTerritory);
        }
        let a_pos = self
            .get(a_at)
            .occupants
            .iter()
            .position(|&p| p == a)
            .ok_or(RuleViolation::NoColonyThere(a_at))?;
        let b_pos = self
            .get(b_at)
            .occupants
            .iter()
            .position(|&p| p == b)
            .ok_or(RuleViolation::NoColonyThere(b_at))?;

        let first = self.get_mut(a_at);
        first.occupants[a_pos] = b;
        first.recompute_control();

        let second = self.get_mut(b_at);
        second.occupants[b_pos] = a;
        second.recompute_control();
        Ok(())
    }

    /// Put a field generator on a territory, lifting it from wherever it was.
    ///
    /// A territory holds at most one generator; an existing one there is
    /// displaced back to the supply. Returns the generator's previous spot.
    pub fn place_generator(&mut self, kind: FieldGenerator, id: TerritoryId) -> Option<TerritoryId> {
        let previous = self.generator_location(kind);
        if let Some(prev) = previous {
            self.get_mut(prev).field = None;
        }
        self.get_mut(id).field = Some(kind);
        previous
    }

    /// Move an already placed generator.
    pub fn move_generator(&mut self, kind: FieldGenerator, to: TerritoryId) -> Outcome<TerritoryId> {
        let from = self
            .generator_location(kind)
            .ok_or(RuleViolation::GeneratorNotPlaced(kind))?;
        if from == to {
            return Err(RuleViolation::SameTerritory);
        }
        self.place_generator(kind, to);
        Ok(from)
    }

    /// Territory points and positron bonus for `player`.
    #[must_use]
    pub fn score_for(&self, player: PlayerId) -> (u32, u32) {
        let mut controlled = 0;
        let mut positron = 0;
        for territory in self.controlled_by(player) {
            controlled += 1;
            if territory.field == Some(FieldGenerator::Positron) {
                positron += 1;
            }
        }
        (controlled, positron)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_place_until_full() {
        let mut reg = TerritoryRegistry::default();
        let t = TerritoryId::LemBadlands;

        for i in 0..3 {
            reg.place_colony(p(i % 2), t).unwrap();
        }
        assert_eq!(
            reg.place_colony(p(1), t),
            Err(RuleViolation::TerritoryFull(t))
        );
        assert_eq!(reg.get(t).occupants().len(), 3);
        assert_eq!(reg.controller(t), Some(p(0)));
    }

    #[test]
    fn test_tie_displaces_controller() {
        let mut reg = TerritoryRegistry::default();
        let t = TerritoryId::HeinleinPlains;

        reg.place_colony(p(0), t).unwrap();
        assert_eq!(reg.controller(t), Some(p(0)));

        reg.place_colony(p(1), t).unwrap();
        assert_eq!(reg.controller(t), None);
    }

    #[test]
    fn test_repulsor_blocks_empty_territory() {
        let mut reg = TerritoryRegistry::default();
        let t = TerritoryId::PohlFoothills;
        reg.place_generator(FieldGenerator::Repulsor, t);

        assert_eq!(
            reg.place_colony(p(0), t),
            Err(RuleViolation::TerritoryRepulsed(t))
        );
        assert!(reg.get(t).occupants().is_empty());
    }

    #[test]
    fn test_move_rejected_destination_keeps_source() {
        let mut reg = TerritoryRegistry::default();
        let from = TerritoryId::AsimovCrater;
        let to = TerritoryId::HerbertValley;

        reg.place_colony(p(0), from).unwrap();
        for _ in 0..3 {
            reg.place_colony(p(1), to).unwrap();
        }

        assert_eq!(
            reg.move_colony(p(0), from, to),
            Err(RuleViolation::TerritoryFull(to))
        );
        assert_eq!(reg.get(from).occupants(), &[p(0)]);
        assert_eq!(reg.controller(from), Some(p(0)));
    }

    #[test]
    fn test_move_updates_control() {
        let mut reg = TerritoryRegistry::default();
        let from = TerritoryId::AsimovCrater;
        let to = TerritoryId::HerbertValley;
        reg.place_colony(p(0), from).unwrap();

        reg.move_colony(p(0), from, to).unwrap();

        assert_eq!(reg.controller(from), None);
        assert_eq!(reg.controller(to), Some(p(0)));
    }

    #[test]
    fn test_swap_exchanges_tags() {
        let mut reg = TerritoryRegistry::default();
        let a_at = TerritoryId::BradburyPlateau;
        let b_at = TerritoryId::BurroughsDesert;

        reg.place_colony(p(0), a_at).unwrap();
        reg.place_colony(p(1), b_at).unwrap();
        reg.place_colony(p(1), b_at).unwrap();

        reg.swap_colonies(p(0), a_at, p(1), b_at).unwrap();

        assert_eq!(reg.get(a_at).occupants(), &[p(1)]);
        assert_eq!(reg.get(b_at).occupants().len(), 2);
        assert_eq!(reg.get(b_at).colonies_of(p(0)), 1);
        assert_eq!(reg.controller(a_at), Some(p(1)));
        assert_eq!(reg.controller(b_at), None);
    }

    #[test]
    fn test_generators_are_single_instance() {
        let mut reg = TerritoryRegistry::default();
        reg.place_generator(FieldGenerator::Positron, TerritoryId::LemBadlands);
        let prev = reg.place_generator(FieldGenerator::Positron, TerritoryId::AsimovCrater);

        assert_eq!(prev, Some(TerritoryId::LemBadlands));
        assert_eq!(reg.get(TerritoryId::LemBadlands).field(), None);
        assert_eq!(
            reg.generator_location(FieldGenerator::Positron),
            Some(TerritoryId::AsimovCrater)
        );
    }

    #[test]
    fn test_positron_scores_once() {
        let mut reg = TerritoryRegistry::default();
        let t = TerritoryId::VanVogtMountains;
        reg.place_colony(p(0), t).unwrap();
        reg.place_colony(p(0), t).unwrap();
        reg.place_generator(FieldGenerator::Positron, t);

        assert_eq!(reg.score_for(p(0)), (1, 1));
        assert_eq!(reg.score_for(p(1)), (0, 0));
    }

    #[test]
    fn test_move_unplaced_generator_fails() {
        let mut reg = TerritoryRegistry::default();
        assert_eq!(
            reg.move_generator(FieldGenerator::Isolation, TerritoryId::LemBadlands),
            Err(RuleViolation::GeneratorNotPlaced(FieldGenerator::Isolation))
        );
    }
}
