//! Territory definitions and majority control.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// The eight fixed territories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerritoryId {
    HeinleinPlains,
    PohlFoothills,
    VanVogtMountains,
    BradburyPlateau,
    AsimovCrater,
    HerbertValley,
    LemBadlands,
    BurroughsDesert,
}

impl TerritoryId {
    /// All territories in board order.
    pub const ALL: [TerritoryId; 8] = [
        TerritoryId::HeinleinPlains,
        TerritoryId::PohlFoothills,
        TerritoryId::VanVogtMountains,
        TerritoryId::BradburyPlateau,
        TerritoryId::AsimovCrater,
        TerritoryId::HerbertValley,
        TerritoryId::LemBadlands,
        TerritoryId::BurroughsDesert,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TerritoryId::HeinleinPlains => "Heinlein Plains",
            TerritoryId::PohlFoothills => "Pohl Foothills",
            TerritoryId::VanVogtMountains => "Van Vogt Mountains",
            TerritoryId::BradburyPlateau => "Bradbury Plateau",
            TerritoryId::AsimovCrater => "Asimov Crater",
            TerritoryId::HerbertValley => "Herbert Valley",
            TerritoryId::LemBadlands => "Lem Badlands",
            TerritoryId::BurroughsDesert => "Burroughs Desert",
        }
    }

    /// The passive bonus granted to the controller.
    #[must_use]
    pub const fn bonus(self) -> TerritoryBonus {
        match self {
            TerritoryId::HeinleinPlains => TerritoryBonus::OreIncome,
            TerritoryId::LemBadlands => TerritoryBonus::FuelIncome,
            TerritoryId::BurroughsDesert => TerritoryBonus::EnergyIncome,
            TerritoryId::AsimovCrater => TerritoryBonus::CheaperColonyConstructor,
            TerritoryId::HerbertValley => TerritoryBonus::CheaperShipyard,
            TerritoryId::BradburyPlateau => TerritoryBonus::FairMarket,
            TerritoryId::VanVogtMountains => TerritoryBonus::Reroll,
            TerritoryId::PohlFoothills => TerritoryBonus::ExtraArtifactDraw,
        }
    }
}

impl std::fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Passive bonuses, active while the territory is controlled and not isolated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerritoryBonus {
    /// +1 ore when the controller's turn starts.
    OreIncome,
    /// +1 fuel when the controller's turn starts.
    FuelIncome,
    /// +1 energy when the controller's turn starts.
    EnergyIncome,
    /// Colony Constructor costs 2 ore instead of 3.
    CheaperColonyConstructor,
    /// Shipyard costs 1 fuel and 1 ore less.
    CheaperShipyard,
    /// Orbital Market trades at 1:1.
    FairMarket,
    /// One re-roll of any unplaced ships per turn.
    Reroll,
    /// Draw an extra card when claiming from the Alien Artifact.
    ExtraArtifactDraw,
}

impl TerritoryBonus {
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            TerritoryBonus::OreIncome => "gain 1 ore at the start of your turn",
            TerritoryBonus::FuelIncome => "gain 1 fuel at the start of your turn",
            TerritoryBonus::EnergyIncome => "gain 1 energy at the start of your turn",
            TerritoryBonus::CheaperColonyConstructor => "Colony Constructor costs 2 ore",
            TerritoryBonus::CheaperShipyard => "Shipyard costs 1 fuel and 1 ore less",
            TerritoryBonus::FairMarket => "Orbital Market trades at 1:1",
            TerritoryBonus::Reroll => "re-roll any unplaced ships once per turn",
            TerritoryBonus::ExtraArtifactDraw => "draw an extra card at the Alien Artifact",
        }
    }
}

/// Scarce single-instance territory overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldGenerator {
    /// Cancels the controller's bonus.
    Isolation,
    /// +1 victory point for the controller.
    Positron,
    /// No colonies may be placed here.
    Repulsor,
}

impl FieldGenerator {
    pub const ALL: [FieldGenerator; 3] = [
        FieldGenerator::Isolation,
        FieldGenerator::Positron,
        FieldGenerator::Repulsor,
    ];
}

impl std::fmt::Display for FieldGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldGenerator::Isolation => write!(f, "isolation field"),
            FieldGenerator::Positron => write!(f, "positron field"),
            FieldGenerator::Repulsor => write!(f, "repulsor field"),
        }
    }
}

/// One territory with its colonies.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub capacity: usize,
    /// One entry per colony, in placement order.
    pub(crate) occupants: SmallVec<[PlayerId; 3]>,
    pub(crate) field: Option<FieldGenerator>,
    pub(crate) controller: Option<PlayerId>,
}

impl Territory {
    #[must_use]
    pub fn new(id: TerritoryId, capacity: usize) -> Self {
        Self {
            id,
            capacity,
            occupants: SmallVec::new(),
            field: None,
            controller: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    #[must_use]
    pub fn bonus_description(&self) -> &'static str {
        self.id.bonus().description()
    }

    #[must_use]
    pub fn occupants(&self) -> &[PlayerId] {
        &self.occupants
    }

    #[must_use]
    pub fn field(&self) -> Option<FieldGenerator> {
        self.field
    }

    #[must_use]
    pub fn controller(&self) -> Option<PlayerId> {
        self.controller
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupants.len() >= self.capacity
    }

    #[must_use]
    pub fn colonies_of(&self, player: PlayerId) -> usize {
        self.occupants.iter().filter(|&&p| p == player).count()
    }

    /// True if `player` controls this territory and it is not isolated.
    #[must_use]
    pub fn grants_bonus_to(&self, player: PlayerId) -> bool {
        self.controller == Some(player) && self.field != Some(FieldGenerator::Isolation)
    }

    /// Recompute the controller from occupancy.
    ///
    /// The strict maximum holder controls; any tie at the maximum leaves the
    /// territory uncontrolled, even if someone controlled it before.
    pub(crate) fn recompute_control(&mut self) {
        let mut tally: FxHashMap<PlayerId, usize> = FxHashMap::default();
        for &p in &self.occupants {
            *tally.entry(p).or_default() += 1;
        }

        let max = tally.values().copied().max().unwrap_or(0);
        let mut leaders = tally.iter().filter(|(_, &n)| n == max).map(|(&p, _)| p);

        self.controller = match (leaders.next(), leaders.next()) {
            (Some(p), None) if max > 0 => Some(p),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    fn with_occupants(occupants: &[u8]) -> Territory {
        let mut t = Territory::new(TerritoryId::AsimovCrater, 3);
        t.occupants = occupants.iter().map(|&i| p(i)).collect();
        t.recompute_control();
        t
    }

    #[test]
    fn test_empty_has_no_controller() {
        assert_eq!(with_occupants(&[]).controller(), None);
    }

    #[test]
    fn test_single_colony_controls() {
        assert_eq!(with_occupants(&[1]).controller(), Some(p(1)));
    }

    #[test]
    fn test_one_one_tie_has_no_controller() {
        assert_eq!(with_occupants(&[0, 1]).controller(), None);
    }

    #[test]
    fn test_strict_majority_controls() {
        assert_eq!(with_occupants(&[0, 1, 0]).controller(), Some(p(0)));
    }

    #[test]
    fn test_three_way_tie() {
        assert_eq!(with_occupants(&[0, 1, 2]).controller(), None);
    }

    #[test]
    fn test_isolation_blocks_bonus() {
        let mut t = with_occupants(&[2]);
        assert!(t.grants_bonus_to(p(2)));
        t.field = Some(FieldGenerator::Isolation);
        assert!(!t.grants_bonus_to(p(2)));
        assert_eq!(t.controller(), Some(p(2)));
    }

    #[test]
    fn test_every_territory_has_a_distinct_bonus() {
        let bonuses: rustc_hash::FxHashSet<_> = TerritoryId::ALL.iter().map(|t| t.bonus()).collect();
        assert_eq!(bonuses.len(), 8);
    }
}
