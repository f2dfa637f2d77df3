//! Tech card definitions - static card data.
//!
//! `TechKind` holds the immutable properties of a card type: family,
//! victory points and which abilities it has. Per-copy data (owner, used
//! flag) lives in `TechCard`.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Resources};

/// Unique identifier for one physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TechCardId(pub u8);

impl TechCardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for TechCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tech({})", self.0)
    }
}

/// Card family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechFamily {
    VictoryPoint,
    Die,
    Colony,
    Combat,
    Resource,
}

/// Which of a card's two abilities to invoke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Paid in fuel, once per turn, card stays in hand.
    Power,
    /// Free, the card goes to the discard pile.
    Discard,
}

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechKind {
    AlienCity,
    AlienMonument,
    BoosterPod,
    StasisBeam,
    PolarityDevice,
    TemporalWarper,
    GravityManipulator,
    OrbitalTeleporter,
    MindControlHelmet,
    FieldRelocator,
    PlasmaCannon,
    HolographicDecoy,
    ResourceCache,
    DataCrystal,
}

impl TechKind {
    pub const ALL: [TechKind; 14] = [
        TechKind::AlienCity,
        TechKind::AlienMonument,
        TechKind::BoosterPod,
        TechKind::StasisBeam,
        TechKind::PolarityDevice,
        TechKind::TemporalWarper,
        TechKind::GravityManipulator,
        TechKind::OrbitalTeleporter,
        TechKind::MindControlHelmet,
        TechKind::FieldRelocator,
        TechKind::PlasmaCannon,
        TechKind::HolographicDecoy,
        TechKind::ResourceCache,
        TechKind::DataCrystal,
    ];

    /// Physical copies in the deck.
    #[must_use]
    pub const fn copies(self) -> u8 {
        match self {
            TechKind::GravityManipulator
            | TechKind::MindControlHelmet
            | TechKind::FieldRelocator
            | TechKind::HolographicDecoy
            | TechKind::ResourceCache
            | TechKind::DataCrystal => 1,
            _ => 2,
        }
    }

    #[must_use]
    pub const fn family(self) -> TechFamily {
        match self {
            TechKind::AlienCity | TechKind::AlienMonument => TechFamily::VictoryPoint,
            TechKind::BoosterPod
            | TechKind::StasisBeam
            | TechKind::PolarityDevice
            | TechKind::TemporalWarper
            | TechKind::GravityManipulator => TechFamily::Die,
            TechKind::OrbitalTeleporter | TechKind::MindControlHelmet | TechKind::FieldRelocator => {
                TechFamily::Colony
            }
            TechKind::PlasmaCannon | TechKind::HolographicDecoy => TechFamily::Combat,
            TechKind::ResourceCache | TechKind::DataCrystal => TechFamily::Resource,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TechKind::AlienCity => "Alien City",
            TechKind::AlienMonument => "Alien Monument",
            TechKind::BoosterPod => "Booster Pod",
            TechKind::StasisBeam => "Stasis Beam",
            TechKind::PolarityDevice => "Polarity Device",
            TechKind::TemporalWarper => "Temporal Warper",
            TechKind::GravityManipulator => "Gravity Manipulator",
            TechKind::OrbitalTeleporter => "Orbital Teleporter",
            TechKind::MindControlHelmet => "Mind Control Helmet",
            TechKind::FieldRelocator => "Field Relocator",
            TechKind::PlasmaCannon => "Plasma Cannon",
            TechKind::HolographicDecoy => "Holographic Decoy",
            TechKind::ResourceCache => "Resource Cache",
            TechKind::DataCrystal => "Data Crystal",
        }
    }

    /// Victory points while owned.
    #[must_use]
    pub const fn victory_points(self) -> u32 {
        match self.family() {
            TechFamily::VictoryPoint => 1,
            _ => 0,
        }
    }

    /// Fuel price of the power, or `None` if the card has no power.
    #[must_use]
    pub const fn power_cost(self) -> Option<Resources> {
        match self {
            TechKind::BoosterPod
            | TechKind::StasisBeam
            | TechKind::PolarityDevice
            | TechKind::TemporalWarper
            | TechKind::OrbitalTeleporter
            | TechKind::FieldRelocator
            | TechKind::PlasmaCannon
            | TechKind::DataCrystal => Some(Resources::fuel(1)),
            TechKind::GravityManipulator => Some(Resources::fuel(2)),
            TechKind::ResourceCache => Some(Resources::fuel(0)),
            TechKind::AlienCity
            | TechKind::AlienMonument
            | TechKind::MindControlHelmet
            | TechKind::HolographicDecoy => None,
        }
    }

    #[must_use]
    pub const fn has_discard_power(self) -> bool {
        matches!(
            self,
            TechKind::BoosterPod
                | TechKind::StasisBeam
                | TechKind::PolarityDevice
                | TechKind::TemporalWarper
                | TechKind::MindControlHelmet
                | TechKind::PlasmaCannon
                | TechKind::ResourceCache
                | TechKind::DataCrystal
        )
    }

    /// Price of invoking `ability`, or `None` if the card lacks it.
    #[must_use]
    pub const fn ability_cost(self, ability: Ability) -> Option<Resources> {
        match ability {
            Ability::Power => self.power_cost(),
            Ability::Discard => {
                if self.has_discard_power() {
                    Some(Resources::new(0, 0, 0))
                } else {
                    None
                }
            }
        }
    }

    /// Passive protection from the Raiders' Outpost.
    #[must_use]
    pub const fn blocks_raids(self) -> bool {
        matches!(self, TechKind::HolographicDecoy)
    }
}

impl std::fmt::Display for TechKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One physical card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TechCard {
    pub id: TechCardId,
    pub kind: TechKind,
    pub owner: Option<PlayerId>,
    pub used_this_turn: bool,
}

impl TechCard {
    #[must_use]
    pub fn new(id: TechCardId, kind: TechKind) -> Self {
        Self {
            id,
            kind,
            owner: None,
            used_this_turn: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[must_use]
    pub fn victory_points(&self) -> u32 {
        self.kind.victory_points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_has_twenty_two_cards() {
        let total: u32 = TechKind::ALL.iter().map(|k| u32::from(k.copies())).sum();
        assert_eq!(total, 22);
    }

    #[test]
    fn test_every_kind_is_described() {
        for kind in TechKind::ALL {
            let has_ability =
                kind.power_cost().is_some() || kind.has_discard_power() || kind.blocks_raids();
            assert!(
                has_ability || kind.family() == TechFamily::VictoryPoint,
                "{kind} does nothing"
            );
        }
    }

    #[test]
    fn test_costs() {
        assert_eq!(TechKind::GravityManipulator.power_cost(), Some(Resources::fuel(2)));
        assert_eq!(TechKind::MindControlHelmet.ability_cost(Ability::Power), None);
        assert_eq!(
            TechKind::MindControlHelmet.ability_cost(Ability::Discard),
            Some(Resources::default())
        );
        assert_eq!(TechKind::GravityManipulator.ability_cost(Ability::Discard), None);
    }

    #[test]
    fn test_only_victory_cards_score() {
        assert_eq!(TechKind::AlienCity.victory_points(), 1);
        assert_eq!(TechKind::PlasmaCannon.victory_points(), 0);
    }
}
