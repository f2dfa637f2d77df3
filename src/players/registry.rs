//! Player registry: resource arithmetic and per-player bookkeeping.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{Player, VictoryPoints};
use crate::core::{MatchConfig, Outcome, PlayerColor, PlayerId, PlayerSpec, Resources, RuleViolation};

/// Owns all player entities, indexed by `PlayerId`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRegistry {
    players: Vector<Player>,
}

impl PlayerRegistry {
    /// Seat players in the given order with their starting resources.
    #[must_use]
    pub fn new(specs: &[PlayerSpec], config: &MatchConfig) -> Self {
        let players = specs
            .iter()
            .enumerate()
            .map(|(seat, spec)| {
                let color = spec.color.unwrap_or_else(|| PlayerColor::for_seat(seat));
                let mut player = Player::new(PlayerId::new(seat as u8), &spec.name, color, spec.is_ai);
                player.resources = config.starting_resources_for(seat);
                player
            })
            .collect();
        Self { players }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        id.index() < self.players.len()
    }

    /// Players in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.players.len())
    }

    /// Add resources. Unknown ids are ignored.
    pub fn gain(&mut self, id: PlayerId, amount: Resources) {
        if let Some(player) = self.get_mut(id) {
            player.resources += amount;
        }
    }

    /// Spend resources, all or nothing.
    pub fn spend(&mut self, id: PlayerId, cost: Resources) -> Outcome<()> {
        let Some(player) = self.get_mut(id) else {
            return Err(RuleViolation::InvalidTarget(format!("{id}")));
        };
        match player.resources.checked_sub(&cost) {
            Some(rest) => {
                player.resources = rest;
                Ok(())
            }
            None => Err(RuleViolation::InsufficientResources {
                needed: cost,
                available: player.resources,
            }),
        }
    }

    /// Check affordability without spending.
    pub fn can_afford(&self, id: PlayerId, cost: &Resources) -> Outcome<()> {
        let available = self.get(id).map(|p| p.resources).unwrap_or_default();
        if available.covers(cost) {
            Ok(())
        } else {
            Err(RuleViolation::InsufficientResources {
                needed: *cost,
                available,
            })
        }
    }

    /// Apply the end-of-turn cap. Returns what was discarded.
    pub fn cap_resources(&mut self, id: PlayerId, cap: u32) -> Resources {
        self.get_mut(id)
            .map(|p| p.resources.cap_total(cap))
            .unwrap_or_default()
    }

    pub(crate) fn set_victory_points(&mut self, id: PlayerId, vp: VictoryPoints) {
        if let Some(player) = self.get_mut(id) {
            player.victory_points = vp;
        }
    }
}
