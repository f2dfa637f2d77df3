//! Match configuration.
//!
//! The engine never hardcodes table-level tunables. A match is created from:
//! - `PlayerSpec`: one per seat, in turn order
//! - `MatchConfig`: seed, fleet sizes, caps and costs
//!
//! Defaults reproduce the standard rules.

use serde::{Deserialize, Serialize};

use super::resources::Resources;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 4;

/// Player colour tag (display only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl PlayerColor {
    /// Default colour for a seat.
    #[must_use]
    pub const fn for_seat(seat: usize) -> Self {
        match seat % 4 {
            0 => PlayerColor::Red,
            1 => PlayerColor::Blue,
            2 => PlayerColor::Green,
            _ => PlayerColor::Yellow,
        }
    }
}

/// Description of one seat at match start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub color: Option<PlayerColor>,
    pub is_ai: bool,
}

impl PlayerSpec {
    /// A human seat with the default colour.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            is_ai: false,
        }
    }

    /// A seat driven by an AI collaborator.
    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            is_ai: true,
        }
    }

    /// Set the colour tag.
    #[must_use]
    pub fn with_color(mut self, color: PlayerColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// Table-level tunables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Seed for the match RNG.
    pub seed: u64,

    /// Ships each player starts with.
    pub starting_ships: u8,

    /// Largest fleet a player may build.
    pub max_ships: u8,

    /// Resource total a player may keep at the end of the turn.
    pub resource_cap: u32,

    /// Colonies a single territory holds.
    pub territory_capacity: usize,

    /// Energy spent to place or move a field generator.
    pub field_generator_cost: u32,

    /// Resources of the first player in turn order.
    pub starting_resources: Resources,

    /// Extra fuel per later seat, to offset turn order.
    pub seat_fuel_bonus: u32,

    /// Overrides the colony supply derived from player count.
    pub colonies_per_player: Option<u8>,

    /// Cards dealt face up in the alien tech window.
    pub visible_cards: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            starting_ships: 3,
            max_ships: 6,
            resource_cap: 8,
            territory_capacity: 3,
            field_generator_cost: 3,
            starting_resources: Resources::new(2, 1, 0),
            seat_fuel_bonus: 1,
            colonies_per_player: None,
            visible_cards: 3,
        }
    }
}

impl MatchConfig {
    /// Default rules with a specific seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Colonies in each player's supply.
    ///
    /// Larger tables get fewer colonies so all of them still fit on the
    /// eight territories.
    #[must_use]
    pub fn colony_supply(&self, player_count: usize) -> u8 {
        self.colonies_per_player.unwrap_or(match player_count {
            0..=2 => 8,
            3 => 7,
            _ => 6,
        })
    }

    /// Starting stock for the player at `seat`.
    #[must_use]
    pub fn starting_resources_for(&self, seat: usize) -> Resources {
        self.starting_resources + Resources::fuel(self.seat_fuel_bonus * seat as u32)
    }
}
