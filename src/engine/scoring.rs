//! Scoring and winner selection.
//!
//! Players are ranked by total victory points, then by number of tech
//! cards, then ore, then fuel. Anyone still level with the leader after
//! every tie-break shares the win.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::MatchContext;
use crate::core::PlayerId;
use crate::players::Player;

/// Result of a finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// Single winner.
    Winner(PlayerId),
    /// Shared victory after all tie-breaks.
    Winners(Vec<PlayerId>),
}

impl MatchResult {
    #[must_use]
    pub fn from_winners(mut winners: Vec<PlayerId>) -> Self {
        if winners.len() == 1 {
            MatchResult::Winner(winners.remove(0))
        } else {
            MatchResult::Winners(winners)
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            MatchResult::Winner(p) => *p == player,
            MatchResult::Winners(ps) => ps.contains(&player),
        }
    }
}

type RankKey = (u32, usize, u32, u32);

fn rank_key(player: &Player) -> RankKey {
    (
        player.victory_points().total(),
        player.tech_cards().len(),
        player.resources.ore,
        player.resources.fuel,
    )
}

/// Players from best to worst. Ties keep turn order.
#[must_use]
pub fn rank_players(ctx: &MatchContext) -> Vec<PlayerId> {
    let mut players: Vec<&Player> = ctx.players.iter().collect();
    players.sort_by_key(|p| Reverse(rank_key(p)));
    players.into_iter().map(|p| p.id).collect()
}

pub(crate) fn winners(ctx: &MatchContext) -> Vec<PlayerId> {
    let Some(best) = ctx.players.iter().map(rank_key).max() else {
        return Vec::new();
    };
    ctx.players
        .iter()
        .filter(|p| rank_key(p) == best)
        .map(|p| p.id)
        .collect()
}
