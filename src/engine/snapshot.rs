//! Match snapshots for save/resume and replay.
//!
//! A snapshot is the whole `MatchContext` plus the RNG state, so a restored
//! engine rolls the same dice the original would have.

use serde::{Deserialize, Serialize};

use super::{MatchContext, MatchEngine};
use crate::core::{EngineError, GameRng, GameRngState};

/// Serializable form of a running match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub context: MatchContext,
    pub rng: GameRngState,
}

impl MatchEngine {
    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            context: self.ctx.clone(),
            rng: self.rng.state(),
        }
    }

    /// Rebuild an engine from a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: MatchSnapshot) -> Self {
        Self {
            ctx: snapshot.context,
            rng: GameRng::from_state(&snapshot.rng),
        }
    }

    /// Encode the match with bincode.
    pub fn serialize(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(&self.snapshot())?)
    }

    /// Decode a match produced by [`MatchEngine::serialize`].
    pub fn deserialize(bytes: &[u8]) -> Result<Self, EngineError> {
        let snapshot: MatchSnapshot = bincode::deserialize(bytes)?;
        Ok(Self::from_snapshot(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::MatchBuilder;

    #[test]
    fn test_round_trip_preserves_state_and_dice() {
        let mut engine = MatchBuilder::new().player_count(3).seed(77).build().unwrap();
        engine.roll_dice().unwrap();

        let bytes = engine.serialize().unwrap();
        let mut restored = crate::engine::MatchEngine::deserialize(&bytes).unwrap();

        assert_eq!(restored.context(), engine.context());

        for _ in 0..5 {
            engine.advance_phase();
            restored.advance_phase();
        }
        assert_eq!(engine.roll_dice().unwrap(), restored.roll_dice().unwrap());
    }

    #[test]
    fn test_garbage_is_a_snapshot_error() {
        let result = crate::engine::MatchEngine::deserialize(&[1, 2, 3]);
        assert!(matches!(result, Err(crate::core::EngineError::Snapshot(_))));
    }
}
