//! Deterministic random number generation for dice and shuffles.
//!
//! Every random decision in a match (die rolls, deck shuffles, re-rolls)
//! goes through one [`GameRng`] owned by the engine.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Create independent branches for AI lookahead
//! - **Serializable**: O(1) state capture and restore
//! - **Scriptable**: Queue exact die faces for tests and replays
//!
//! ```
//! use frontier_rules::core::GameRng;
//!
//! let mut rng = GameRng::new(42).with_script([6, 6, 1]);
//! assert_eq!(rng.roll_die(), 6);
//! assert_eq!(rng.roll_die(), 6);
//! assert_eq!(rng.roll_die(), 1);
//!
//! // Script exhausted: falls back to the seeded stream.
//! let face = rng.roll_die();
//! assert!((1..=6).contains(&face));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Lowest face on a ship die.
pub const DIE_MIN: u8 = 1;

/// Highest face on a ship die.
pub const DIE_MAX: u8 = 6;

/// Deterministic RNG with forking for lookahead.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
/// Scripted faces are consumed before the seeded stream is touched.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    script: VecDeque<u8>,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            script: VecDeque::new(),
        }
    }

    /// Queue die faces to be returned by the next calls to [`roll_die`].
    ///
    /// Faces outside 1-6 are clamped into range.
    ///
    /// [`roll_die`]: GameRng::roll_die
    #[must_use]
    pub fn with_script(mut self, faces: impl IntoIterator<Item = u8>) -> Self {
        self.push_script(faces);
        self
    }

    /// Append die faces to the script.
    pub fn push_script(&mut self, faces: impl IntoIterator<Item = u8>) {
        self.script
            .extend(faces.into_iter().map(|f| f.clamp(DIE_MIN, DIE_MAX)));
    }

    /// Number of scripted faces not yet consumed.
    #[must_use]
    pub fn scripted_remaining(&self) -> usize {
        self.script.len()
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// The branch seed is derived from the seed and the current stream
    /// position, so forking leaves this RNG untouched and forks taken at
    /// different points in the match roll differently. The fork does not
    /// inherit the script: lookahead must not see faces queued for the
    /// authoritative match.
    #[must_use]
    pub fn fork(&self) -> Self {
        let position = self.inner.get_word_pos() as u64;
        let fork_seed = self
            .seed
            .wrapping_add(position.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Roll one die: a uniform value in 1..=6.
    pub fn roll_die(&mut self) -> u8 {
        match self.script.pop_front() {
            Some(face) => face,
            None => self.inner.gen_range(DIE_MIN..=DIE_MAX),
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            script: self.script.iter().copied().collect(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            script: state.script.iter().copied().collect(),
        }
    }
}

/// Serializable RNG state for snapshots.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many dice have been rolled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Scripted faces still pending
    pub script: Vec<u8>,
}
