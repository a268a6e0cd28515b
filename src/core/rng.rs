//! Deterministic random number generation for tile placement.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical spawns
//! - **Forkable**: A new game derives its stream from the previous one
//! - **Serializable**: O(1) state capture and restore for snapshots
//!
//! ```
//! use rust_2048::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut same = GameRng::new(42);
//! assert_eq!(rng.gen_index(16), same.gen_index(16));
//!
//! // A fork does not replay the parent's sequence
//! let mut next_game = rng.fork();
//! let parent: Vec<_> = (0..8).map(|_| rng.gen_index(1000)).collect();
//! let child: Vec<_> = (0..8).map(|_| next_game.gen_index(1000)).collect();
//! assert_ne!(parent, child);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG owned by a single grid.
///
/// Uses ChaCha8 for speed and a cheap serializable position counter.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to seed an independent game.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Uniform index in `0..bound`.
    ///
    /// `bound` must be non-zero; callers check for an empty range first.
    pub fn gen_index(&mut self, bound: usize) -> usize {
        self.inner.gen_range(0..bound)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Choose `amount` distinct elements, in random order.
    ///
    /// Returns fewer than `amount` only when the slice is shorter.
    pub fn choose_distinct<T: Copy>(&mut self, slice: &[T], amount: usize) -> Vec<T> {
        use rand::seq::SliceRandom;
        slice.choose_multiple(&mut self.inner, amount).copied().collect()
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
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
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state for snapshots.
///
/// Uses ChaCha8 word position so restoring costs the same no matter how
/// many tiles have been spawned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Starting seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic new games
    pub fork_counter: u64,
}
