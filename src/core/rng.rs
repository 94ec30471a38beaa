//! Deterministic random number generation for automated players.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical choices
//! - **Forkable**: Each automated player gets an independent stream
//!   derived from the session seed
//!
//! ```
//! use bisim_game::core::GameRng;
//!
//! let mut session = GameRng::new(42);
//! let mut attacker = session.fork();
//! let mut defender = session.fork();
//!
//! let choices = [10, 20, 30];
//! assert!(attacker.choose(&choices).is_some());
//! assert!(defender.choose(&choices).is_some());
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic, forkable RNG.
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

    /// Create an RNG seeded from the given seed, or from entropy if `None`.
    #[must_use]
    pub fn seeded(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(|| rand::thread_rng().gen()))
    }

    /// Fork this RNG to create an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Choose a uniformly random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
