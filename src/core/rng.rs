//! Deterministic random number generation for battles.
//!
//! ## Key features
//!
//! - **Deterministic**: same seed produces the identical sequence, so a
//!   whole battle can be replayed from a seed plus the submitted moves.
//! - **Injectable**: every crit roll, uniform strategy pick, and
//!   confusion roll flows through a `BattleRng` owned by the battle.
//!   No engine component touches a global random source.
//! - **Forkable**: a session forks a fresh, independent stream for each
//!   encounter so battles never share randomness.
//! - **Serializable**: O(1) state capture and restore for mid-battle
//!   snapshots.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG with forking for per-battle streams.
///
/// Uses ChaCha8 for speed while keeping high-quality randomness.
#[derive(Clone, Debug)]
pub struct BattleRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl BattleRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence. The
    /// session forks once per encounter so the same template fought
    /// twice does not replay identical rolls.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Roll against a probability in `[0, 1]`.
    ///
    /// Values outside the range are clamped; a crit chance pushed past
    /// 100% by stacked Speed effects simply always succeeds.
    pub fn roll(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Generate a random index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is 0.
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> BattleRngState {
        BattleRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &BattleRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state for mid-battle snapshots.
///
/// Uses the ChaCha8 word position for O(1) capture regardless of how
/// many rolls have been consumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
    /// Fork counter for deterministic per-battle branching.
    pub fork_counter: u64,
}
