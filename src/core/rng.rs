//! Seeded shuffling for decks and the trade deck.
//!
//! Each seat's deck and the trade deck draw from their own stream derived
//! from the session seed, so one player's reshuffle never perturbs another
//! pile's order.
//!
//! ```
//! use realm_rules::core::{GameRng, PlayerId};
//!
//! let mut a = vec![1, 2, 3, 4, 5, 6];
//! let mut b = a.clone();
//! GameRng::for_seat(42, PlayerId::FIRST).shuffle(&mut a);
//! GameRng::for_seat(42, PlayerId::FIRST).shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

use super::player::PlayerId;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create an RNG directly from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The stream for `seat`'s deck.
    #[must_use]
    pub fn for_seat(seed: u64, seat: PlayerId) -> Self {
        Self::derived(seed, ("deck", seat.index()))
    }

    /// The stream for the shared trade deck.
    #[must_use]
    pub fn for_trade_deck(seed: u64) -> Self {
        Self::derived(seed, ("trade", 0usize))
    }

    fn derived(seed: u64, stream: (&str, usize)) -> Self {
        let mut hasher = FxHasher::default();
        seed.hash(&mut hasher);
        stream.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
