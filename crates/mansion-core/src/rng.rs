//! Random number generation for graph building
//!
//! Uses a seeded ChaCha RNG so a graph can be regenerated from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator random number source
///
/// Wraps ChaCha8Rng and remembers the seed it was created from.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1, or 0 if n is 0
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rn2(items.len() as u32) as usize])
        }
    }

    /// Pick `count` distinct indices from `0..len`, uniformly and in draw order.
    ///
    /// Returns fewer than `count` indices if `len < count`.
    pub fn sample_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let mut picked = Vec::with_capacity(count.min(len));
        while picked.len() < count && !pool.is_empty() {
            let idx = self.rn2(pool.len() as u32) as usize;
            picked.push(pool.remove(idx));
        }
        picked
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
