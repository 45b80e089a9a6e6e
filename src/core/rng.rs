//! Seeded randomness.
//!
//! One seed drives a whole session. `for_context` splits it into named
//! streams (`"deck"`, `"intent"`, `"reward"`) so that, for example, drawing
//! an extra card never changes which intent the enemy rolls next.
//!
//! ```
//! use rust_spire::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut deck = root.for_context("deck");
//! let mut replay = GameRng::new(42).for_context("deck");
//!
//! let mut a = [1, 2, 3, 4, 5];
//! let mut b = a;
//! deck.shuffle(&mut a);
//! replay.shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Seedable ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the stream for `context`. Same seed and context, same stream.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform integer in `range`.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// In-place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Uniform pick; `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Index drawn with probability proportional to its weight.
    ///
    /// Non-positive weights are never chosen. `None` when nothing has
    /// positive weight.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        let total: f32 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f32>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            threshold -= weight;
            if threshold <= 0.0 {
                return Some(i);
            }
        }

        // Rounding left a sliver past the last bucket.
        weights.iter().rposition(|&w| w > 0.0)
    }

    /// Up to `count` distinct indices, each round weighted by what is left.
    pub fn sample_weighted(&mut self, weights: &[f32], count: usize) -> Vec<usize> {
        let mut remaining = weights.to_vec();
        let mut picked = Vec::with_capacity(count.min(weights.len()));

        while picked.len() < count {
            let Some(idx) = self.choose_weighted(&remaining) else {
                break;
            };
            picked.push(idx);
            remaining[idx] = 0.0;
        }

        picked
    }
}
