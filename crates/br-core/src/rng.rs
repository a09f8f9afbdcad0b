//! Random number generation for level generation
//!
//! Uses a seeded ChaCha RNG so that a seed and a configuration fully
//! determine the generated level.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Level random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Note: only the seed is serialized; deserializing restarts the stream.
#[derive(Debug, Clone)]
pub struct LevelRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Serialize for LevelRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LevelRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(LevelRng::new(seed))
    }
}

impl LevelRng {
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

    /// Uniform double in `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns min..=max
    ///
    /// Returns `min` if the range is empty or inverted.
    pub fn between(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Same as [`between`](Self::between) for `usize` bounds
    pub fn between_usize(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Returns a double in `[min, max]`
    pub fn between_f64(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        min + self.uniform() * (max - min)
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.below(items.len())])
        }
    }
}

impl Default for LevelRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
