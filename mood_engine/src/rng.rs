use bevy::prelude::Resource;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of randomness consumed by the particle layers.
///
/// Layers only ever ask for uniform floats and uniform indices, so a test can
/// swap in [`ScriptedSource`] and predict every placement exactly.
pub trait RandomSource: Send + Sync {
    /// Uniform sample in `[low, high)`. Returns `low` when the range is empty.
    fn uniform(&mut self, low: f32, high: f32) -> f32;

    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    fn index(&mut self, len: usize) -> usize;
}

/// Adapter from any `rand` generator to [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ChaCha8Rng> {
    /// Portable, reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RngSource<SmallRng> {
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }
}

impl<R: Rng + Send + Sync> RandomSource for RngSource<R> {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if !(high > low) {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Deterministic source replaying a fixed cycle of unit fractions.
///
/// Each draw takes the next fraction `f` and maps it to `low + (high - low) * f`
/// (or `floor(f * len)` for indices), wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    fractions: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(fractions: Vec<f32>) -> Self {
        Self {
            fractions,
            cursor: 0,
        }
    }

    /// Every draw returns the midpoint of its range.
    pub fn midpoint() -> Self {
        Self::new(vec![0.5])
    }

    fn next_fraction(&mut self) -> f32 {
        if self.fractions.is_empty() {
            return 0.0;
        }
        let value = self.fractions[self.cursor % self.fractions.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(0.0, 1.0)
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        let fraction = self.next_fraction();
        low + (high - low) * fraction
    }

    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let fraction = self.next_fraction();
        ((fraction * len as f32) as usize).min(len - 1)
    }
}

/// The engine-wide random source, shared by every layer through the world.
#[derive(Resource)]
pub struct EngineRng(Box<dyn RandomSource>);

impl EngineRng {
    pub fn new(source: impl RandomSource + 'static) -> Self {
        Self(Box::new(source))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(RngSource::seeded(seed))
    }

    /// Seeded when a seed is configured, entropy-backed otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(RngSource::from_entropy()),
        }
    }

    pub fn source(&mut self) -> &mut dyn RandomSource {
        self.0.as_mut()
    }
}
