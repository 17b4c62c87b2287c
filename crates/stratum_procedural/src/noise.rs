//! # Noise Provider
//!
//! Continuous 2D noise in [-1, 1] behind the [`NoiseSource`] trait.
//! The production source is fractal Perlin (FBm) from `fastnoise-lite`,
//! configured by frequency, octave count and an `i32` seed.

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use rand::Rng;

use crate::config::NoiseConfig;

/// A continuous scalar field over the plane.
pub trait NoiseSource {
    /// Samples the field; values lie in [-1, 1].
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Resolves a noise seed, substituting a fresh one for 0.
///
/// A zero seed is not an error: the noise would be flat, so a random seed
/// in `[1, i32::MAX)` is drawn instead.
#[must_use]
pub fn resolve_noise_seed<R: Rng + ?Sized>(seed: i32, rng: &mut R) -> i32 {
    if seed == 0 {
        let fresh = rng.gen_range(1..i32::MAX);
        tracing::debug!(seed = fresh, "substituted unset noise seed");
        fresh
    } else {
        seed
    }
}

/// Fractal Perlin noise (FBm).
pub struct FractalPerlin {
    noise: FastNoiseLite,
    seed: i32,
}

impl FractalPerlin {
    /// Creates the noise from explicit parameters.
    ///
    /// `seed` must already be resolved (see [`resolve_noise_seed`]).
    #[must_use]
    pub fn new(frequency: f32, octaves: u32, seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_frequency(Some(frequency));
        noise.set_fractal_octaves(Some(octaves.max(1) as i32));
        Self { noise, seed }
    }

    /// Creates the noise from its config section, resolving an unset seed.
    pub fn from_config<R: Rng + ?Sized>(config: &NoiseConfig, rng: &mut R) -> Self {
        Self::new(config.frequency, config.octaves, resolve_noise_seed(config.seed, rng))
    }

    /// The seed in use.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> i32 {
        self.seed
    }
}

impl NoiseSource for FractalPerlin {
    fn sample(&self, x: f64, y: f64) -> f64 {
        f64::from(self.noise.get_noise_2d(x as f32, y as f32)).clamp(-1.0, 1.0)
    }
}

/// A noise source that returns the same value everywhere.
#[derive(Clone, Copy, Debug)]
pub struct ConstantNoise(pub f64);

impl NoiseSource for ConstantNoise {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0.clamp(-1.0, 1.0)
    }
}
