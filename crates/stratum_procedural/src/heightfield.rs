//! # Heightfield Shaper
//!
//! Turns noise into discrete elevation bands:
//!
//! ```text
//! v = ((noise + 1) / 2) * mask(x, y)
//! h = 1                          if v >= 1 - 1/L
//!     floor(v * L) / L           otherwise
//! ```
//!
//! where `L` is the floor level count. The mask is a radial gradient around
//! the map center, so land rises toward the middle and sinks at the rim.
//! The top band (`h = 1`) is the distinguished "full" band; it carries no
//! terrain column.

use crate::config::HeightConfig;
use crate::error::{MapError, MapResult};
use crate::noise::NoiseSource;

/// Radial gradient mask, row-major, values in [0, 1].
///
/// With `R` = half the map height and `m` = `mask_radius`, a pixel at
/// distance `d` from the center gets `1 - (d + R - m) / R`, clamped.
#[must_use]
pub fn radial_mask(width: usize, height: usize, mask_radius: f64) -> Vec<f32> {
    let (cx, cy) = ((width / 2) as f64, (height / 2) as f64);
    let radius = cy.max(1.0);

    let mut mask = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let distance = (x as f64 - cx).hypot(y as f64 - cy) + (radius - mask_radius);
            mask.push((1.0 - distance / radius).clamp(0.0, 1.0) as f32);
        }
    }
    mask
}

/// Snaps a masked value onto one of `levels` bands, or the full band.
#[inline]
#[must_use]
pub fn quantize(value: f32, levels: u32) -> f32 {
    let levels = levels as f32;
    if value >= 1.0 - 1.0 / levels {
        1.0
    } else {
        (value * levels).floor() / levels
    }
}

/// A quantized elevation map, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightfield {
    width: usize,
    height: usize,
    floor_level_count: u32,
    values: Vec<f32>,
}

impl Heightfield {
    /// Samples `noise` over a `width x height` map and shapes it.
    #[must_use]
    pub fn shape(noise: &dyn NoiseSource, width: usize, height: usize, config: &HeightConfig) -> Self {
        let mask = radial_mask(width, height, config.mask_radius);
        let levels = config.floor_level_count;

        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let sample = noise.sample(x as f64, y as f64) as f32;
                let masked = (sample + 1.0) * 0.5 * mask[y * width + x];
                values.push(quantize(masked, levels));
            }
        }

        let field = Self { width, height, floor_level_count: levels, values };
        tracing::info!(
            width,
            height,
            levels,
            full_columns = field.full_count(),
            "shaped heightfield"
        );
        field
    }

    /// Wraps already-shaped values (e.g. loaded from an image).
    ///
    /// # Errors
    ///
    /// Returns [`MapError::PixelData`] when `values` does not hold exactly
    /// `width * height` entries.
    pub fn from_values(width: usize, height: usize, floor_level_count: u32, values: Vec<f32>) -> MapResult<Self> {
        if values.len() != width * height {
            return Err(MapError::PixelData { width, height, len: values.len() });
        }
        Ok(Self { width, height, floor_level_count, values })
    }

    /// Width in samples.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in samples.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of bands below the full band.
    #[inline]
    #[must_use]
    pub const fn floor_level_count(&self) -> u32 {
        self.floor_level_count
    }

    /// All values, row-major.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value at `(x, y)`, or `None` outside the map.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.values[y * self.width + x])
    }

    /// Threshold at and above which a value belongs to the full band.
    #[inline]
    #[must_use]
    pub fn full_threshold(&self) -> f32 {
        1.0 - 1.0 / self.floor_level_count as f32
    }

    /// Band index of the column at `(x, y)`.
    ///
    /// `None` for the full band and outside the map.
    #[must_use]
    pub fn band(&self, x: usize, y: usize) -> Option<u32> {
        let value = self.get(x, y)?;
        (value < self.full_threshold()).then(|| (value * self.floor_level_count as f32).round() as u32)
    }

    /// Number of samples in the full band.
    #[must_use]
    pub fn full_count(&self) -> usize {
        let threshold = self.full_threshold();
        self.values.iter().filter(|&&v| v >= threshold).count()
    }
}
