//! # Map Configuration
//!
//! The 2D half of the configuration surface. Every section deserializes
//! from TOML with defaults for omitted keys, and is checked once by
//! `validate()` before any generation starts.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{MapError, MapResult};

/// Smallest supported number of elevation bands.
pub const MIN_FLOOR_LEVELS: u32 = 2;
/// Largest supported number of elevation bands.
///
/// Keeps band indices recoverable from an 8-bit grayscale export.
pub const MAX_FLOOR_LEVELS: u32 = 20;

/// Size, node count and colors of the biome map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    /// Map width in pixels (world X extent).
    pub width: usize,
    /// Map height in pixels (world Z extent).
    pub height: usize,
    /// Number of Voronoi seed points.
    pub node_count: usize,
    /// Lloyd relaxation rounds.
    pub relax_iterations: u32,
    /// Seed for the seed points; 0 draws a fresh one.
    pub seed: u64,
    /// Colors used by the rasterizer.
    pub colors: ColorConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            node_count: 30,
            relax_iterations: 2,
            seed: 0,
            colors: ColorConfig::default(),
        }
    }
}

impl MapConfig {
    /// Checks ranges.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> MapResult<()> {
        if self.width < 2 || self.height < 2 {
            return Err(MapError::InvalidConfig(format!(
                "map must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        if self.node_count == 0 {
            return Err(MapError::InvalidConfig("node_count must be at least 1".into()));
        }
        self.colors.validate()
    }
}

/// Centroid, edge and region colors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Marker stamped at every site.
    pub centroid: Color,
    /// Cell boundary color; fills never cross it.
    pub edge: Color,
    /// Region colors, consumed in site order and cycled.
    pub palette: Vec<Color>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            centroid: Color::MAGENTA,
            edge: Color::BLACK,
            palette: vec![
                Color::GREEN,
                Color::BLUE,
                Color::GRAY,
                Color::YELLOW,
                Color::RED,
                Color::rgb(34, 139, 34),
                Color::CYAN,
                Color::rgb(210, 180, 140),
            ],
        }
    }
}

impl ColorConfig {
    /// Checks that the palette can be told apart from the markers.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidConfig`] when the palette is empty or
    /// reuses the edge, centroid or background color.
    pub fn validate(&self) -> MapResult<()> {
        if self.palette.is_empty() {
            return Err(MapError::InvalidConfig("palette must hold at least one color".into()));
        }
        if self.edge == self.centroid {
            return Err(MapError::InvalidConfig("edge and centroid colors must differ".into()));
        }
        for &color in &self.palette {
            if color == self.edge || color == self.centroid || color == Color::WHITE {
                return Err(MapError::InvalidConfig(format!(
                    "palette color {color} collides with the edge, centroid or background color"
                )));
            }
        }
        Ok(())
    }
}

/// Fractal noise parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    /// Base frequency.
    pub frequency: f32,
    /// FBm octave count.
    pub octaves: u32,
    /// Noise seed; 0 draws a fresh one.
    pub seed: i32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { frequency: 0.05, octaves: 3, seed: 0 }
    }
}

impl NoiseConfig {
    /// Checks ranges.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidConfig`] for a negative or non-finite
    /// frequency, or zero octaves.
    pub fn validate(&self) -> MapResult<()> {
        if !self.frequency.is_finite() || self.frequency < 0.0 {
            return Err(MapError::InvalidConfig(format!("noise frequency {} must be >= 0", self.frequency)));
        }
        if self.octaves == 0 {
            return Err(MapError::InvalidConfig("noise octaves must be at least 1".into()));
        }
        Ok(())
    }
}

/// Heightfield shaping parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeightConfig {
    /// Radius of the radial mask, in pixels.
    pub mask_radius: f64,
    /// Number of discrete elevation bands.
    pub floor_level_count: u32,
}

impl Default for HeightConfig {
    fn default() -> Self {
        Self { mask_radius: 64.0, floor_level_count: 12 }
    }
}

impl HeightConfig {
    /// Checks ranges.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidConfig`] for a negative mask radius or a
    /// band count outside `2..=20`.
    pub fn validate(&self) -> MapResult<()> {
        if !self.mask_radius.is_finite() || self.mask_radius < 0.0 {
            return Err(MapError::InvalidConfig(format!("mask_radius {} must be >= 0", self.mask_radius)));
        }
        if !(MIN_FLOOR_LEVELS..=MAX_FLOOR_LEVELS).contains(&self.floor_level_count) {
            return Err(MapError::InvalidConfig(format!(
                "floor_level_count {} outside {MIN_FLOOR_LEVELS}..={MAX_FLOOR_LEVELS}",
                self.floor_level_count
            )));
        }
        Ok(())
    }
}
