//! # World Configuration
//!
//! Column heights, ore ratios, strata thresholds and the two random-walk
//! passes. Defaults reproduce the classic 128-high world with ground at 30.

use serde::{Deserialize, Serialize};

use crate::biome::OreSentinels;
use crate::error::{WorldError, WorldResult};

/// Gap between the ground height offset and the start of the sky band.
pub const SKY_BAND_GAP: usize = 20;

/// Depth below the ground offset that cave tunnels start under.
pub const CAVE_START_DEPTH: usize = 5;

/// Depth below the ground offset that cave walks stay under.
pub const CAVE_WALK_DEPTH: usize = 4;

/// Voxel world parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Y extent of the grid.
    pub max_height: usize,
    /// Column top of the lowest band.
    pub ground_height_offset: usize,
    /// Seed for ore draws and random walks; 0 draws a fresh one.
    pub seed: u64,
    /// Per-ore generation ratios, in percent.
    pub ore_ratios: OreRatios,
    /// Elevation strata thresholds.
    pub strata: StrataConfig,
    /// Cave tunnels.
    pub caves: WalkConfig,
    /// Cloud clusters.
    pub clouds: WalkConfig,
    /// Region colors that mark ore veins.
    pub sentinels: OreSentinels,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_height: 128,
            ground_height_offset: 30,
            seed: 0,
            ore_ratios: OreRatios::default(),
            strata: StrataConfig::default(),
            caves: WalkConfig::caves(),
            clouds: WalkConfig::clouds(),
            sentinels: OreSentinels::default(),
        }
    }
}

impl WorldConfig {
    /// First y of the sky band. Every block at or above it is snow.
    #[inline]
    #[must_use]
    pub const fn sky_band_start(&self) -> usize {
        self.ground_height_offset + SKY_BAND_GAP
    }

    /// Checks ranges.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> WorldResult<()> {
        self.ore_ratios.validate()?;
        self.strata.validate()?;
        self.sentinels.validate()?;

        let cave_hole = self.caves.hole_size;
        if self.ground_height_offset < 2 * cave_hole + CAVE_START_DEPTH + 1 {
            return Err(WorldError::InvalidConfig(format!(
                "ground_height_offset {} leaves no room for caves with hole_size {cave_hole}",
                self.ground_height_offset
            )));
        }

        let cloud_hole = self.clouds.hole_size;
        if self.max_height <= self.sky_band_start() + 2 * cloud_hole {
            return Err(WorldError::InvalidConfig(format!(
                "max_height {} leaves no sky band above y = {} for clouds with hole_size {cloud_hole}",
                self.max_height,
                self.sky_band_start()
            )));
        }
        Ok(())
    }
}

/// Ore generation ratios, in percent of block draws.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OreRatios {
    /// Stone
    pub stone: u32,
    /// Iron
    pub iron: u32,
    /// Gold
    pub gold: u32,
    /// Diamond
    pub diamond: u32,
}

impl Default for OreRatios {
    fn default() -> Self {
        Self { stone: 25, iron: 10, gold: 4, diamond: 1 }
    }
}

impl OreRatios {
    /// Checks that the ratios fit in 100 percent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] when the ratios sum above 100.
    pub fn validate(&self) -> WorldResult<()> {
        let total = self.stone.saturating_add(self.iron).saturating_add(self.gold).saturating_add(self.diamond);
        if total > 100 {
            return Err(WorldError::InvalidConfig(format!("ore ratios sum to {total}, above 100")));
        }
        Ok(())
    }
}

/// Lowest y of each elevation stratum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrataConfig {
    /// Snow
    pub snow: usize,
    /// Stone
    pub stone: usize,
    /// Forest
    pub forest: usize,
    /// Grass
    pub grass: usize,
    /// Soil
    pub soil: usize,
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self { snow: 36, stone: 34, forest: 32, grass: 31, soil: 1 }
    }
}

impl StrataConfig {
    /// Checks that thresholds descend from snow to soil.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] when a lower stratum starts
    /// above a higher one.
    pub fn validate(&self) -> WorldResult<()> {
        let ordered = [self.snow, self.stone, self.forest, self.grass, self.soil];
        if ordered.windows(2).any(|w| w[0] < w[1]) {
            return Err(WorldError::InvalidConfig(format!(
                "strata thresholds must descend snow >= stone >= forest >= grass >= soil, got {ordered:?}"
            )));
        }
        Ok(())
    }
}

/// A random-walk pass (caves or clouds).
///
/// Has no per-key defaults: a table that is given lists all four keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalkConfig {
    /// Number of walks.
    pub count: u32,
    /// Base number of steps per walk.
    pub size: u32,
    /// Extra steps drawn from `[0, size_offset)`.
    pub size_offset: u32,
    /// Radius of the cube kernel around each step.
    pub hole_size: usize,
}

impl WalkConfig {
    /// Default cave pass: 3 tunnels of 150 + [0, 70) steps.
    #[must_use]
    pub const fn caves() -> Self {
        Self { count: 3, size: 150, size_offset: 70, hole_size: 1 }
    }

    /// Default cloud pass: 5 clusters of 50 + [0, 50) steps.
    #[must_use]
    pub const fn clouds() -> Self {
        Self { count: 5, size: 50, size_offset: 50, hole_size: 1 }
    }

    /// The same pass with `count` walks.
    #[must_use]
    pub fn with_count(self, count: u32) -> Self {
        Self { count, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        WorldConfig::default().validate().unwrap();
        assert_eq!(WorldConfig::default().sky_band_start(), 50);
    }

    #[test]
    fn test_ratio_sum_limit() {
        let mut ratios = OreRatios { stone: 60, iron: 30, gold: 9, diamond: 1 };
        ratios.validate().unwrap();
        ratios.diamond = 2;
        assert!(ratios.validate().is_err());
    }

    #[test]
    fn test_strata_must_descend() {
        let strata = StrataConfig { grass: 33, ..StrataConfig::default() };
        assert!(strata.validate().is_err());
    }

    #[test]
    fn test_low_ground_rejected() {
        let config = WorldConfig { ground_height_offset: 6, ..WorldConfig::default() };
        assert!(config.validate().is_err());
        let config = WorldConfig { ground_height_offset: 8, ..WorldConfig::default() };
        config.validate().unwrap();
    }

    #[test]
    fn test_short_sky_rejected() {
        let config = WorldConfig { max_height: 52, ..WorldConfig::default() };
        assert!(config.validate().is_err());
        let config = WorldConfig { max_height: 53, ..WorldConfig::default() };
        config.validate().unwrap();
    }
}
