//! # Generator Configuration
//!
//! The complete configuration surface, one TOML table per concern:
//!
//! ```toml
//! [map]      # size, node count, relaxation, colors
//! [noise]    # frequency, octaves, seed
//! [height]   # mask radius, floor level count
//! [world]    # heights, ores, strata, caves, clouds
//! ```
//!
//! Every key is optional, except that a `[world.caves]` or `[world.clouds]`
//! table, once given, lists all four of its keys. The file is validated
//! once, at load time.

use std::path::Path;

use serde::{Deserialize, Serialize};
use stratum_procedural::{HeightConfig, MapConfig, NoiseConfig};
use stratum_world::WorldConfig;

use crate::error::{GenerateError, GenerateResult};

/// Full generator configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Region map.
    pub map: MapConfig,
    /// Heightfield noise.
    pub noise: NoiseConfig,
    /// Heightfield shaping.
    pub height: HeightConfig,
    /// Voxel world.
    pub world: WorldConfig,
}

impl GeneratorConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Toml`] for malformed TOML or unknown keys,
    /// and the crate error of the first section that fails validation.
    pub fn from_toml_str(text: &str) -> GenerateResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] if the file cannot be read, otherwise
    /// as [`Self::from_toml_str`].
    pub fn load(path: &Path) -> GenerateResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GenerateError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded generator config");
        Ok(config)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns the error of the first invalid section.
    pub fn validate(&self) -> GenerateResult<()> {
        self.map.validate()?;
        self.noise.validate()?;
        self.height.validate()?;
        self.world.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_procedural::Color;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_partial_tables() {
        let config = GeneratorConfig::from_toml_str(
            r##"
            [map]
            width = 64
            colors = { edge = "#101010" }

            [world.caves]
            count = 7
            size = 20
            size_offset = 0
            hole_size = 2
            "##,
        )
        .unwrap();

        assert_eq!(config.map.width, 64);
        assert_eq!(config.map.height, 128);
        assert_eq!(config.map.colors.edge, Color::rgb(16, 16, 16));
        assert_eq!(config.world.caves.count, 7);
        assert_eq!(config.world.caves.hole_size, 2);
        assert_eq!(config.world.clouds, stratum_world::WalkConfig::clouds());
    }

    #[test]
    fn test_walk_tables_need_every_key() {
        let result = GeneratorConfig::from_toml_str("[world.clouds]
count = 2
");
        assert!(matches!(result, Err(GenerateError::Toml(_))));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = GeneratorConfig::from_toml_str("[map]\nwidht = 64\n");
        assert!(matches!(result, Err(GenerateError::Toml(_))));
    }

    #[test]
    fn test_validation_runs_on_load() {
        let result = GeneratorConfig::from_toml_str("[height]\nfloor_level_count = 40\n");
        assert!(matches!(result, Err(GenerateError::Map(_))));

        let result = GeneratorConfig::from_toml_str("[world.ore_ratios]\nstone = 99\n");
        assert!(matches!(result, Err(GenerateError::World(_))));
    }
}
