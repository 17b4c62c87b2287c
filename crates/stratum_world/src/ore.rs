//! # Ore Assignment
//!
//! Picks the type of every block the builder creates:
//!
//! 1. `y == 0` is bedrock.
//! 2. The sky band is snow.
//! 3. A draw in `[0, 100)` is looked up in the cumulative ore bands, in the
//!    fixed order Diamond, Gold, Iron, Stone. The ore is accepted only if
//!    the column's biome produces that ore.
//! 4. Otherwise the block falls into its elevation stratum.
//!
//! With the default ratios the bands are:
//!
//! | Ore     | Band      |
//! |---------|-----------|
//! | Diamond | [0, 1)    |
//! | Gold    | [1, 5)    |
//! | Iron    | [5, 15)   |
//! | Stone   | [15, 40)  |

use rand::Rng;

use crate::biome::Biome;
use crate::block::OreType;
use crate::config::{OreRatios, StrataConfig, WorldConfig};

/// Cumulative ore bands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OreTable {
    /// `(ore, exclusive upper bound)`, ascending.
    bands: [(OreType, u32); 4],
}

impl OreTable {
    /// Builds the bands from per-ore ratios.
    #[must_use]
    pub fn new(ratios: &OreRatios) -> Self {
        let mut upper = 0u32;
        let mut band = |ore, ratio: u32| {
            upper = upper.saturating_add(ratio);
            (ore, upper)
        };
        Self {
            bands: [
                band(OreType::Diamond, ratios.diamond),
                band(OreType::Gold, ratios.gold),
                band(OreType::Iron, ratios.iron),
                band(OreType::Stone, ratios.stone),
            ],
        }
    }

    /// Ore whose band holds `draw`, if any.
    #[must_use]
    pub fn lookup(&self, draw: u32) -> Option<OreType> {
        self.bands.iter().find(|&&(_, upper)| draw < upper).map(|&(ore, _)| ore)
    }
}

/// Elevation strata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strata {
    thresholds: StrataConfig,
}

impl Strata {
    /// Wraps validated thresholds.
    #[must_use]
    pub const fn new(thresholds: StrataConfig) -> Self {
        Self { thresholds }
    }

    /// Stratum of a block at height `y`.
    #[must_use]
    pub const fn classify(&self, y: usize) -> OreType {
        let t = &self.thresholds;
        if y >= t.snow {
            OreType::Snow
        } else if y >= t.stone {
            OreType::Stone
        } else if y >= t.forest {
            OreType::Forest
        } else if y >= t.grass {
            OreType::Grass
        } else if y >= t.soil {
            OreType::Soil
        } else {
            OreType::Grass
        }
    }
}

/// Block type selection for generated blocks.
#[derive(Clone, Debug)]
pub struct OrePicker {
    table: OreTable,
    strata: Strata,
    sky_band_start: usize,
}

impl OrePicker {
    /// Builds the picker for a world config.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            table: OreTable::new(&config.ore_ratios),
            strata: Strata::new(config.strata.clone()),
            sky_band_start: config.sky_band_start(),
        }
    }

    /// Picks the type of a block at height `y` in a column of `biome`.
    ///
    /// Draws from `rng` only when the ore bands are consulted.
    pub fn pick<R: Rng + ?Sized>(&self, y: usize, biome: Biome, rng: &mut R) -> OreType {
        if y == 0 {
            return OreType::Undestroyed;
        }
        if y >= self.sky_band_start {
            return OreType::Snow;
        }
        let draw = rng.gen_range(0..100);
        match self.table.lookup(draw) {
            Some(ore) if ore == biome.ore() => ore,
            _ => self.strata.classify(y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_bands() {
        let table = OreTable::new(&OreRatios::default());
        assert_eq!(table.lookup(0), Some(OreType::Diamond));
        assert_eq!(table.lookup(1), Some(OreType::Gold));
        assert_eq!(table.lookup(4), Some(OreType::Gold));
        assert_eq!(table.lookup(5), Some(OreType::Iron));
        assert_eq!(table.lookup(14), Some(OreType::Iron));
        assert_eq!(table.lookup(15), Some(OreType::Stone));
        assert_eq!(table.lookup(39), Some(OreType::Stone));
        assert_eq!(table.lookup(40), None);
        assert_eq!(table.lookup(99), None);
    }

    #[test]
    fn test_zero_ratio_has_no_band() {
        let table = OreTable::new(&OreRatios { stone: 0, iron: 0, gold: 0, diamond: 0 });
        assert!((0..100).all(|d| table.lookup(d).is_none()));
    }

    #[test]
    fn test_strata() {
        let strata = Strata::new(StrataConfig::default());
        assert_eq!(strata.classify(1), OreType::Soil);
        assert_eq!(strata.classify(30), OreType::Soil);
        assert_eq!(strata.classify(31), OreType::Grass);
        assert_eq!(strata.classify(32), OreType::Forest);
        assert_eq!(strata.classify(34), OreType::Stone);
        assert_eq!(strata.classify(36), OreType::Snow);
        assert_eq!(strata.classify(0), OreType::Grass);
    }

    #[test]
    fn test_biome_gates_ore() {
        let picker = OrePicker::new(&WorldConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..2000 {
            let ore = picker.pick(10, Biome::Soil, &mut rng);
            assert_eq!(ore, OreType::Soil, "soil columns grow no ore below the grass line");
        }

        let iron = (0..2000).filter(|_| picker.pick(10, Biome::Iron, &mut rng) == OreType::Iron).count();
        // About 10% of draws.
        assert!((100..300).contains(&iron), "iron draws: {iron}");
    }

    #[test]
    fn test_fixed_layers() {
        let picker = OrePicker::new(&WorldConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(picker.pick(0, Biome::Diamond, &mut rng), OreType::Undestroyed);
        assert_eq!(picker.pick(50, Biome::Diamond, &mut rng), OreType::Snow);
        assert_eq!(picker.pick(127, Biome::Soil, &mut rng), OreType::Snow);
    }
}
