//! # Biome Classification
//!
//! Reads the region map: a handful of sentinel colors mark ore-vein biomes,
//! every other color is plain soil country.

use serde::{Deserialize, Serialize};
use stratum_procedural::Color;

use crate::block::OreType;
use crate::error::{WorldError, WorldResult};

/// Biome of a map column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Biome {
    /// Plain ground, no ore vein.
    Soil = 0,
    /// Stone vein
    Stone = 1,
    /// Iron vein
    Iron = 2,
    /// Gold vein
    Gold = 3,
    /// Diamond vein
    Diamond = 4,
}

impl Biome {
    /// Ore type this biome may produce.
    #[must_use]
    pub const fn ore(self) -> OreType {
        match self {
            Self::Soil => OreType::Soil,
            Self::Stone => OreType::Stone,
            Self::Iron => OreType::Iron,
            Self::Gold => OreType::Gold,
            Self::Diamond => OreType::Diamond,
        }
    }
}

/// Region colors that mark ore-vein biomes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OreSentinels {
    /// Marks iron veins.
    pub iron: Color,
    /// Marks gold veins.
    pub gold: Color,
    /// Marks diamond veins.
    pub diamond: Color,
    /// Marks stone veins.
    pub stone: Color,
}

impl Default for OreSentinels {
    fn default() -> Self {
        Self { iron: Color::BLUE, gold: Color::RED, diamond: Color::CYAN, stone: Color::GRAY }
    }
}

impl OreSentinels {
    /// Classifies a region color.
    #[must_use]
    pub fn classify(&self, color: Color) -> Biome {
        if color == self.iron {
            Biome::Iron
        } else if color == self.gold {
            Biome::Gold
        } else if color == self.diamond {
            Biome::Diamond
        } else if color == self.stone {
            Biome::Stone
        } else {
            Biome::Soil
        }
    }

    /// Checks that the four sentinels are distinct.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] when two sentinels share a color.
    pub fn validate(&self) -> WorldResult<()> {
        let colors = [self.iron, self.gold, self.diamond, self.stone];
        for (i, a) in colors.iter().enumerate() {
            if colors[i + 1..].contains(a) {
                return Err(WorldError::InvalidConfig(format!("sentinel color {a} is used twice")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sentinels() {
        let sentinels = OreSentinels::default();
        assert_eq!(sentinels.classify(Color::BLUE), Biome::Iron);
        assert_eq!(sentinels.classify(Color::RED), Biome::Gold);
        assert_eq!(sentinels.classify(Color::CYAN), Biome::Diamond);
        assert_eq!(sentinels.classify(Color::GRAY), Biome::Stone);
        assert_eq!(sentinels.classify(Color::GREEN), Biome::Soil);
        assert_eq!(sentinels.classify(Color::BLACK), Biome::Soil);
    }

    #[test]
    fn test_duplicate_sentinels_rejected() {
        let sentinels = OreSentinels { gold: Color::BLUE, ..OreSentinels::default() };
        assert!(sentinels.validate().is_err());
        OreSentinels::default().validate().unwrap();
    }
}
