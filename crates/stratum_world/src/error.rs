//! # World Error Types

use thiserror::Error;

use crate::block::OreType;
use crate::builder::BuildStage;

/// Errors that can occur while building or mutating a world.
#[derive(Error, Debug)]
pub enum WorldError {
    /// A configuration value is out of its accepted range.
    #[error("invalid world configuration: {0}")]
    InvalidConfig(String),

    /// Region map and heightfield disagree on the map size.
    #[error("region map is {regions_width}x{regions_height} but heightfield is {heights_width}x{heights_height}")]
    DimensionMismatch {
        /// Region map width.
        regions_width: usize,
        /// Region map height.
        regions_height: usize,
        /// Heightfield width.
        heights_width: usize,
        /// Heightfield height.
        heights_height: usize,
    },

    /// A coordinate lies outside the grid.
    #[error("position ({x}, {y}, {z}) is outside the world")]
    OutOfBounds {
        /// X coordinate.
        x: usize,
        /// Y coordinate.
        y: usize,
        /// Z coordinate.
        z: usize,
    },

    /// No block carries this render instance.
    #[error("no block is attached to instance {0}")]
    UnknownInstance(u64),

    /// This ore type cannot be placed by hand.
    #[error("{0:?} blocks cannot be placed")]
    InvalidPlacement(OreType),

    /// The world was requested before every stage finished.
    #[error("world build stopped at stage {0:?}")]
    Incomplete(BuildStage),
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
