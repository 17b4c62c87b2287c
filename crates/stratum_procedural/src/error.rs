//! # Map Error Types
//!
//! All errors that can occur while producing or persisting 2D maps.

use thiserror::Error;

/// Errors that can occur in map generation and map I/O.
#[derive(Error, Debug)]
pub enum MapError {
    /// A configuration value is out of its accepted range.
    #[error("invalid map configuration: {0}")]
    InvalidConfig(String),

    /// A color string could not be parsed.
    #[error("invalid color {0:?}: expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    /// Raw pixel data does not match the declared image size.
    #[error("pixel data of {len} entries does not fit a {width}x{height} image")]
    PixelData {
        /// Width in pixels.
        width: usize,
        /// Height in pixels.
        height: usize,
        /// Length of the provided data.
        len: usize,
    },

    /// Encoding or decoding a map image failed.
    #[error("map image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for map operations.
pub type MapResult<T> = Result<T, MapError>;
