//! # Map Images
//!
//! PNG persistence for both source maps, one byte per channel:
//!
//! - region buffer: RGBA8, pixel for pixel
//! - heightfield: 8-bit grayscale, `round(h * 255)`
//!
//! Loading a heightfield re-snaps every gray level to its band
//! (`round(g / 255 * L) / L`), which recovers the exact shaped value for
//! every supported band count.

use std::path::Path;

use image::{GrayImage, Luma, Rgba, RgbaImage};

use crate::color::Color;
use crate::error::MapResult;
use crate::heightfield::Heightfield;
use crate::raster::RegionBuffer;

/// Renders the region buffer as an RGBA image.
#[must_use]
pub fn region_image(buffer: &RegionBuffer) -> RgbaImage {
    RgbaImage::from_fn(buffer.width() as u32, buffer.height() as u32, |x, y| {
        let color = buffer.get(x as usize, y as usize).unwrap_or(RegionBuffer::BACKGROUND);
        Rgba(color.to_array())
    })
}

/// Renders the heightfield as a grayscale image.
#[must_use]
pub fn height_image(field: &Heightfield) -> GrayImage {
    GrayImage::from_fn(field.width() as u32, field.height() as u32, |x, y| {
        let value = field.get(x as usize, y as usize).unwrap_or(0.0);
        Luma([(value.clamp(0.0, 1.0) * 255.0).round() as u8])
    })
}

/// Saves the region buffer as a PNG.
///
/// # Errors
///
/// Returns [`crate::MapError::Image`] if encoding or writing fails.
pub fn save_region_map(buffer: &RegionBuffer, path: &Path) -> MapResult<()> {
    region_image(buffer).save(path)?;
    tracing::info!(path = %path.display(), "saved region map");
    Ok(())
}

/// Saves the heightfield as a grayscale PNG.
///
/// # Errors
///
/// Returns [`crate::MapError::Image`] if encoding or writing fails.
pub fn save_heightfield(field: &Heightfield, path: &Path) -> MapResult<()> {
    height_image(field).save(path)?;
    tracing::info!(path = %path.display(), "saved height map");
    Ok(())
}

/// Rebuilds a region buffer from an RGBA image.
#[must_use]
pub fn region_from_image(image: &RgbaImage) -> RegionBuffer {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let mut buffer = RegionBuffer::new(width, height, RegionBuffer::BACKGROUND);
    for (x, y, pixel) in image.enumerate_pixels() {
        buffer.set(x as usize, y as usize, Color::from_array(pixel.0));
    }
    buffer
}

/// Rebuilds a heightfield from a grayscale image, snapping to bands.
///
/// # Errors
///
/// Returns [`crate::MapError::PixelData`] if the image buffer is short.
pub fn heightfield_from_image(image: &GrayImage, floor_level_count: u32) -> MapResult<Heightfield> {
    let levels = floor_level_count as f32;
    let values = image
        .pixels()
        .map(|p| (f32::from(p.0[0]) / 255.0 * levels).round() / levels)
        .collect::<Vec<_>>();
    Heightfield::from_values(image.width() as usize, image.height() as usize, floor_level_count, values)
}

/// Loads a region map PNG.
///
/// # Errors
///
/// Returns [`crate::MapError::Image`] if the file cannot be read or decoded.
pub fn load_region_map(path: &Path) -> MapResult<RegionBuffer> {
    let image = image::open(path)?.to_rgba8();
    Ok(region_from_image(&image))
}

/// Loads a height map PNG.
///
/// # Errors
///
/// Returns [`crate::MapError::Image`] if the file cannot be read or decoded.
pub fn load_heightfield(path: &Path, floor_level_count: u32) -> MapResult<Heightfield> {
    let image = image::open(path)?.to_luma8();
    heightfield_from_image(&image, floor_level_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightfield::quantize;

    #[test]
    fn test_height_bands_survive_eight_bits() {
        for levels in 2..=20u32 {
            let values: Vec<f32> = (0..=200).map(|i| quantize(i as f32 / 200.0, levels)).collect();
            let field = Heightfield::from_values(values.len(), 1, levels, values).unwrap();
            let restored = heightfield_from_image(&height_image(&field), levels).unwrap();
            assert_eq!(restored, field, "levels = {levels}");
        }
    }

    #[test]
    fn test_region_pixels_survive_png() {
        let mut buffer = RegionBuffer::new(6, 4, RegionBuffer::BACKGROUND);
        buffer.set(1, 2, Color::BLACK);
        buffer.set(5, 3, Color::rgba(10, 20, 30, 40));

        let path = std::env::temp_dir().join(format!("stratum_region_{}.png", std::process::id()));
        save_region_map(&buffer, &path).unwrap();
        let loaded = load_region_map(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, buffer);
    }

    #[test]
    fn test_heightfield_survives_png() {
        let values = vec![0.0, 0.25, 0.5, 1.0];
        let field = Heightfield::from_values(2, 2, 4, values).unwrap();

        let path = std::env::temp_dir().join(format!("stratum_height_{}.png", std::process::id()));
        save_heightfield(&field, &path).unwrap();
        let loaded = load_heightfield(&path, 4).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, field);
    }
}
