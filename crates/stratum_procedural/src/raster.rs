//! # Region Rasterizer
//!
//! Turns Voronoi geometry into a colored biome map:
//!
//! 1. Fill the buffer with the background color (white).
//! 2. Stamp every site's rounded centroid; remember it as that region's
//!    fill seed, in site order.
//! 3. Trace the clipped edge of every adjacent pair with the edge color.
//!    Pairs whose clipped vertices are missing are skipped.
//! 4. Flood-fill from each seed with the next palette color (cycling).
//!
//! ## Fill rules
//!
//! A fill is 4-connected and uses an explicit stack. It recolors background
//! pixels, walks over the centroid marker without recoloring it, and stops
//! at the edge color, at its own color, at any color an earlier fill already
//! claimed, and at the buffer bounds.
//!
//! A skipped edge leaves two regions open to each other: the earlier fill
//! claims both areas and the later region keeps only its centroid marker.
//! That bleed is reported, not repaired.

use std::collections::HashSet;

use crate::color::Color;
use crate::config::ColorConfig;
use crate::error::{MapError, MapResult};
use crate::geometry::{Point, VoronoiDiagram};

/// A 2D grid of colors, row-major (`index = y * width + x`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl RegionBuffer {
    /// Color of pixels no fill has claimed.
    pub const BACKGROUND: Color = Color::WHITE;

    /// Creates a buffer filled with one color.
    #[must_use]
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self { width, height, pixels: vec![fill; width * height] }
    }

    /// Wraps existing pixels.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::PixelData`] when `pixels` does not hold exactly
    /// `width * height` entries.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> MapResult<Self> {
        if pixels.len() != width * height {
            return Err(MapError::PixelData { width, height, len: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row-major.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Flat index of `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Sets the color at `(x, y)`; ignored outside the buffer.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }

    /// Number of pixels with exactly this color.
    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    /// Clamps a map-space point to a pixel, truncating toward zero.
    fn pixel_of(&self, p: Point) -> (usize, usize) {
        let x = (p.x as i64).clamp(0, self.width as i64 - 1);
        let y = (p.y as i64).clamp(0, self.height as i64 - 1);
        (x as usize, y as usize)
    }

    /// Traces a segment with constant-step interpolation.
    ///
    /// The step is `1 / length`, so consecutive stamped pixels are at most
    /// one pixel apart (8-connected) and a 4-connected fill cannot slip
    /// through. The walk is bounded by the step count and ends on the
    /// endpoint's own pixel, whatever the floating drift.
    pub fn draw_edge(&mut self, from: Point, to: Point, color: Color) {
        let length = from.distance(to);
        let steps = length.ceil() as usize;
        if steps == 0 {
            let (x, y) = self.pixel_of(from);
            self.set(x, y, color);
            return;
        }
        let delta = 1.0 / length;
        for step in 0..=steps {
            let t = (step as f64 * delta).min(1.0);
            let (x, y) = self.pixel_of(from.lerp(to, t));
            self.set(x, y, color);
        }
    }

    /// Fills the region around `seed` (a flat index) with `color`.
    ///
    /// Returns the number of pixels recolored. Pixels with `pass_through`
    /// color are traversed but keep their color.
    pub fn flood_fill(&mut self, seed: usize, color: Color, edge: Color, pass_through: Color) -> usize {
        let mut claimed = 0;
        let mut visited_markers = HashSet::new();
        let mut stack = vec![seed];

        while let Some(i) = stack.pop() {
            let current = self.pixels[i];
            if current == edge || current == color {
                continue;
            }
            if current == pass_through {
                if !visited_markers.insert(i) {
                    continue;
                }
            } else if current == Self::BACKGROUND {
                self.pixels[i] = color;
                claimed += 1;
            } else {
                // Claimed by an earlier fill.
                continue;
            }

            let (x, y) = (i % self.width, i / self.width);
            if x > 0 {
                stack.push(i - 1);
            }
            if x + 1 < self.width {
                stack.push(i + 1);
            }
            if y > 0 {
                stack.push(i - self.width);
            }
            if y + 1 < self.height {
                stack.push(i + self.width);
            }
        }

        claimed
    }
}

/// Rasterizes a diagram into a region buffer.
///
/// The buffer size is the diagram's bounding rectangle, rounded.
#[must_use]
pub fn rasterize_regions(diagram: &VoronoiDiagram, colors: &ColorConfig) -> RegionBuffer {
    let bounds = diagram.bounds();
    let width = (bounds.width.round() as usize).max(1);
    let height = (bounds.height.round() as usize).max(1);
    let mut buffer = RegionBuffer::new(width, height, RegionBuffer::BACKGROUND);

    // Centroids, in site order.
    let mut seeds = Vec::with_capacity(diagram.sites().len());
    for site in diagram.sites() {
        let x = (site.coord.x - bounds.x).round().clamp(0.0, (width - 1) as f64) as usize;
        let y = (site.coord.y - bounds.y).round().clamp(0.0, (height - 1) as f64) as usize;
        buffer.set(x, y, colors.centroid);
        seeds.push(buffer.index(x, y));
    }

    // Edges between adjacent cells.
    let mut skipped = 0usize;
    for (a, b) in diagram.adjacent_pairs() {
        match diagram.edge_between(a, b).and_then(|e| e.clipped_vertices()) {
            Some((p, q)) => {
                let offset = |v: Point| Point::new(v.x - bounds.x, v.y - bounds.y);
                buffer.draw_edge(offset(p), offset(q), colors.edge);
            }
            None => {
                skipped += 1;
                tracing::warn!(a, b, "skipping edge without clipped vertices; regions may bleed");
            }
        }
    }

    // Region fills.
    for (n, &seed) in seeds.iter().enumerate() {
        let color = colors.palette[n % colors.palette.len()];
        let claimed = buffer.flood_fill(seed, color, colors.edge, colors.centroid);
        if claimed == 0 {
            tracing::warn!(region = n, "region fill claimed no pixels; its area bled into another region");
        }
    }

    tracing::info!(
        width,
        height,
        regions = seeds.len(),
        skipped_edges = skipped,
        "rasterized region map"
    );
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Edge, Rect, Site};

    fn colors(palette: Vec<Color>) -> ColorConfig {
        ColorConfig { centroid: Color::MAGENTA, edge: Color::BLACK, palette }
    }

    fn two_cells(edge: Edge) -> VoronoiDiagram {
        VoronoiDiagram::new(
            Rect::from_size(10, 10),
            vec![
                Site { coord: Point::new(2.0, 5.0), neighbors: vec![1] },
                Site { coord: Point::new(7.0, 5.0), neighbors: vec![0] },
            ],
            [((0, 1), edge)],
        )
    }

    #[test]
    fn test_edge_is_eight_connected() {
        let mut buffer = RegionBuffer::new(20, 20, RegionBuffer::BACKGROUND);
        buffer.draw_edge(Point::new(0.5, 0.5), Point::new(17.3, 12.9), Color::BLACK);

        let mut drawn: Vec<(usize, usize)> = Vec::new();
        for y in 0..20 {
            for x in 0..20 {
                if buffer.get(x, y) == Some(Color::BLACK) {
                    drawn.push((x, y));
                }
            }
        }
        assert!(drawn.contains(&(0, 0)));
        assert!(drawn.contains(&(17, 12)));
        // Every stamped pixel except the ends touches two others.
        for &(x, y) in &drawn {
            let touching = drawn
                .iter()
                .filter(|&&(ox, oy)| (ox, oy) != (x, y) && ox.abs_diff(x) <= 1 && oy.abs_diff(y) <= 1)
                .count();
            assert!(touching >= 1, "isolated edge pixel at ({x}, {y})");
        }
    }

    #[test]
    fn test_edge_clamps_into_bounds() {
        let mut buffer = RegionBuffer::new(4, 4, RegionBuffer::BACKGROUND);
        buffer.draw_edge(Point::new(4.0, 0.0), Point::new(4.0, 4.0), Color::BLACK);
        for y in 0..4 {
            assert_eq!(buffer.get(3, y), Some(Color::BLACK));
        }
    }

    #[test]
    fn test_zero_length_edge_stamps_one_pixel() {
        let mut buffer = RegionBuffer::new(4, 4, RegionBuffer::BACKGROUND);
        buffer.draw_edge(Point::new(1.2, 2.7), Point::new(1.2, 2.7), Color::BLACK);
        assert_eq!(buffer.count(Color::BLACK), 1);
        assert_eq!(buffer.get(1, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_single_site_fills_everything() {
        let diagram = VoronoiDiagram::new(
            Rect::from_size(4, 4),
            vec![Site { coord: Point::new(2.0, 2.0), neighbors: vec![] }],
            [],
        );
        let buffer = rasterize_regions(&diagram, &colors(vec![Color::GREEN]));

        assert_eq!(buffer.get(2, 2), Some(Color::MAGENTA));
        assert_eq!(buffer.count(Color::GREEN), 15);
        assert_eq!(buffer.count(RegionBuffer::BACKGROUND), 0);
    }

    #[test]
    fn test_edge_separates_two_regions() {
        let diagram = two_cells(Edge::new(Point::new(5.0, 0.0), Point::new(5.0, 10.0)));
        let buffer = rasterize_regions(&diagram, &colors(vec![Color::GREEN, Color::BLUE]));

        for y in 0..10 {
            assert_eq!(buffer.get(5, y), Some(Color::BLACK));
            for x in 0..5 {
                if (x, y) != (2, 5) {
                    assert_eq!(buffer.get(x, y), Some(Color::GREEN), "({x}, {y})");
                }
            }
            for x in 6..10 {
                if (x, y) != (7, 5) {
                    assert_eq!(buffer.get(x, y), Some(Color::BLUE), "({x}, {y})");
                }
            }
        }
        assert_eq!(buffer.count(RegionBuffer::BACKGROUND), 0);
    }

    #[test]
    fn test_missing_edge_bleeds_into_later_region() {
        let diagram = two_cells(Edge::degenerate());
        let buffer = rasterize_regions(&diagram, &colors(vec![Color::GREEN, Color::BLUE]));

        // The first fill takes the whole map; the second keeps its marker only.
        assert_eq!(buffer.count(Color::BLUE), 0);
        assert_eq!(buffer.count(Color::MAGENTA), 2);
        assert_eq!(buffer.count(Color::GREEN), 98);
    }

    #[test]
    fn test_palette_cycles() {
        let diagram = VoronoiDiagram::new(
            Rect::from_size(9, 3),
            vec![
                Site { coord: Point::new(1.0, 1.0), neighbors: vec![1] },
                Site { coord: Point::new(4.0, 1.0), neighbors: vec![0, 2] },
                Site { coord: Point::new(7.0, 1.0), neighbors: vec![1] },
            ],
            [
                ((0, 1), Edge::new(Point::new(3.0, 0.0), Point::new(3.0, 3.0))),
                ((1, 2), Edge::new(Point::new(6.0, 0.0), Point::new(6.0, 3.0))),
            ],
        );
        let buffer = rasterize_regions(&diagram, &colors(vec![Color::GREEN, Color::BLUE]));

        assert_eq!(buffer.get(0, 0), Some(Color::GREEN));
        assert_eq!(buffer.get(4, 0), Some(Color::BLUE));
        assert_eq!(buffer.get(8, 0), Some(Color::GREEN));
    }

    #[test]
    fn test_fill_is_idempotent() {
        let mut buffer = RegionBuffer::new(5, 5, RegionBuffer::BACKGROUND);
        let first = buffer.flood_fill(12, Color::GREEN, Color::BLACK, Color::MAGENTA);
        let second = buffer.flood_fill(12, Color::GREEN, Color::BLACK, Color::MAGENTA);
        assert_eq!(first, 25);
        assert_eq!(second, 0);
    }
}
