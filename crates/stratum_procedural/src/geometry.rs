//! # Voronoi Geometry
//!
//! The geometry seam of the pipeline: given seed points and a bounding
//! rectangle, produce relaxed cell sites, clipped edges between adjacent
//! cells, and per-site neighbour lists.
//!
//! ## Provider
//!
//! [`HalfPlaneVoronoi`] builds each cell by clipping the bounding rectangle
//! against the perpendicular bisector of every other site. Every clipped
//! polygon edge remembers which bisector produced it, which yields both the
//! neighbour lists and the shared edges without a separate Delaunay pass.
//! Cost is O(n²) per relaxation round, fine for map-sized node counts.
//!
//! Other providers plug in through [`GeometryProvider`]; the rasterizer only
//! sees a [`VoronoiDiagram`].

use std::collections::{BTreeSet, HashMap};

use rand::Rng;

/// Tolerance for degenerate geometry.
const EPSILON: f64 = 1e-9;

/// A point in map space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1).
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// An axis-aligned rectangle in map space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle anchored at the origin, covering a `width x height` map.
    #[must_use]
    pub fn from_size(width: usize, height: usize) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    /// Corners in winding order.
    fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
    }
}

/// The boundary shared by two adjacent cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Endpoints after clipping to the bounds; `None` when degenerate.
    clipped: Option<(Point, Point)>,
}

impl Edge {
    /// An edge with both clipped endpoints.
    #[must_use]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { clipped: Some((a, b)) }
    }

    /// An edge whose clipped vertices are missing.
    #[must_use]
    pub const fn degenerate() -> Self {
        Self { clipped: None }
    }

    /// Clipped endpoints, if the edge survived clipping.
    #[inline]
    #[must_use]
    pub const fn clipped_vertices(&self) -> Option<(Point, Point)> {
        self.clipped
    }
}

/// A cell site with its adjacency.
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    /// Site coordinate (the relaxed centroid of the cell).
    pub coord: Point,
    /// Indices of adjacent sites, ascending.
    pub neighbors: Vec<usize>,
}

/// Output of a geometry provider.
#[derive(Clone, Debug)]
pub struct VoronoiDiagram {
    bounds: Rect,
    sites: Vec<Site>,
    edges: HashMap<(usize, usize), Edge>,
}

impl VoronoiDiagram {
    /// Assembles a diagram from parts.
    ///
    /// Edge keys are unordered site pairs; `(a, b)` and `(b, a)` address the
    /// same edge.
    #[must_use]
    pub fn new(bounds: Rect, sites: Vec<Site>, edges: impl IntoIterator<Item = ((usize, usize), Edge)>) -> Self {
        let edges = edges
            .into_iter()
            .map(|((a, b), edge)| ((a.min(b), a.max(b)), edge))
            .collect();
        Self { bounds, sites, edges }
    }

    /// Bounding rectangle the diagram was clipped to.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Sites in generation order.
    #[inline]
    #[must_use]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// The edge shared by two sites, if they are adjacent.
    #[must_use]
    pub fn edge_between(&self, a: usize, b: usize) -> Option<&Edge> {
        self.edges.get(&(a.min(b), a.max(b)))
    }

    /// Every unordered adjacent pair `(a, b)` with `a < b`, in site order.
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sites.iter().enumerate().flat_map(|(a, site)| {
            site.neighbors
                .iter()
                .copied()
                .filter(move |&b| b > a)
                .map(move |b| (a, b))
        })
    }
}

/// Produces Voronoi geometry from seed points.
pub trait GeometryProvider {
    /// Builds the diagram for `seeds` inside `bounds`, after
    /// `relax_iterations` rounds of Lloyd relaxation.
    fn generate(&self, seeds: &[Point], bounds: Rect, relax_iterations: u32) -> VoronoiDiagram;
}

/// Polygon vertex tagged with the site whose bisector produced the edge
/// starting at this vertex (`None` for the bounding rectangle).
type Vertex = (Point, Option<usize>);

/// Voronoi diagrams by half-plane clipping.
#[derive(Clone, Copy, Debug, Default)]
pub struct HalfPlaneVoronoi;

impl HalfPlaneVoronoi {
    /// Clips the bounds down to the cell of site `i`.
    fn cell(sites: &[Point], i: usize, bounds: Rect) -> Vec<Vertex> {
        let mut polygon: Vec<Vertex> = bounds.corners().iter().map(|&p| (p, None)).collect();
        let si = sites[i];

        for (j, &sj) in sites.iter().enumerate() {
            if j == i || si.distance(sj) < EPSILON {
                continue;
            }
            // Points closer to si than sj satisfy p·n <= c.
            let n = Point::new(sj.x - si.x, sj.y - si.y);
            let c = (sj.x * sj.x + sj.y * sj.y - si.x * si.x - si.y * si.y) * 0.5;
            let side = |p: Point| p.x * n.x + p.y * n.y - c;

            let mut clipped = Vec::with_capacity(polygon.len() + 1);
            for k in 0..polygon.len() {
                let (a, label) = polygon[k];
                let (b, _) = polygon[(k + 1) % polygon.len()];
                let (fa, fb) = (side(a), side(b));
                if fa <= 0.0 {
                    clipped.push((a, label));
                    if fb > 0.0 {
                        clipped.push((a.lerp(b, fa / (fa - fb)), Some(j)));
                    }
                } else if fb <= 0.0 {
                    clipped.push((a.lerp(b, fa / (fa - fb)), label));
                }
            }
            polygon = clipped;
            if polygon.is_empty() {
                break;
            }
        }

        Self::drop_short_edges(polygon)
    }

    /// Removes vertices that start a zero-length edge.
    fn drop_short_edges(polygon: Vec<Vertex>) -> Vec<Vertex> {
        let n = polygon.len();
        if n < 3 {
            return polygon;
        }
        (0..n)
            .filter(|&k| polygon[k].0.distance(polygon[(k + 1) % n].0) >= EPSILON)
            .map(|k| polygon[k])
            .collect()
    }

    /// Area-weighted centroid, falling back to the vertex mean.
    fn centroid(polygon: &[Vertex]) -> Option<Point> {
        if polygon.is_empty() {
            return None;
        }
        let mut area = 0.0;
        let (mut cx, mut cy) = (0.0, 0.0);
        for k in 0..polygon.len() {
            let a = polygon[k].0;
            let b = polygon[(k + 1) % polygon.len()].0;
            let cross = a.x * b.y - b.x * a.y;
            area += cross;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        if area.abs() < EPSILON {
            let count = polygon.len() as f64;
            let sx: f64 = polygon.iter().map(|v| v.0.x).sum();
            let sy: f64 = polygon.iter().map(|v| v.0.y).sum();
            return Some(Point::new(sx / count, sy / count));
        }
        Some(Point::new(cx / (3.0 * area), cy / (3.0 * area)))
    }

    /// Moves every site to the centroid of its cell.
    fn relax(sites: &mut [Point], bounds: Rect) {
        let cells: Vec<Vec<Vertex>> = (0..sites.len()).map(|i| Self::cell(sites, i, bounds)).collect();
        for (site, cell) in sites.iter_mut().zip(&cells) {
            if let Some(c) = Self::centroid(cell) {
                *site = c;
            }
        }
    }
}

impl GeometryProvider for HalfPlaneVoronoi {
    fn generate(&self, seeds: &[Point], bounds: Rect, relax_iterations: u32) -> VoronoiDiagram {
        // Coincident seeds have no bisector; keep the first of each.
        let mut sites: Vec<Point> = Vec::with_capacity(seeds.len());
        for &seed in seeds {
            if sites.iter().all(|s| s.distance(seed) >= EPSILON) {
                sites.push(seed);
            }
        }

        for _ in 0..relax_iterations {
            Self::relax(&mut sites, bounds);
        }

        let mut neighbors: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); sites.len()];
        let mut edges: HashMap<(usize, usize), Edge> = HashMap::new();

        for i in 0..sites.len() {
            let cell = Self::cell(&sites, i, bounds);
            for k in 0..cell.len() {
                let (a, label) = cell[k];
                let Some(j) = label else { continue };
                let b = cell[(k + 1) % cell.len()].0;
                neighbors[i].insert(j);
                neighbors[j].insert(i);
                edges.entry((i.min(j), i.max(j))).or_insert_with(|| Edge::new(a, b));
            }
        }

        let sites = sites
            .into_iter()
            .zip(neighbors)
            .map(|(coord, n)| Site { coord, neighbors: n.into_iter().collect() })
            .collect();

        VoronoiDiagram { bounds, sites, edges }
    }
}

/// Draws `count` integer seed points uniformly over a `width x height` map.
pub fn scatter_seed_points<R: Rng + ?Sized>(rng: &mut R, count: usize, width: usize, height: usize) -> Vec<Point> {
    (0..count)
        .map(|_| {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            Point::new(x as f64, y as f64)
        })
        .collect()
}
