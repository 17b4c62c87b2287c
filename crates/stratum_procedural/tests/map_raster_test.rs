//! # Region Map Tests
//!
//! End-to-end checks of seed points -> Voronoi -> rasterized regions, and of
//! noise -> shaped heightfield.

use stratum_procedural::{
    rasterize_regions, scatter_seed_points, Color, ColorConfig, Edge, FractalPerlin, GeometryProvider,
    HalfPlaneVoronoi, HeightConfig, Heightfield, Point, Rect, RegionBuffer, Seed, Site, VoronoiDiagram,
};

fn random_regions(seed: u64, width: usize, height: usize, nodes: usize) -> (VoronoiDiagram, RegionBuffer) {
    let mut rng = Seed::new(seed).derive(Seed::PURPOSE_SEED_POINTS).rng();
    let points = scatter_seed_points(&mut rng, nodes, width, height);
    let diagram = HalfPlaneVoronoi.generate(&points, Rect::from_size(width, height), 2);
    let buffer = rasterize_regions(&diagram, &ColorConfig::default());
    (diagram, buffer)
}

/// Test: fills cover nearly the whole map.
#[test]
fn test_regions_cover_the_map() {
    let (_, buffer) = random_regions(42, 128, 128, 30);

    let background = buffer.count(RegionBuffer::BACKGROUND);
    let total = buffer.pixels().len();
    let fraction = background as f64 / total as f64;
    println!("Unfilled pixels: {background} / {total}");

    assert!(fraction < 0.05, "too much unfilled background: {:.2}%", fraction * 100.0);
}

/// Test: every pixel carries a known color.
#[test]
fn test_only_known_colors() {
    let colors = ColorConfig::default();
    let (_, buffer) = random_regions(7, 96, 64, 20);

    for &pixel in buffer.pixels() {
        let known = pixel == colors.edge
            || pixel == colors.centroid
            || pixel == RegionBuffer::BACKGROUND
            || colors.palette.contains(&pixel);
        assert!(known, "unexpected color {pixel}");
    }
}

/// Test: same seed, same map.
#[test]
fn test_regions_are_deterministic() {
    let (_, a) = random_regions(99, 64, 64, 12);
    let (_, b) = random_regions(99, 64, 64, 12);
    assert_eq!(a, b);
}

/// Test: neighbour lists are symmetric and every adjacency has an edge.
#[test]
fn test_diagram_adjacency_is_symmetric() {
    let (diagram, _) = random_regions(3, 128, 128, 30);

    for (i, site) in diagram.sites().iter().enumerate() {
        for &j in &site.neighbors {
            assert!(diagram.sites()[j].neighbors.contains(&i), "{i} -> {j} not mirrored");
            assert!(diagram.edge_between(i, j).is_some(), "no edge between {i} and {j}");
        }
    }
}

/// Test: a lone site in a 4x4 map claims everything but its marker.
#[test]
fn test_single_site_fills_map() {
    let diagram = VoronoiDiagram::new(
        Rect::from_size(4, 4),
        vec![Site { coord: Point::new(1.0, 1.0), neighbors: Vec::new() }],
        std::iter::empty(),
    );
    let colors = ColorConfig { palette: vec![Color::GREEN], ..ColorConfig::default() };
    let buffer = rasterize_regions(&diagram, &colors);

    assert_eq!(buffer.count(Color::GREEN), 15);
    assert_eq!(buffer.get(1, 1), Some(colors.centroid));
}

/// Test: a missing edge lets the first region claim its neighbour.
#[test]
fn test_missing_edge_bleeds() {
    let diagram = VoronoiDiagram::new(
        Rect::from_size(10, 10),
        vec![
            Site { coord: Point::new(2.0, 5.0), neighbors: vec![1] },
            Site { coord: Point::new(7.0, 5.0), neighbors: vec![0] },
        ],
        [((0, 1), Edge::degenerate())],
    );
    let colors = ColorConfig { palette: vec![Color::GREEN, Color::BLUE], ..ColorConfig::default() };
    let buffer = rasterize_regions(&diagram, &colors);

    assert_eq!(buffer.count(Color::GREEN), 98);
    assert_eq!(buffer.count(Color::BLUE), 0);
    assert_eq!(buffer.count(colors.centroid), 2);
}

/// Test: shaped heights stay on band values.
#[test]
fn test_heightfield_values_are_banded() {
    let config = HeightConfig::default();
    let noise = FractalPerlin::new(0.05, 3, 1234);
    let field = Heightfield::shape(&noise, 128, 128, &config);

    let levels = config.floor_level_count as f32;
    for &v in field.values() {
        assert!((0.0..=1.0).contains(&v));
        assert_eq!((v * levels).round() / levels, v, "{v} is not on a band");
    }
    // The radial mask drives the rim to the lowest band.
    assert_eq!(field.get(0, 0), Some(0.0));
}
