//! # World Invariant Tests
//!
//! Builds complete worlds from generated maps and checks the properties
//! every world must keep, before and after mining.

use stratum_procedural::{
    rasterize_regions, scatter_seed_points, Color, ColorConfig, FractalPerlin, GeometryProvider, HalfPlaneVoronoi,
    HeightConfig, Heightfield, Rect, RegionBuffer, Seed,
};
use stratum_world::{GridPos, MineOutcome, NullSink, OreType, WalkConfig, World, WorldBuilder, WorldConfig};

const SIZE: usize = 32;

fn generated_maps() -> (RegionBuffer, Heightfield) {
    let mut rng = Seed::new(2024).derive(Seed::PURPOSE_SEED_POINTS).rng();
    let points = scatter_seed_points(&mut rng, 12, SIZE, SIZE);
    let diagram = HalfPlaneVoronoi.generate(&points, Rect::from_size(SIZE, SIZE), 2);
    let regions = rasterize_regions(&diagram, &ColorConfig::default());

    let noise = FractalPerlin::new(0.08, 3, 1234);
    let config = HeightConfig { mask_radius: 16.0, floor_level_count: 12 };
    (regions, Heightfield::shape(&noise, SIZE, SIZE, &config))
}

fn build(config: &WorldConfig, regions: &RegionBuffer, heights: &Heightfield) -> World {
    WorldBuilder::new(config, regions, heights, NullSink::new())
        .and_then(WorldBuilder::build)
        .unwrap()
}

fn config() -> WorldConfig {
    WorldConfig { seed: 77, ..WorldConfig::default() }
}

/// Test: bedrock covers y = 0, is visible and cannot be mined.
#[test]
fn test_bedrock_floor() {
    let (regions, heights) = generated_maps();
    let mut world = build(&config(), &regions, &heights);

    for x in 0..SIZE {
        for z in 0..SIZE {
            let pos = GridPos::new(x, 0, z);
            let block = world.grid().get(pos).expect("bedrock missing");
            assert_eq!(block.ore(), OreType::Undestroyed);
            assert!(block.is_visible());
            assert_eq!(world.mine(pos).unwrap(), MineOutcome::Protected);
        }
    }
    let mut bedrock = world.grid().blocks().filter(|(_, b)| b.ore() == OreType::Undestroyed);
    assert!(bedrock.all(|(p, _)| p.y == 0), "bedrock above y = 0");
}

/// Test: every block next to a cave or sky hole is visible.
#[test]
fn test_exposure_after_passes() {
    let config = config();
    let (regions, heights) = generated_maps();
    let world = build(&config, &regions, &heights);
    let grid = world.grid();

    let underground = 1..config.ground_height_offset;
    let sky = config.sky_band_start() - 1..config.max_height;
    for y in underground.chain(sky) {
        for z in 0..SIZE {
            for x in 0..SIZE {
                let pos = GridPos::new(x, y, z);
                if !grid.is_empty_cell(pos) {
                    continue;
                }
                for n in grid.neighbors(pos) {
                    if let Some(block) = grid.get(n) {
                        assert!(block.is_visible(), "{n:?} borders empty {pos:?} but is hidden");
                    }
                }
            }
        }
    }
}

/// Test: caves never remove bedrock, stone or ore veins.
#[test]
fn test_caves_spare_protected_blocks() {
    // Iron everywhere on the map, so tunnels cut through veins.
    let (_, heights) = generated_maps();
    let regions = RegionBuffer::new(SIZE, SIZE, Color::BLUE);

    let carved = WorldConfig { clouds: WalkConfig::clouds().with_count(0), ..config() };
    let solid = WorldConfig { caves: WalkConfig::caves().with_count(0), ..carved.clone() };

    let before = build(&solid, &regions, &heights);
    let after = build(&carved, &regions, &heights);

    assert!(after.grid().block_count() < before.grid().block_count(), "tunnels removed nothing");
    let mut protected = 0;
    for (pos, block) in before.grid().blocks() {
        if block.ore().is_carve_protected() {
            protected += 1;
            assert_eq!(after.grid().get(pos).map(|b| b.ore()), Some(block.ore()), "{pos:?} was carved");
        }
    }
    assert!(protected > SIZE * SIZE, "expected iron veins besides bedrock");
}

/// Test: live render instances match visible blocks through builds and edits.
#[test]
fn test_instances_track_visibility() {
    let (regions, heights) = generated_maps();
    let mut world = build(&config(), &regions, &heights);
    assert_eq!(world.sink().live(), world.grid().visible_count());

    let targets: Vec<GridPos> = world
        .grid()
        .blocks()
        .filter(|(p, b)| b.is_visible() && p.y > 0)
        .map(|(p, _)| p)
        .take(200)
        .collect();
    for pos in targets {
        world.mine(pos).unwrap();
        assert_eq!(world.sink().live(), world.grid().visible_count());
    }
}

/// Test: mining a block exposes nothing above it.
#[test]
fn test_mining_exposes_downward() {
    let (regions, heights) = generated_maps();
    let mut world = build(&config(), &regions, &heights);

    // Column tops inside the map.
    let tops: Vec<GridPos> = (4..SIZE - 4)
        .filter_map(|x| {
            let z = SIZE / 2;
            let band = heights.band(x, z)?;
            Some(GridPos::new(x, band as usize + config().ground_height_offset, z))
        })
        .collect();
    assert!(!tops.is_empty());

    for pos in tops {
        let hidden_above: Vec<GridPos> = world
            .grid()
            .neighbors(pos)
            .filter(|n| n.y >= pos.y && world.grid().get(*n).is_some_and(|b| !b.is_visible()))
            .collect();
        if !matches!(world.mine(pos).unwrap(), MineOutcome::Removed { .. }) {
            continue;
        }
        for n in hidden_above {
            assert!(!world.grid().get(n).unwrap().is_visible(), "{n:?} above {pos:?} was exposed");
        }
        for n in world.grid().neighbors(pos).filter(|n| n.y < pos.y) {
            if let Some(block) = world.grid().get(n) {
                assert!(block.is_visible(), "{n:?} below {pos:?} stayed hidden");
            }
        }
    }
}

/// Test: a fixed seed rebuilds the same world.
#[test]
fn test_seeded_build_is_reproducible() {
    let (regions, heights) = generated_maps();
    let a = build(&config(), &regions, &heights);
    let b = build(&config(), &regions, &heights);

    assert_eq!(a.census(), b.census());
    let blocks_a: Vec<_> = a.grid().blocks().map(|(p, blk)| (p, blk.ore(), blk.is_visible())).collect();
    let blocks_b: Vec<_> = b.grid().blocks().map(|(p, blk)| (p, blk.ore(), blk.is_visible())).collect();
    assert_eq!(blocks_a, blocks_b);
}
