//! # Generation Pipeline
//!
//! ```text
//! map.seed   -> seed points -> Voronoi -> rasterizer -> region map
//! noise.seed -> Perlin FBm  -> shaper                -> heightfield
//! {region map, heightfield} -> world builder         -> World
//! ```

use std::path::Path;

use stratum_procedural::{
    load_heightfield, load_region_map, rasterize_regions, save_heightfield, save_region_map, scatter_seed_points,
    FractalPerlin, GeometryProvider, HalfPlaneVoronoi, Heightfield, Rect, RegionBuffer, Seed,
};
use stratum_world::{InstanceSink, World, WorldBuilder};

use crate::config::GeneratorConfig;
use crate::error::GenerateResult;

/// File name of the saved region map.
pub const REGION_MAP_FILE: &str = "biome.png";
/// File name of the saved heightfield.
pub const HEIGHT_MAP_FILE: &str = "height.png";

/// The two 2D source maps of a world.
#[derive(Clone, Debug, PartialEq)]
pub struct Maps {
    /// Biome region map.
    pub regions: RegionBuffer,
    /// Quantized heightfield.
    pub heights: Heightfield,
    /// Seed the seed points were drawn from.
    pub map_seed: Seed,
    /// Noise seed in use.
    pub noise_seed: i32,
}

impl Maps {
    /// Writes both maps into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an image error if either file cannot be written.
    pub fn save(&self, dir: &Path) -> GenerateResult<()> {
        save_region_map(&self.regions, &dir.join(REGION_MAP_FILE))?;
        save_heightfield(&self.heights, &dir.join(HEIGHT_MAP_FILE))?;
        Ok(())
    }

    /// Reads both maps back from `dir`.
    ///
    /// Seeds are not stored in the images and come back as zero.
    ///
    /// # Errors
    ///
    /// Returns an image error if either file cannot be read.
    pub fn load(dir: &Path, floor_level_count: u32) -> GenerateResult<Self> {
        Ok(Self {
            regions: load_region_map(&dir.join(REGION_MAP_FILE))?,
            heights: load_heightfield(&dir.join(HEIGHT_MAP_FILE), floor_level_count)?,
            map_seed: Seed::new(0),
            noise_seed: 0,
        })
    }
}

/// Generates the region map and heightfield.
#[must_use]
pub fn generate_maps(config: &GeneratorConfig) -> Maps {
    let map = &config.map;
    let map_seed = Seed::new(map.seed).or_random();

    let mut rng = map_seed.derive(Seed::PURPOSE_SEED_POINTS).rng();
    let points = scatter_seed_points(&mut rng, map.node_count, map.width, map.height);
    let diagram = HalfPlaneVoronoi.generate(&points, Rect::from_size(map.width, map.height), map.relax_iterations);
    let regions = rasterize_regions(&diagram, &map.colors);

    let noise = FractalPerlin::from_config(&config.noise, &mut rand::thread_rng());
    let heights = Heightfield::shape(&noise, map.width, map.height, &config.height);

    tracing::info!(map_seed = map_seed.value(), noise_seed = noise.seed(), "generated source maps");
    Maps { regions, heights, map_seed, noise_seed: noise.seed() }
}

/// Builds the voxel world from generated maps.
///
/// # Errors
///
/// Returns a world error if the maps and world config do not fit together.
pub fn generate_world<S: InstanceSink>(config: &GeneratorConfig, maps: &Maps, sink: S) -> GenerateResult<World<S>> {
    let world = WorldBuilder::new(&config.world, &maps.regions, &maps.heights, sink)?.build()?;
    Ok(world)
}
