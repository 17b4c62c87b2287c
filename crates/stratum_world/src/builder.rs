//! # World Builder
//!
//! Builds a [`World`] from a region map and a heightfield in strictly
//! sequential stages:
//!
//! | Stage           | Unit of work per `step()`              |
//! |-----------------|----------------------------------------|
//! | `Terrain`       | one x-row of columns                   |
//! | `Caves`         | one tunnel                             |
//! | `CaveExposure`  | the whole underground sweep            |
//! | `Clouds`        | one cluster                            |
//! | `CloudExposure` | the whole sky sweep                    |
//!
//! Callers that want to spread generation over frames call `step()` once
//! per frame; everyone else calls `build()`. The world is only handed out
//! once every stage is done.
//!
//! ## Columns
//!
//! A column whose height value is below the full band gets its top block at
//! `band + ground_height_offset` (visible) and hidden blocks below it down to
//! bedrock. Full-band columns hold only bedrock.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use stratum_procedural::{Heightfield, RegionBuffer, Seed};

use crate::biome::Biome;
use crate::block::OreType;
use crate::carve::{carve_hole, empty_cells, expose_region, Region, Walker};
use crate::config::{WalkConfig, WorldConfig, CAVE_START_DEPTH, CAVE_WALK_DEPTH, SKY_BAND_GAP};
use crate::error::{WorldError, WorldResult};
use crate::grid::GridPos;
use crate::ore::OrePicker;
use crate::render::InstanceSink;
use crate::world::World;

/// Build stages, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildStage {
    /// Column placement.
    Terrain,
    /// Cave tunnels.
    Caves,
    /// Exposure of cave walls.
    CaveExposure,
    /// Cloud clusters.
    Clouds,
    /// Exposure of cloud surfaces.
    CloudExposure,
    /// Finished.
    Done,
}

/// Counters collected while building.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Columns that received terrain.
    pub columns: usize,
    /// Full-band columns left at bedrock.
    pub full_columns: usize,
    /// Blocks created by the terrain stage.
    pub terrain_blocks: usize,
    /// Tunnels carved.
    pub tunnels: usize,
    /// Blocks removed by tunnels.
    pub carved_blocks: usize,
    /// Blocks exposed around caves.
    pub cave_exposed: usize,
    /// Cloud clusters placed.
    pub clusters: usize,
    /// Blocks created by clusters.
    pub cloud_blocks: usize,
    /// Blocks exposed around clouds.
    pub cloud_exposed: usize,
}

/// Staged world builder.
pub struct WorldBuilder<'a, S: InstanceSink> {
    config: &'a WorldConfig,
    regions: &'a RegionBuffer,
    heights: &'a Heightfield,
    picker: OrePicker,
    world: World<S>,
    ore_rng: ChaCha8Rng,
    walk_rng: ChaCha8Rng,
    stage: BuildStage,
    cursor: usize,
    stats: BuildStats,
}

impl<'a, S: InstanceSink> WorldBuilder<'a, S> {
    /// Prepares a build.
    ///
    /// # Errors
    ///
    /// - [`WorldError::InvalidConfig`] if the config is invalid or the map
    ///   is too small for the carving kernels, or the heightfield has more
    ///   bands than fit under the sky band
    /// - [`WorldError::DimensionMismatch`] if the region map and heightfield
    ///   differ in size
    pub fn new(config: &'a WorldConfig, regions: &'a RegionBuffer, heights: &'a Heightfield, sink: S) -> WorldResult<Self> {
        config.validate()?;
        if regions.width() != heights.width() || regions.height() != heights.height() {
            return Err(WorldError::DimensionMismatch {
                regions_width: regions.width(),
                regions_height: regions.height(),
                heights_width: heights.width(),
                heights_height: heights.height(),
            });
        }
        let (width, depth) = (heights.width(), heights.height());
        let hole = config.caves.hole_size.max(config.clouds.hole_size);
        if width <= 2 * hole || depth <= 2 * hole {
            return Err(WorldError::InvalidConfig(format!(
                "{width}x{depth} map is too small for hole_size {hole}"
            )));
        }

        if heights.floor_level_count() as usize > SKY_BAND_GAP {
            return Err(WorldError::InvalidConfig(format!(
                "{} floor levels would push columns into the sky band",
                heights.floor_level_count()
            )));
        }

        let seed = Seed::new(config.seed).or_random();
        tracing::info!(seed = seed.value(), width, depth, height = config.max_height, "starting world build");

        Ok(Self {
            config,
            regions,
            heights,
            picker: OrePicker::new(config),
            world: World::new(width, config.max_height, depth, seed, sink),
            ore_rng: seed.derive(Seed::PURPOSE_ORES).rng(),
            walk_rng: seed.derive(Seed::PURPOSE_WALKS).rng(),
            stage: BuildStage::Terrain,
            cursor: 0,
            stats: BuildStats::default(),
        })
    }

    /// Stage the next `step()` will work on.
    #[inline]
    #[must_use]
    pub const fn stage(&self) -> BuildStage {
        self.stage
    }

    /// Counters so far.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Does one unit of work and returns the stage that comes next.
    pub fn step(&mut self) -> BuildStage {
        match self.stage {
            BuildStage::Terrain => {
                self.terrain_row(self.cursor);
                self.advance(self.heights.width(), BuildStage::Caves);
            }
            BuildStage::Caves => {
                if self.cursor < self.config.caves.count as usize {
                    self.tunnel();
                }
                self.advance(self.config.caves.count as usize, BuildStage::CaveExposure);
            }
            BuildStage::CaveExposure => {
                let region = self.cave_exposure_region();
                self.stats.cave_exposed = expose_region(&mut self.world, &region);
                tracing::info!(exposed = self.stats.cave_exposed, "exposed cave walls");
                self.enter(BuildStage::Clouds);
            }
            BuildStage::Clouds => {
                if self.cursor < self.config.clouds.count as usize {
                    self.cluster();
                }
                self.advance(self.config.clouds.count as usize, BuildStage::CloudExposure);
            }
            BuildStage::CloudExposure => {
                let region = self.cloud_exposure_region();
                self.stats.cloud_exposed = expose_region(&mut self.world, &region);
                tracing::info!(exposed = self.stats.cloud_exposed, "exposed cloud surfaces");
                self.enter(BuildStage::Done);
            }
            BuildStage::Done => {}
        }
        self.stage
    }

    /// Runs every remaining stage and returns the world.
    ///
    /// # Errors
    ///
    /// Never fails once `new` succeeded; the result mirrors [`Self::finish`].
    pub fn build(mut self) -> WorldResult<World<S>> {
        while self.step() != BuildStage::Done {}
        self.finish()
    }

    /// Hands out the finished world.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Incomplete`] if any stage is still pending.
    pub fn finish(self) -> WorldResult<World<S>> {
        if self.stage != BuildStage::Done {
            return Err(WorldError::Incomplete(self.stage));
        }
        let stats = self.stats;
        tracing::info!(
            blocks = self.world.grid().block_count(),
            visible = self.world.grid().visible_count(),
            tunnels = stats.tunnels,
            clusters = stats.clusters,
            "world build complete"
        );
        Ok(self.world)
    }

    /// Moves the cursor on, switching to `next` after `units` units.
    fn advance(&mut self, units: usize, next: BuildStage) {
        self.cursor += 1;
        if self.cursor >= units {
            self.enter(next);
        }
    }

    fn enter(&mut self, next: BuildStage) {
        match self.stage {
            BuildStage::Terrain => tracing::info!(
                columns = self.stats.columns,
                full_columns = self.stats.full_columns,
                blocks = self.stats.terrain_blocks,
                "terrain placed"
            ),
            BuildStage::Caves => tracing::info!(
                tunnels = self.stats.tunnels,
                carved = self.stats.carved_blocks,
                "caves carved"
            ),
            BuildStage::Clouds => tracing::info!(
                clusters = self.stats.clusters,
                blocks = self.stats.cloud_blocks,
                "clouds placed"
            ),
            _ => {}
        }
        self.stage = next;
        self.cursor = 0;
    }

    fn terrain_row(&mut self, x: usize) {
        for z in 0..self.heights.height() {
            let bedrock = self.world.create_block(GridPos::new(x, 0, z), OreType::Undestroyed, true);
            self.stats.terrain_blocks += usize::from(bedrock);

            let Some(band) = self.heights.band(x, z) else {
                self.stats.full_columns += 1;
                continue;
            };
            let biome = self
                .regions
                .get(x, z)
                .map_or(Biome::Soil, |color| self.config.sentinels.classify(color));
            let top = band as usize + self.config.ground_height_offset;

            for y in (1..=top).rev() {
                let ore = self.picker.pick(y, biome, &mut self.ore_rng);
                if self.world.create_block(GridPos::new(x, y, z), ore, y == top) {
                    self.stats.terrain_blocks += 1;
                }
            }
            self.stats.columns += 1;
        }
    }

    fn walk_length(rng: &mut ChaCha8Rng, walk: &WalkConfig) -> usize {
        let extra = if walk.size_offset > 0 { rng.gen_range(0..walk.size_offset) } else { 0 };
        walk.size.saturating_add(extra) as usize
    }

    fn cave_bounds(&self) -> (Region, Region) {
        let hole = self.config.caves.hole_size;
        let offset = self.config.ground_height_offset;
        let (width, depth) = (self.heights.width(), self.heights.height());
        let start = Region {
            x: hole..width - hole,
            y: hole..offset - hole - CAVE_START_DEPTH,
            z: hole..depth - hole,
        };
        let walk = Region { y: hole..offset - hole - CAVE_WALK_DEPTH, ..start.clone() };
        (start, walk)
    }

    fn tunnel(&mut self) {
        let hole = self.config.caves.hole_size;
        let length = Self::walk_length(&mut self.walk_rng, &self.config.caves);
        let (start, bounds) = self.cave_bounds();

        let mut walker = Walker::spawn(&mut self.walk_rng, &start);
        let origin = walker.position();
        let mut carved = 0;
        for _ in 0..length {
            carved += carve_hole(&mut self.world, walker.position(), hole);
            walker.step(&mut self.walk_rng, &bounds);
        }

        self.stats.tunnels += 1;
        self.stats.carved_blocks += carved;
        tracing::debug!(tunnel = self.cursor, ?origin, length, carved, "carved tunnel");
    }

    fn cloud_bounds(&self) -> Region {
        let hole = self.config.clouds.hole_size;
        Region {
            x: hole..self.heights.width() - hole,
            y: self.config.sky_band_start() + hole..self.config.max_height - hole,
            z: hole..self.heights.height() - hole,
        }
    }

    fn cluster(&mut self) {
        let hole = self.config.clouds.hole_size;
        let length = Self::walk_length(&mut self.walk_rng, &self.config.clouds);
        let bounds = self.cloud_bounds();

        let mut walker = Walker::spawn(&mut self.walk_rng, &bounds);
        let origin = walker.position();
        let mut placed = 0;
        for _ in 0..length {
            for pos in empty_cells(self.world.grid(), walker.position(), hole) {
                let ore = self.picker.pick(pos.y, Biome::Soil, &mut self.ore_rng);
                if self.world.create_block(pos, ore, false) {
                    placed += 1;
                }
            }
            walker.step(&mut self.walk_rng, &bounds);
        }

        self.stats.clusters += 1;
        self.stats.cloud_blocks += placed;
        tracing::debug!(cluster = self.cursor, ?origin, length, placed, "placed cloud cluster");
    }

    /// Everything between bedrock and the ground offset.
    fn cave_exposure_region(&self) -> Region {
        Region {
            x: 0..self.heights.width(),
            y: 1..self.config.ground_height_offset,
            z: 0..self.heights.height(),
        }
    }

    /// The sky band plus the layer just under it.
    fn cloud_exposure_region(&self) -> Region {
        Region {
            x: 0..self.heights.width(),
            y: self.config.sky_band_start() - 1..self.config.max_height,
            z: 0..self.heights.height(),
        }
    }
}
