//! # STRATUM World
//!
//! Builds a layered voxel world from the two 2D maps of
//! `stratum_procedural`, then lets a player mine and place single blocks.
//!
//! ## Invariants
//!
//! 1. **Bedrock**: every cell at `y = 0` is visible bedrock and cannot be mined
//! 2. **No retyping**: a block is only ever created in an empty cell or cleared
//! 3. **Carve protection**: caves never clear bedrock, stone or ore veins
//! 4. **Exposure**: after each carving pass, every block next to an empty
//!    cell of that pass's region is visible
//! 5. **Instances**: a block is visible exactly when it owns a render instance
//!
//! ## Example
//!
//! ```rust,ignore
//! use stratum_world::{GridPos, NullSink, WorldBuilder, WorldConfig};
//!
//! let config = WorldConfig::default();
//! let mut world = WorldBuilder::new(&config, &regions, &heights, NullSink::new())?.build()?;
//! world.mine(GridPos::new(10, 35, 10))?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod biome;
pub mod block;
pub mod builder;
pub mod carve;
pub mod config;
pub mod error;
pub mod grid;
pub mod mutator;
pub mod ore;
pub mod render;
pub mod world;

pub use biome::{Biome, OreSentinels};
pub use block::{Block, InstanceHandle, OreType};
pub use builder::{BuildStage, BuildStats, WorldBuilder};
pub use carve::{Region, Walker};
pub use config::{OreRatios, StrataConfig, WalkConfig, WorldConfig, SKY_BAND_GAP};
pub use error::{WorldError, WorldResult};
pub use grid::{GridPos, WorldGrid};
pub use mutator::{MineOutcome, PlaceOutcome};
pub use ore::{OrePicker, OreTable, Strata};
pub use render::{InstanceSink, NullSink};
pub use world::World;
