//! # STRATUM Procedural Maps
//!
//! The two 2D inputs of world generation:
//!
//! - a **region map**: Voronoi cells rasterized into a color buffer, one
//!   palette color per cell, with centroid markers and black cell edges
//! - a **heightfield**: radially masked Perlin FBm, quantized into a fixed
//!   number of elevation bands
//!
//! ## Design Principles
//!
//! 1. **Seeded**: same config and seeds give the same maps
//! 2. **Row-major**: every buffer is indexed `y * width + x`
//! 3. **Pluggable**: geometry and noise sit behind traits
//!
//! ## Example
//!
//! ```rust,ignore
//! use stratum_procedural::{
//!     rasterize_regions, scatter_seed_points, FractalPerlin, GeometryProvider, HalfPlaneVoronoi,
//!     HeightConfig, Heightfield, MapConfig, Rect, Seed,
//! };
//!
//! let config = MapConfig::default();
//! let mut rng = Seed::new(7).derive(Seed::PURPOSE_SEED_POINTS).rng();
//! let points = scatter_seed_points(&mut rng, config.node_count, config.width, config.height);
//! let diagram = HalfPlaneVoronoi.generate(&points, Rect::from_size(config.width, config.height), 2);
//! let regions = rasterize_regions(&diagram, &config.colors);
//!
//! let noise = FractalPerlin::new(0.05, 3, 1234);
//! let heights = Heightfield::shape(&noise, config.width, config.height, &HeightConfig::default());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod heightfield;
pub mod noise;
pub mod raster;
pub mod seed;

pub use color::Color;
pub use config::{ColorConfig, HeightConfig, MapConfig, NoiseConfig, MAX_FLOOR_LEVELS, MIN_FLOOR_LEVELS};
pub use error::{MapError, MapResult};
pub use export::{load_heightfield, load_region_map, save_heightfield, save_region_map};
pub use geometry::{
    scatter_seed_points, Edge, GeometryProvider, HalfPlaneVoronoi, Point, Rect, Site, VoronoiDiagram,
};
pub use heightfield::{quantize, radial_mask, Heightfield};
pub use noise::{resolve_noise_seed, ConstantNoise, FractalPerlin, NoiseSource};
pub use raster::{rasterize_regions, RegionBuffer};
pub use seed::Seed;
