//! # STRATUM
//!
//! Procedural voxel world generator. Loads a [`GeneratorConfig`], produces
//! the region map and heightfield, and builds the block world from them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use stratum::{generate_maps, generate_world, GeneratorConfig};
//! use stratum_world::NullSink;
//!
//! let config = GeneratorConfig::from_toml_str(include_str!("../../../config/default.toml"))?;
//! let maps = generate_maps(&config);
//! let world = generate_world(&config, &maps, NullSink::new())?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::GeneratorConfig;
pub use error::{GenerateError, GenerateResult};
pub use pipeline::{generate_maps, generate_world, Maps, HEIGHT_MAP_FILE, REGION_MAP_FILE};
