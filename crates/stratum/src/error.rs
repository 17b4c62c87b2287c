//! # Generator Error Types

use std::path::PathBuf;

use stratum_procedural::MapError;
use stratum_world::WorldError;
use thiserror::Error;

/// Errors that can occur while configuring or running the generator.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Map generation or map I/O failed.
    #[error(transparent)]
    Map(#[from] MapError),

    /// World building failed.
    #[error(transparent)]
    World(#[from] WorldError),

    /// The configuration file is not valid TOML for this generator.
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A file could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Result type for generator operations.
pub type GenerateResult<T> = Result<T, GenerateError>;
