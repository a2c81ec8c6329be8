//! Error definitions.
//!
//! Victim selection has no recoverable failure mode: an empty candidate set is a
//! contract violation and panics. The only fallible surface is building a cache
//! from configuration, which is reported through [`ConfigError`].

use std::io;

use thiserror::Error;

/// Errors raised while loading or validating a cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Associativity must be at least one way.
    #[error("cache must have at least one way")]
    ZeroWays,

    /// Line size must be a non-zero power of two.
    #[error("line size {0} bytes is not a non-zero power of two")]
    InvalidLineSize(usize),

    /// Total size must split evenly into sets of `line_bytes * ways`.
    #[error("cache size {size_bytes} bytes is not a multiple of {set_bytes} bytes per set")]
    UnevenSets {
        /// Configured total size in bytes.
        size_bytes: usize,
        /// Bytes covered by one set (`line_bytes * ways`).
        set_bytes: usize,
    },

    /// Geometry leaves no sets at all.
    #[error("cache geometry yields zero sets")]
    ZeroSets,

    /// The configuration document could not be parsed.
    #[error("invalid cache configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read cache configuration: {0}")]
    Io(#[from] io::Error),
}
