//! Cache configuration.
//!
//! This module defines the configuration used to build a host cache. It provides:
//! 1. **Defaults:** Baseline geometry constants (size, line size, associativity).
//! 2. **Structures:** `CacheConfig`, deserializable from JSON with per-field defaults.
//! 3. **Enums:** The replacement policy selector.
//!
//! Configuration is supplied as JSON (`CacheConfig::from_json` / `CacheConfig::from_file`)
//! or built in code starting from `CacheConfig::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Total cache size in bytes (4 KiB).
    pub const CACHE_SIZE: usize = 4096;

    /// Cache line size in bytes.
    pub const CACHE_LINE: usize = 64;

    /// Associativity (number of ways per set).
    pub const CACHE_WAYS: usize = 4;
}

/// Cache replacement policy selector.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementPolicy {
    /// Least Recently Used among clean lines; dirty lines only when every candidate is dirty.
    ///
    /// Avoids write-backs whenever a write-back-free eviction exists.
    #[default]
    #[serde(alias = "CleanFirstLru", alias = "CleanLru")]
    CleanFirstLru,
    /// Plain Least Recently Used over all candidates, ignoring the dirty bit.
    #[serde(alias = "Lru")]
    Lru,
}

/// Host cache configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    const fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    const fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default cache associativity (number of ways).
    const fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Parses a configuration from a JSON document and validates it.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error described in [`CacheConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`CacheConfig::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks that the geometry describes a real set-associative cache.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ZeroWays`] if `ways == 0`.
    /// * [`ConfigError::InvalidLineSize`] if `line_bytes` is zero or not a power of two.
    /// * [`ConfigError::UnevenSets`] if `size_bytes` does not divide into whole sets.
    /// * [`ConfigError::ZeroSets`] if the geometry yields no sets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::InvalidLineSize(self.line_bytes));
        }
        let set_bytes = self.line_bytes.saturating_mul(self.ways);
        if self.size_bytes % set_bytes != 0 {
            return Err(ConfigError::UnevenSets {
                size_bytes: self.size_bytes,
                set_bytes,
            });
        }
        if self.size_bytes / set_bytes == 0 {
            return Err(ConfigError::ZeroSets);
        }
        Ok(())
    }

    /// Number of sets implied by the geometry.
    ///
    /// Returns zero for a degenerate geometry; see [`CacheConfig::validate`].
    pub const fn num_sets(&self) -> usize {
        match self.size_bytes.checked_div(self.line_bytes.saturating_mul(self.ways)) {
            Some(sets) => sets,
            None => 0,
        }
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// 4 KiB, 64-byte lines, 4-way set-associative, clean-first LRU.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
        }
    }
}
