//! Write-back aware cache replacement.
//!
//! This crate implements a clean-first LRU replacement policy for set-associative
//! caches, together with a small host cache that drives it:
//! 1. **Policies:** Recency tracking (`touch`, `reset`, `invalidate`) and victim selection
//!    that prefers the least recently used clean line over any dirty line.
//! 2. **Host cache:** Tag/valid/dirty bookkeeping, a slot-indexed metadata arena, and a logical clock.
//! 3. **Configuration:** JSON-deserializable cache geometry and policy selection.
//! 4. **Statistics:** Hit, miss, eviction, and write-back counters.

/// Cache simulator and replacement policies.
pub mod cache;
/// Common types (logical time, errors).
pub mod common;
/// Cache configuration (defaults, geometry, policy selection).
pub mod config;
/// Cache event statistics.
pub mod stats;

/// Host cache type; construct with `CacheSim::new`.
pub use crate::cache::CacheSim;
/// Replacement policy interface and per-slot metadata.
pub use crate::cache::policies::{Candidate, ReplacementData, ReplacementPolicy};
/// Logical timestamp type.
pub use crate::common::Tick;
/// Cache configuration; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::CacheConfig;
