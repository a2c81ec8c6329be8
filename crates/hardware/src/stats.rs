//! Cache statistics collection and reporting.
//!
//! This module tracks the events a host cache produces while driving a
//! replacement policy. It provides:
//! 1. **Access counts:** Hits, misses, and fills.
//! 2. **Evictions:** Clean evictions and dirty evictions (write-backs).
//! 3. **Maintenance:** Explicit invalidations and flush write-backs.

use std::fmt;

/// Cache event counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Accesses that found the line resident.
    pub hits: u64,
    /// Accesses that did not find the line resident.
    pub misses: u64,
    /// Lines installed into a slot (every miss fills).
    pub fills: u64,
    /// Victims evicted without a write-back.
    pub clean_evictions: u64,
    /// Victims evicted with a write-back.
    pub dirty_evictions: u64,
    /// Lines dropped by explicit invalidation.
    pub invalidations: u64,
    /// Dirty lines written back by `flush`.
    pub flush_writebacks: u64,
}

impl CacheStats {
    /// Total accesses (hits plus misses).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Total evictions forced by fills into full sets.
    pub const fn evictions(&self) -> u64 {
        self.clean_evictions + self.dirty_evictions
    }

    /// Total write-backs, from evictions and flushes.
    pub const fn writebacks(&self) -> u64 {
        self.dirty_evictions + self.flush_writebacks
    }

    /// Fraction of accesses that hit, or `0.0` before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of accesses that missed, or `0.0` before any access.
    pub fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "accesses: {} (hits {}, misses {}, hit rate {:.2}%)",
            self.accesses(),
            self.hits,
            self.misses,
            self.hit_rate() * 100.0
        )?;
        writeln!(
            f,
            "evictions: {} (clean {}, dirty {})",
            self.evictions(),
            self.clean_evictions,
            self.dirty_evictions
        )?;
        write!(
            f,
            "write-backs: {} | invalidations: {}",
            self.writebacks(),
            self.invalidations
        )
    }
}
