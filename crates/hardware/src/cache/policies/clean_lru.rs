//! Clean-First Least Recently Used Replacement Policy.
//!
//! This policy evicts the least recently used *clean* line of a set. Dirty lines
//! are only considered when every candidate is dirty, in which case the least
//! recently used dirty line is evicted. A clean line is chosen over a dirty one
//! regardless of their relative recency, so a write-back is only ever paid when
//! no write-back-free eviction exists.
//!
//! Each slot carries a single timestamp (`last_touch_tick`). Hits and fills stamp
//! it with the current logical time, and invalidation resets it to `Tick::NEVER`,
//! which makes the slot the oldest member of its partition.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()` / `reset()` / `invalidate()`: O(1)
//!   - `get_victim()`: O(W) where W is the number of ways (single pass)
//! - **Space Complexity:** O(S × W), one timestamp per slot
//! - **Best Case:** Write-heavy workloads where avoiding write-backs dominates miss cost
//! - **Worst Case:** A hot clean working set sharing a set with cold dirty lines;
//!   the clean lines are evicted while the dirty lines linger

use super::{Candidate, ReplacementData, ReplacementPolicy};
use crate::common::Tick;

/// Clean-first LRU policy.
///
/// Stateless: all recency state lives in the host-owned [`ReplacementData`] arena.
#[derive(Clone, Copy, Debug, Default)]
pub struct CleanFirstLruPolicy;

impl CleanFirstLruPolicy {
    /// Creates a new clean-first LRU policy instance.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for CleanFirstLruPolicy {
    fn name(&self) -> &'static str {
        "clean_first_lru"
    }

    fn instantiate_entry(&self) -> ReplacementData {
        ReplacementData::default()
    }

    fn invalidate(&self, data: &mut ReplacementData) {
        data.last_touch_tick = Tick::NEVER;
    }

    fn touch(&self, data: &mut ReplacementData, now: Tick) {
        data.last_touch_tick = now;
    }

    /// Stamps a newly inserted line. Insertion and access are both "now".
    fn reset(&self, data: &mut ReplacementData, now: Tick) {
        data.last_touch_tick = now;
    }

    /// Identifies the victim line to evict.
    ///
    /// Partitions the candidates by dirty bit in a single pass, tracking the
    /// oldest member of each partition. Ties keep the first-seen candidate.
    fn get_victim<'c, 'a>(&self, candidates: &'c [Candidate<'a>]) -> &'c Candidate<'a> {
        assert!(
            !candidates.is_empty(),
            "victim selection requires at least one candidate"
        );

        let mut oldest_clean: Option<&'c Candidate<'a>> = None;
        let mut oldest_dirty: Option<&'c Candidate<'a>> = None;

        for candidate in candidates {
            let slot = if candidate.dirty {
                &mut oldest_dirty
            } else {
                &mut oldest_clean
            };
            if slot.is_none_or(|current| candidate.tick() < current.tick()) {
                *slot = Some(candidate);
            }
        }

        match (oldest_clean, oldest_dirty) {
            (Some(clean), _) => clean,
            (None, Some(dirty)) => dirty,
            (None, None) => unreachable!("non-empty candidate set has no oldest line"),
        }
    }
}
