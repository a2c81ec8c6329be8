//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the cache line that has not been accessed for the longest
//! time, ignoring whether it is dirty. It shares the timestamp metadata of the
//! clean-first policy and serves as its baseline: the two differ only in whether
//! the dirty bit partitions the candidates.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()` / `reset()` / `invalidate()`: O(1)
//!   - `get_victim()`: O(W) where W is the number of ways
//! - **Space Complexity:** O(S × W), one timestamp per slot
//! - **Best Case:** Sequential/streaming accesses with good temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{Candidate, ReplacementData, ReplacementPolicy};
use crate::common::Tick;

/// LRU policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

impl LruPolicy {
    /// Creates a new LRU policy instance.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "lru"
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

    fn reset(&self, data: &mut ReplacementData, now: Tick) {
        data.last_touch_tick = now;
    }

    /// Identifies the victim line to evict.
    ///
    /// Returns the candidate with the smallest timestamp, first-seen on ties.
    fn get_victim<'c, 'a>(&self, candidates: &'c [Candidate<'a>]) -> &'c Candidate<'a> {
        assert!(
            !candidates.is_empty(),
            "victim selection requires at least one candidate"
        );

        let mut oldest = &candidates[0];
        for candidate in &candidates[1..] {
            if candidate.tick() < oldest.tick() {
                oldest = candidate;
            }
        }
        oldest
    }
}
