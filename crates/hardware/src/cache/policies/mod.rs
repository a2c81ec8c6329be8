//! Cache Replacement Policies.
//!
//! Implements victim selection for set-associative caches driven by per-line
//! recency timestamps.
//!
//! # Policies
//!
//! - `CleanFirstLru`: Least Recently Used among clean lines, falling back to dirty lines.
//! - `Lru`: Least Recently Used over every candidate.
//!
//! # Ownership
//!
//! Policies are stateless. Each cache slot owns one [`ReplacementData`] in an
//! arena held by the host, and the host lends the policy mutable access for
//! tracker updates or shared access through [`Candidate`] views for victim
//! selection. Logical time is always supplied by the caller.

use std::fmt;

use crate::common::Tick;

/// Clean-first Least Recently Used replacement policy.
pub mod clean_lru;

/// Least Recently Used replacement policy.
pub mod lru;

pub use clean_lru::CleanFirstLruPolicy;
pub use lru::LruPolicy;

/// Per-slot recency metadata.
///
/// A slot that was never filled, or was invalidated, carries `Tick::NEVER`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplacementData {
    /// Logical time of the last access or insertion.
    pub last_touch_tick: Tick,
}

impl ReplacementData {
    /// Returns `true` if the slot has not been touched since it was last invalidated.
    #[inline(always)]
    pub const fn is_invalidated(&self) -> bool {
        self.last_touch_tick.is_never()
    }
}

/// A resident line offered for eviction.
///
/// Built fresh by the host for a single [`ReplacementPolicy::get_victim`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Way index of the line within its set.
    pub way: usize,
    /// Whether evicting the line requires a write-back.
    pub dirty: bool,
    /// Recency metadata of the line's slot.
    pub data: &'a ReplacementData,
}

impl<'a> Candidate<'a> {
    /// Creates a candidate view.
    ///
    /// # Arguments
    ///
    /// * `way` - The way index within the set.
    /// * `dirty` - The line's dirty bit.
    /// * `data` - The slot's recency metadata.
    pub const fn new(way: usize, dirty: bool, data: &'a ReplacementData) -> Self {
        Self { way, dirty, data }
    }

    /// Logical time the line was last touched.
    #[inline(always)]
    pub const fn tick(&self) -> Tick {
        self.data.last_touch_tick
    }
}

/// Trait for cache replacement policies.
///
/// Combines the recency tracker (`instantiate_entry`, `invalidate`, `touch`,
/// `reset`) with the victim selector (`get_victim`).
pub trait ReplacementPolicy: Send + Sync + fmt::Debug {
    /// Short policy name for reports.
    fn name(&self) -> &'static str;

    /// Creates metadata for a freshly constructed slot.
    ///
    /// The entry starts at `Tick::NEVER`; hosts call `reset` on fill.
    fn instantiate_entry(&self) -> ReplacementData;

    /// Marks a slot as invalidated.
    ///
    /// # Arguments
    ///
    /// * `data` - The slot's metadata.
    fn invalidate(&self, data: &mut ReplacementData);

    /// Records a hit on a resident line.
    ///
    /// # Arguments
    ///
    /// * `data` - The slot's metadata.
    /// * `now` - Current logical time from the host clock.
    fn touch(&self, data: &mut ReplacementData, now: Tick);

    /// Records that a new line was just inserted into the slot.
    ///
    /// # Arguments
    ///
    /// * `data` - The slot's metadata.
    /// * `now` - Current logical time from the host clock.
    fn reset(&self, data: &mut ReplacementData, now: Tick);

    /// Selects the line to evict.
    ///
    /// # Arguments
    ///
    /// * `candidates` - Every resident line of the full set, in way order.
    ///
    /// # Returns
    ///
    /// A reference to exactly one element of `candidates`.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty.
    fn get_victim<'c, 'a>(&self, candidates: &'c [Candidate<'a>]) -> &'c Candidate<'a>;
}
