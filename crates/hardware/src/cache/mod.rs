//! Set-Associative Cache Simulator.
//!
//! This module implements the host side of the replacement interface: a
//! set-associative cache that keeps tag, valid, and dirty bits per slot, owns the
//! slot-indexed [`ReplacementData`] arena, and drives a [`ReplacementPolicy`] at
//! each touch point:
//!
//! - construction: `instantiate_entry` once per slot
//! - hit: `touch`
//! - fill: `reset`
//! - full set on miss: `get_victim`
//! - explicit invalidation or flush: `invalidate`
//!
//! Timing is not modeled. Write-backs are counted in [`CacheStats`] and reported
//! per access, never charged as latency.

/// Cache replacement policy implementations (clean-first LRU, LRU).
pub mod policies;

use tracing::{debug, trace};

use self::policies::{
    Candidate, CleanFirstLruPolicy, LruPolicy, ReplacementData, ReplacementPolicy,
};
use crate::common::{ConfigError, LogicalClock, Tick};
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType};
use crate::stats::CacheStats;

/// Cache line entry containing tag, validity, and dirty bits.
#[derive(Clone, Copy, Debug, Default)]
struct CacheLine {
    tag: u64,
    valid: bool,
    dirty: bool,
}

/// A line removed from the cache to make room for a fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eviction {
    /// Line-aligned address of the evicted line.
    pub addr: u64,
    /// Way the line occupied.
    pub way: usize,
    /// Whether the eviction required a write-back.
    pub dirty: bool,
}

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Whether the line was resident.
    pub hit: bool,
    /// Set the address maps to.
    pub set: usize,
    /// Way holding the line after the access.
    pub way: usize,
    /// Line displaced by the fill, if the set was full.
    pub evicted: Option<Eviction>,
}

impl AccessOutcome {
    /// Returns the address written back by this access, if any.
    pub fn writeback(&self) -> Option<u64> {
        self.evicted.filter(|e| e.dirty).map(|e| e.addr)
    }
}

/// Cache simulator implementing a set-associative cache with a pluggable replacement policy.
pub struct CacheSim {
    lines: Vec<CacheLine>,
    repl: Vec<ReplacementData>,
    num_sets: usize,
    ways: usize,
    line_bytes: usize,
    policy: Box<dyn ReplacementPolicy>,
    clock: LogicalClock,
    stats: CacheStats,
}

impl std::fmt::Debug for CacheSim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheSim")
            .field("num_sets", &self.num_sets)
            .field("ways", &self.ways)
            .field("line_bytes", &self.line_bytes)
            .field("policy", &self.policy.name())
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}

impl CacheSim {
    /// Creates a new cache simulator with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache configuration specifying size, associativity,
    ///   line size, and replacement policy
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is invalid.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let policy: Box<dyn ReplacementPolicy> = match config.policy {
            PolicyType::CleanFirstLru => Box::new(CleanFirstLruPolicy::new()),
            PolicyType::Lru => Box::new(LruPolicy::new()),
        };
        Self::with_policy(config, policy)
    }

    /// Creates a cache simulator driving a caller-supplied policy.
    ///
    /// The `policy` field of `config` is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is invalid.
    pub fn with_policy(
        config: &CacheConfig,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let num_sets = config.num_sets();
        let slots = num_sets * config.ways;
        let repl: Vec<ReplacementData> = (0..slots).map(|_| policy.instantiate_entry()).collect();

        debug!(
            sets = num_sets,
            ways = config.ways,
            line_bytes = config.line_bytes,
            policy = policy.name(),
            "cache constructed"
        );

        Ok(Self {
            lines: vec![CacheLine::default(); slots],
            repl,
            num_sets,
            ways: config.ways,
            line_bytes: config.line_bytes,
            policy,
            clock: LogicalClock::new(),
            stats: CacheStats::default(),
        })
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> usize {
        self.line_bytes
    }

    /// Name of the replacement policy in use.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Current logical time.
    pub const fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Accumulated event counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Clears the event counters. Cache contents and the clock are untouched.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Splits an address into its set index and tag.
    fn locate(&self, addr: u64) -> (usize, u64) {
        let line = addr / self.line_bytes as u64;
        let set = (line % self.num_sets as u64) as usize;
        let tag = line / self.num_sets as u64;
        (set, tag)
    }

    /// Rebuilds the line-aligned address of a resident line.
    const fn line_addr(&self, set: usize, tag: u64) -> u64 {
        (tag * self.num_sets as u64 + set as u64) * self.line_bytes as u64
    }

    /// Finds the way holding `tag` in `set`.
    fn find(&self, set: usize, tag: u64) -> Option<usize> {
        let base = set * self.ways;
        self.lines[base..base + self.ways]
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Checks if the cache contains the specified address.
    pub fn contains(&self, addr: u64) -> bool {
        let (set, tag) = self.locate(addr);
        self.find(set, tag).is_some()
    }

    /// Returns the dirty bit of a resident line, or `None` if it is not cached.
    pub fn is_dirty(&self, addr: u64) -> Option<bool> {
        let (set, tag) = self.locate(addr);
        self.find(set, tag)
            .map(|way| self.lines[set * self.ways + way].dirty)
    }

    /// Returns the recency metadata of a slot.
    ///
    /// # Returns
    ///
    /// `None` if `set` or `way` is out of range.
    pub fn replacement_data(&self, set: usize, way: usize) -> Option<&ReplacementData> {
        if set >= self.num_sets || way >= self.ways {
            return None;
        }
        self.repl.get(set * self.ways + way)
    }

    /// Asks the policy which way it would evict from a full set.
    ///
    /// Nothing is modified.
    ///
    /// # Returns
    ///
    /// `None` if `set` is out of range or still has an invalid way (a fill
    /// would use that way without consulting the policy).
    pub fn victim_for(&self, set: usize) -> Option<usize> {
        if set >= self.num_sets {
            return None;
        }
        let base = set * self.ways;
        if self.lines[base..base + self.ways].iter().any(|line| !line.valid) {
            return None;
        }
        Some(self.select_victim(set))
    }

    /// Builds the candidate list for a full set and runs victim selection.
    fn select_victim(&self, set: usize) -> usize {
        let base = set * self.ways;
        let end = base + self.ways;
        let candidates: Vec<Candidate<'_>> = self.lines[base..end]
            .iter()
            .zip(&self.repl[base..end])
            .enumerate()
            .map(|(way, (line, data))| Candidate::new(way, line.dirty, data))
            .collect();
        self.policy.get_victim(&candidates).way
    }

    /// Installs a line into `set`, evicting if the set is full.
    ///
    /// An invalid way is filled first (lowest index); the policy is only
    /// consulted when every way holds a valid line.
    fn install_line(
        &mut self,
        set: usize,
        tag: u64,
        dirty: bool,
        now: Tick,
    ) -> (usize, Option<Eviction>) {
        let base = set * self.ways;
        let free = self.lines[base..base + self.ways]
            .iter()
            .position(|line| !line.valid);

        let (way, evicted) = match free {
            Some(way) => (way, None),
            None => {
                let way = self.select_victim(set);
                let victim = self.lines[base + way];
                let eviction = Eviction {
                    addr: self.line_addr(set, victim.tag),
                    way,
                    dirty: victim.dirty,
                };
                if victim.dirty {
                    self.stats.dirty_evictions += 1;
                } else {
                    self.stats.clean_evictions += 1;
                }
                trace!(
                    set,
                    way,
                    addr = eviction.addr,
                    dirty = victim.dirty,
                    last_touch = %self.repl[base + way].last_touch_tick,
                    "victim selected"
                );
                (way, Some(eviction))
            }
        };

        let idx = base + way;
        self.lines[idx] = CacheLine {
            tag,
            valid: true,
            dirty,
        };
        self.policy.reset(&mut self.repl[idx], now);
        self.stats.fills += 1;
        trace!(set, way, tag, dirty, %now, "line filled");

        (way, evicted)
    }

    /// Accesses the cache for the specified address.
    ///
    /// Advances the logical clock, then either touches the resident line (a
    /// write also sets its dirty bit) or fills it, evicting a victim chosen by
    /// the replacement policy if the set is full.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address to access
    /// * `is_write` - Whether this is a write operation
    pub fn access(&mut self, addr: u64, is_write: bool) -> AccessOutcome {
        let now = self.clock.advance();
        let (set, tag) = self.locate(addr);

        if let Some(way) = self.find(set, tag) {
            let idx = set * self.ways + way;
            self.policy.touch(&mut self.repl[idx], now);
            if is_write {
                self.lines[idx].dirty = true;
            }
            self.stats.hits += 1;
            return AccessOutcome {
                hit: true,
                set,
                way,
                evicted: None,
            };
        }

        self.stats.misses += 1;
        let (way, evicted) = self.install_line(set, tag, is_write, now);
        AccessOutcome {
            hit: false,
            set,
            way,
            evicted,
        }
    }

    /// Drops the line holding `addr` without writing it back.
    ///
    /// # Returns
    ///
    /// `true` if a resident line was invalidated.
    pub fn invalidate(&mut self, addr: u64) -> bool {
        let (set, tag) = self.locate(addr);
        let Some(way) = self.find(set, tag) else {
            return false;
        };
        let idx = set * self.ways + way;
        self.lines[idx].valid = false;
        self.lines[idx].dirty = false;
        self.policy.invalidate(&mut self.repl[idx]);
        self.stats.invalidations += 1;
        trace!(set, way, addr, "line invalidated");
        true
    }

    /// Writes back every dirty line and invalidates every valid line.
    ///
    /// # Returns
    ///
    /// The number of write-backs performed.
    pub fn flush(&mut self) -> u64 {
        let mut writebacks = 0;
        for (line, data) in self.lines.iter_mut().zip(self.repl.iter_mut()) {
            if !line.valid {
                continue;
            }
            if line.dirty {
                writebacks += 1;
            }
            *line = CacheLine::default();
            self.policy.invalidate(data);
        }
        self.stats.flush_writebacks += writebacks;
        trace!(writebacks, "cache flushed");
        writebacks
    }
}
