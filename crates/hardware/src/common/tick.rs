//! Logical time.
//!
//! This module defines the timestamp type used to order cache line accesses. It provides:
//! 1. **Type Safety:** A `Tick` newtype so logical time cannot be mixed up with addresses or counts.
//! 2. **Sentinels:** `Tick::NEVER` for invalidated lines and `Tick::MAX` as the far-future bound.
//! 3. **Clock:** A host-owned monotonic `LogicalClock` whose values are always newer than `NEVER`.

use std::fmt;

/// A point in simulated logical time.
///
/// Ticks only carry ordering. They say nothing about wall-clock duration or cycle counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(pub u64);

impl Tick {
    /// The "never touched since last invalidation" sentinel.
    pub const NEVER: Self = Self(0);

    /// The largest representable tick, later than any real access.
    pub const MAX: Self = Self(u64::MAX);

    /// Creates a tick from a raw counter value.
    ///
    /// # Arguments
    ///
    /// * `val` - The raw 64-bit counter value.
    #[inline(always)]
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    /// Returns the raw 64-bit counter value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is the `NEVER` sentinel.
    #[inline(always)]
    pub const fn is_never(self) -> bool {
        self.0 == Self::NEVER.0
    }

    /// Returns the following tick, saturating at `Tick::MAX`.
    #[inline(always)]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<u64> for Tick {
    fn from(val: u64) -> Self {
        Self(val)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_never() {
            write!(f, "never")
        } else {
            write!(f, "@{}", self.0)
        }
    }
}

/// Monotonic logical clock owned by the host cache controller.
///
/// Starts at tick 1 so that no real access ever collides with `Tick::NEVER`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalClock {
    now: Tick,
}

impl LogicalClock {
    /// Creates a clock positioned at the first valid tick.
    pub const fn new() -> Self {
        Self { now: Tick(1) }
    }

    /// Returns the current tick without advancing.
    #[inline(always)]
    pub const fn now(&self) -> Tick {
        self.now
    }

    /// Advances the clock by one tick and returns the new value.
    pub const fn advance(&mut self) -> Tick {
        self.now = self.now.next();
        self.now
    }
}

impl Default for LogicalClock {
    fn default() -> Self {
        Self::new()
    }
}
