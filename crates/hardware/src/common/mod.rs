//! Common types shared across the crate.
//!
//! This module provides the building blocks used by both the replacement
//! policies and the host cache. It includes:
//! 1. **Logical Time:** The `Tick` timestamp type and the host's monotonic clock.
//! 2. **Error Handling:** Configuration error types.

/// Error types for configuration loading and validation.
pub mod error;

/// Logical timestamps and the monotonic clock.
pub mod tick;

pub use error::ConfigError;
pub use tick::{LogicalClock, Tick};
