#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod scheduler;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use scheduler::{FiredTimer, TickScheduler, TimerId};

/// Ticks per simulated second (one tick per host frame at 60 FPS).
pub const TICKS_PER_SECOND: u64 = 60;

/// Fixed tick type (60 ticks per second => ~16.7 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameTick(pub u64);

impl FrameTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Convert a duration in seconds to whole ticks, rounding to nearest.
pub fn ticks_for_seconds(seconds: f32) -> u64 {
    (seconds * TICKS_PER_SECOND as f32).round() as u64
}

/// Validation errors raised by constructor surfaces.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Ray direction was zero or not normalized.
    #[error("ray direction must be a normalized, non-zero vector")]
    InvalidDirection,
    /// Ray reach must be strictly positive.
    #[error("max distance must be positive, got {0}")]
    InvalidMaxDistance(f32),
}

/// Helper to derive a reproducible RNG seeded by session + entity domains.
pub fn scoped_rng(session_seed: u64, salt: u64) -> StdRng {
    StdRng::seed_from_u64(session_seed ^ salt)
}
