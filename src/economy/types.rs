//! Economy state and read-only views.

use serde::{Deserialize, Serialize};

/// Gem balance, passive income countdown and fountain accumulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub gems: u64,
    /// Seconds until the next passive payout, 0 to 60.
    pub next_gem_time: f64,
    /// Minutes accumulated since the last collection, capped at 25.
    pub fountain_minutes: f64,
    pub fountain_last_collected_ms: i64,
    /// Wall-clock reference for the passive timer. Whole seconds past it
    /// have not been applied yet.
    pub last_tick_ms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GemState {
    pub gems: u64,
    pub next_gem_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FountainState {
    pub minutes: f64,
    pub reward: u64,
    pub ready: bool,
}
