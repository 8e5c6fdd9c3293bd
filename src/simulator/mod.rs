//! Monte Carlo balance simulator.
//!
//! Plays many headless sessions to check:
//! - Observed rarity shares against the base table
//! - Worst droughts under the pity floors
//! - Fusion odds for identical and fully distinct batches

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{FusionStats, RunStats, SimReport};
pub use runner::run_simulation;
