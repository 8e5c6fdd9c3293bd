//! Fusion engine: stage ten same-tier cards for a chance at the next tier.

pub mod logic;
pub mod types;

pub use logic::{attempt_fusion, success_chance};
pub use types::*;
