//! Economy: gem balance, passive income and the prize fountain.

pub mod logic;
pub mod types;

pub use logic::{fountain_reward, passive_reward};
pub use types::*;
