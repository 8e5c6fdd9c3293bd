//! Pull engine: pricing and weighted draws under the pity rules.

pub mod logic;

pub use logic::*;
