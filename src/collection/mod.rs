//! Collection store: owned characters, stacking, locks and selling.

pub mod logic;
pub mod types;

pub use logic::{sell_payout, Collection};
pub use types::*;
