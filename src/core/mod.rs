//! Core tunables and the wall-clock abstraction used by the timers.

#![allow(unused_imports)]

pub mod clock;
pub mod constants;

pub use clock::*;
pub use constants::*;
