//! Gacha - collectible character draws, fusion and a gem economy.
//!
//! This module exposes the game engine for the terminal driver, the
//! simulator and tests.

pub mod build_info;
pub mod catalog;
pub mod collection;
pub mod config;
pub mod core;
pub mod economy;
pub mod error;
pub mod fusion;
pub mod pity;
pub mod presenter;
pub mod pull;
pub mod rates;
pub mod save;
pub mod session;
pub mod simulator;
pub mod stats;
pub mod utils;
