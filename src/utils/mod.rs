//! Utility modules: logging setup and the JSON settings store.

pub mod logging;
pub mod persistence;
