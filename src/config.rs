//! Player-tunable settings, read from ~/.gacha/config.json.

use crate::core::constants::{DEFAULT_CATALOG_SEED, STARTING_GEMS};
use crate::rates::RateTable;
use crate::utils::persistence::JsonStore;
use serde::{Deserialize, Serialize};
use std::io;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_gems: u64,
    pub base_rates: RateTable,
    pub catalog_seed: u64,
    /// Fixed seed for the draw generator. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
    /// Name shown in the pull log. `None` picks "Player" plus a number.
    pub username: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_gems: STARTING_GEMS,
            base_rates: RateTable::base(),
            catalog_seed: DEFAULT_CATALOG_SEED,
            rng_seed: None,
            username: None,
        }
    }
}

impl GameConfig {
    /// Load ~/.gacha/config.json, falling back to defaults.
    pub fn load() -> Self {
        JsonStore::home()
            .map(|store| Self::load_from(&store))
            .unwrap_or_default()
    }

    pub fn load_from(store: &JsonStore) -> Self {
        store.load_or_default(CONFIG_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&JsonStore::home()?)
    }

    pub fn save_to(&self, store: &JsonStore) -> io::Result<()> {
        store.save(CONFIG_FILE, self)
    }

    /// Deterministic config for tests and the simulator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            username: Some("Tester".to_string()),
            ..Self::default()
        }
    }
}
