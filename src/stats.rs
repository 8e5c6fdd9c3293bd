//! Lifetime counters. They only ever grow.

use crate::catalog::Rarity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeStats {
    pub total_pulls: u64,
    pub total_gems_made: u64,
    pub total_cards_sold: u64,
    pub by_rarity: HashMap<Rarity, u64>,
}

impl Default for LifetimeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl LifetimeStats {
    pub fn new() -> Self {
        let mut by_rarity = HashMap::new();
        for rarity in Rarity::ALL {
            by_rarity.insert(rarity, 0);
        }
        Self {
            total_pulls: 0,
            total_gems_made: 0,
            total_cards_sold: 0,
            by_rarity,
        }
    }

    pub fn record_pulls(&mut self, times: u32) {
        self.total_pulls += times as u64;
    }

    pub fn record_rarity(&mut self, rarity: Rarity) {
        *self.by_rarity.entry(rarity).or_insert(0) += 1;
    }

    pub fn record_sale(&mut self, payout: u64, cards: u32) {
        self.total_gems_made += payout;
        self.total_cards_sold += cards as u64;
    }

    pub fn pulls_of(&self, rarity: Rarity) -> u64 {
        *self.by_rarity.get(&rarity).unwrap_or(&0)
    }
}
