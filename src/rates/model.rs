//! Per-tier draw weights: luck adjustment, normalization, pity floors and the
//! cumulative roll that maps a uniform value onto a rarity.

use crate::catalog::Rarity;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Six rarity weights. Raw tables need not sum to 100; normalized ones do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub common: f64,
    pub rare: f64,
    pub super_rare: f64,
    pub ultra_rare: f64,
    pub legendary: f64,
    pub mythic: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::base()
    }
}

impl RateTable {
    /// The unmodified base weights.
    pub fn base() -> Self {
        Self {
            common: BASE_RATE_COMMON,
            rare: BASE_RATE_RARE,
            super_rare: BASE_RATE_SUPER_RARE,
            ultra_rare: BASE_RATE_ULTRA_RARE,
            legendary: BASE_RATE_LEGENDARY,
            mythic: BASE_RATE_MYTHIC,
        }
    }

    pub fn from_weights(weights: [f64; 6]) -> Self {
        Self {
            common: weights[0],
            rare: weights[1],
            super_rare: weights[2],
            ultra_rare: weights[3],
            legendary: weights[4],
            mythic: weights[5],
        }
    }

    /// Weights indexed by `Rarity::index()`.
    pub fn weights(&self) -> [f64; 6] {
        [
            self.common,
            self.rare,
            self.super_rare,
            self.ultra_rare,
            self.legendary,
            self.mythic,
        ]
    }

    pub fn weight(&self, rarity: Rarity) -> f64 {
        self.weights()[rarity.index()]
    }

    pub fn total(&self) -> f64 {
        self.weights().iter().sum()
    }

    /// Apply a luck boost. Common loses weight down to a hard floor, rare is
    /// untouched, the upper tiers gain. The floor never lifts common above
    /// its own base weight.
    pub fn adjusted(&self, luck_boost: f64) -> Self {
        let floor = COMMON_RATE_FLOOR.min(self.common);
        Self {
            common: (self.common - luck_boost * LUCK_COMMON_FACTOR).max(floor),
            rare: self.rare,
            super_rare: self.super_rare + luck_boost * LUCK_SUPER_RARE_FACTOR,
            ultra_rare: self.ultra_rare + luck_boost * LUCK_ULTRA_RARE_FACTOR,
            legendary: self.legendary + luck_boost * LUCK_LEGENDARY_FACTOR,
            mythic: self.mythic + luck_boost * LUCK_MYTHIC_FACTOR,
        }
    }

    /// Rescale so the six weights sum to 100. An all-zero table is returned
    /// unchanged.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total <= 0.0 {
            return *self;
        }
        let mut weights = self.weights();
        for w in weights.iter_mut() {
            *w = *w / total * 100.0;
        }
        Self::from_weights(weights)
    }

    /// Zero every tier below `floor` and renormalize the rest to 100.
    ///
    /// If the remaining tiers carry no weight at all, the floor tier takes the
    /// whole distribution so the guarantee still holds.
    pub fn with_pity_floor(&self, floor: Rarity) -> Self {
        let mut weights = self.weights();
        for rarity in Rarity::ALL.iter().filter(|r| **r < floor) {
            weights[rarity.index()] = 0.0;
        }
        let remaining: f64 = weights.iter().sum();
        if remaining <= 0.0 {
            weights[floor.index()] = 100.0;
            return Self::from_weights(weights);
        }
        Self::from_weights(weights).normalized()
    }

    /// Map a roll in [0, 100) onto a tier, checking the highest band first.
    ///
    /// Floating-point slack past the last band lands on the lowest tier that
    /// still has weight, never on a zeroed one.
    pub fn roll(&self, roll: f64) -> Rarity {
        let mut cumulative = 0.0;
        for rarity in Rarity::ALL.iter().rev() {
            let weight = self.weight(*rarity);
            if weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            if roll < cumulative {
                return *rarity;
            }
        }
        Rarity::ALL
            .into_iter()
            .find(|r| self.weight(*r) > 0.0)
            .unwrap_or(Rarity::Common)
    }
}

/// Normalized draw rates for a given luck boost.
pub fn effective_rates(base: &RateTable, luck_boost: f64) -> RateTable {
    base.adjusted(luck_boost).normalized()
}
