//! Pity tracker: bounds the drought length for super-rare and ultra-rare.

use crate::catalog::Rarity;
use crate::core::constants::{PITY_SUPER_RARE_THRESHOLD, PITY_ULTRA_RARE_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Two independent counters of pulls since the last hit at or above a tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PityTracker {
    pub pulls_since_super_rare: u32,
    pub pulls_since_ultra_rare: u32,
}

/// Read-only view for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PityProgress {
    pub pulls_since_super_rare: u32,
    pub super_rare_threshold: u32,
    pub pulls_since_ultra_rare: u32,
    pub ultra_rare_threshold: u32,
}

impl PityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum rarity the next pull is forced to, if any. The ultra-rare
    /// guarantee takes precedence.
    pub fn floor(&self) -> Option<Rarity> {
        if self.pulls_since_ultra_rare >= PITY_ULTRA_RARE_THRESHOLD {
            Some(Rarity::UltraRare)
        } else if self.pulls_since_super_rare >= PITY_SUPER_RARE_THRESHOLD {
            Some(Rarity::SuperRare)
        } else {
            None
        }
    }

    /// Update both counters after a pull of `rarity`.
    pub fn record(&mut self, rarity: Rarity) {
        if rarity >= Rarity::SuperRare {
            self.pulls_since_super_rare = 0;
        } else {
            self.pulls_since_super_rare += 1;
        }
        if rarity >= Rarity::UltraRare {
            self.pulls_since_ultra_rare = 0;
        } else {
            self.pulls_since_ultra_rare += 1;
        }
    }

    pub fn progress(&self) -> PityProgress {
        PityProgress {
            pulls_since_super_rare: self.pulls_since_super_rare,
            super_rare_threshold: PITY_SUPER_RARE_THRESHOLD,
            pulls_since_ultra_rare: self.pulls_since_ultra_rare,
            ultra_rare_threshold: PITY_ULTRA_RARE_THRESHOLD,
        }
    }
}
