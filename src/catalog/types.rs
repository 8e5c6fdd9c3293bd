//! Catalog data types: rarity tiers, editions, passive effects, characters.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    SuperRare = 2,
    UltraRare = 3,
    Legendary = 4,
    Mythic = 5,
}

impl Rarity {
    /// All tiers, lowest first.
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::SuperRare,
        Rarity::UltraRare,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::SuperRare => "Super Rare",
            Rarity::UltraRare => "Ultra Rare",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        }
    }

    /// Short lowercase tag used by the terminal driver.
    pub fn tag(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::SuperRare => "super-rare",
            Rarity::UltraRare => "ultra-rare",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Rarity> {
        Rarity::ALL.into_iter().find(|r| r.tag() == tag)
    }

    /// The tier a successful fusion produces. Mythic has none.
    pub fn next(&self) -> Option<Rarity> {
        match self {
            Rarity::Common => Some(Rarity::Rare),
            Rarity::Rare => Some(Rarity::SuperRare),
            Rarity::SuperRare => Some(Rarity::UltraRare),
            Rarity::UltraRare => Some(Rarity::Legendary),
            Rarity::Legendary => Some(Rarity::Mythic),
            Rarity::Mythic => None,
        }
    }

    /// Base gems paid out per card sold.
    pub fn sell_value(&self) -> u64 {
        match self {
            Rarity::Common => SELL_VALUE_COMMON,
            Rarity::Rare => SELL_VALUE_RARE,
            Rarity::SuperRare => SELL_VALUE_SUPER_RARE,
            Rarity::UltraRare => SELL_VALUE_ULTRA_RARE,
            Rarity::Legendary => SELL_VALUE_LEGENDARY,
            Rarity::Mythic => SELL_VALUE_MYTHIC,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Thematic edition of a base character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Edition {
    Normal,
    Winter,
    Summer,
    Halloween,
    Special,
    Anniversary,
    Limited,
}

impl Edition {
    /// Editions that grant a completion bonus, in display order.
    pub const BONUS_EDITIONS: [Edition; 6] = [
        Edition::Normal,
        Edition::Winter,
        Edition::Summer,
        Edition::Halloween,
        Edition::Special,
        Edition::Anniversary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Edition::Normal => "Normal",
            Edition::Winter => "Winter",
            Edition::Summer => "Summer",
            Edition::Halloween => "Halloween",
            Edition::Special => "Special",
            Edition::Anniversary => "Anniversary",
            Edition::Limited => "Limited",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Edition::Normal => "normal",
            Edition::Winter => "winter",
            Edition::Summer => "summer",
            Edition::Halloween => "halloween",
            Edition::Special => "special",
            Edition::Anniversary => "anniversary",
            Edition::Limited => "limited",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    GemBoost,
    LuckBoost,
    TimerBoost,
    PullDiscount,
    SellBoost,
    /// Counts toward every other kind at once.
    Special,
}

impl EffectKind {
    /// The five stat-bearing kinds, excluding `Special`.
    pub const STATS: [EffectKind; 5] = [
        EffectKind::GemBoost,
        EffectKind::LuckBoost,
        EffectKind::TimerBoost,
        EffectKind::PullDiscount,
        EffectKind::SellBoost,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::GemBoost => "Gems",
            EffectKind::LuckBoost => "Luck",
            EffectKind::TimerBoost => "Speed",
            EffectKind::PullDiscount => "Discount",
            EffectKind::SellBoost => "Sell",
            EffectKind::Special => "All Boosts",
        }
    }
}

/// Passive effect carried by a character while it sits in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub value: f64,
    pub description: String,
}

impl Effect {
    pub fn new(kind: EffectKind, value: f64, description: impl Into<String>) -> Self {
        Self {
            kind,
            value,
            description: description.into(),
        }
    }
}

/// Structured catalog key.
///
/// `base` indexes the authored roster, `seq` separates generated entries that
/// share the same base and edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterId {
    pub base: u16,
    pub edition: Edition,
    pub has_effect: bool,
    pub seq: u16,
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}{}-{}",
            self.base,
            self.edition.tag(),
            if self.has_effect { "+fx" } else { "" },
            self.seq
        )
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub image: String,
    pub rarity: Rarity,
    pub edition: Edition,
    pub effect: Option<Effect>,
}

impl Character {
    pub fn has_effect(&self) -> bool {
        self.effect.is_some()
    }

    /// One-line summary for logs and the terminal driver.
    pub fn display(&self) -> String {
        match &self.effect {
            Some(effect) => format!(
                "[{}] {} ({}) - {}",
                self.rarity.name(),
                self.name,
                self.edition.name(),
                effect.description
            ),
            None => format!(
                "[{}] {} ({})",
                self.rarity.name(),
                self.name,
                self.edition.name()
            ),
        }
    }
}
