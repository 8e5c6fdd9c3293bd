//! Authored base roster. Editions and padding entries are derived from it.

use super::types::{EffectKind, Rarity};

pub struct BaseCharacter {
    pub name: &'static str,
    pub image: &'static str,
    pub rarity: Rarity,
    pub effect: Option<(EffectKind, f64, &'static str)>,
}

pub static BASE_ROSTER: [BaseCharacter; 16] = [
    // Common
    BaseCharacter {
        name: "Hello Kitty",
        image: "/images/hello-kitty.webp",
        rarity: Rarity::Common,
        effect: None,
    },
    BaseCharacter {
        name: "Keroppi",
        image: "/images/keropi.webp",
        rarity: Rarity::Common,
        effect: None,
    },
    BaseCharacter {
        name: "Chococat",
        image: "/images/chococat.webp",
        rarity: Rarity::Common,
        effect: None,
    },
    BaseCharacter {
        name: "Badtz-Maru",
        image: "/images/badtz-maru.webp",
        rarity: Rarity::Common,
        effect: None,
    },
    BaseCharacter {
        name: "Pompompurin",
        image: "/images/pompompourin.webp",
        rarity: Rarity::Common,
        effect: None,
    },
    // Rare
    BaseCharacter {
        name: "My Melody",
        image: "/images/melody.webp",
        rarity: Rarity::Rare,
        effect: None,
    },
    BaseCharacter {
        name: "Pochaco",
        image: "/images/pochaco.webp",
        rarity: Rarity::Rare,
        effect: None,
    },
    BaseCharacter {
        name: "Twin Stars",
        image: "/images/twin-stars.webp",
        rarity: Rarity::Rare,
        effect: None,
    },
    // Super Rare
    BaseCharacter {
        name: "Cinnamoroll",
        image: "/images/cinnamaroll.webp",
        rarity: Rarity::SuperRare,
        effect: None,
    },
    BaseCharacter {
        name: "Kuromi",
        image: "/images/kuromi.webp",
        rarity: Rarity::SuperRare,
        effect: None,
    },
    // Ultra Rare
    BaseCharacter {
        name: "Hello Kitty",
        image: "/images/hello-kitty.webp",
        rarity: Rarity::UltraRare,
        effect: Some((EffectKind::GemBoost, 5.0, "+5% passive gem income")),
    },
    BaseCharacter {
        name: "Kuromi",
        image: "/images/kuromi.webp",
        rarity: Rarity::UltraRare,
        effect: Some((EffectKind::TimerBoost, 10.0, "10% faster gem timer")),
    },
    BaseCharacter {
        name: "My Melody",
        image: "/images/melody.webp",
        rarity: Rarity::UltraRare,
        effect: Some((EffectKind::SellBoost, 15.0, "+15% sell value")),
    },
    // Legendary
    BaseCharacter {
        name: "Hello Kitty",
        image: "/images/hello-kitty.webp",
        rarity: Rarity::Legendary,
        effect: Some((
            EffectKind::LuckBoost,
            3.0,
            "+3% chance for higher rarity pulls",
        )),
    },
    BaseCharacter {
        name: "Cinnamoroll",
        image: "/images/cinnamaroll.webp",
        rarity: Rarity::Legendary,
        effect: Some((EffectKind::PullDiscount, 5.0, "5% discount on pulls")),
    },
    // Mythic
    BaseCharacter {
        name: "Hello Kitty & Friends",
        image: "/images/hello-kitty.webp",
        rarity: Rarity::Mythic,
        effect: Some((EffectKind::Special, 1.0, "All boosts +1%")),
    },
];
