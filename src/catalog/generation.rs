//! Catalog generation: edition expansion of the base roster plus a seeded
//! padding pass up to the target catalog size.

use super::data::{BaseCharacter, BASE_ROSTER};
use super::types::{Character, CharacterId, Edition, Effect, EffectKind, Rarity};
use crate::core::constants::{
    CATALOG_TARGET_SIZE, PADDING_EFFECT_CHANCE, PADDING_EFFECT_MAX_VALUE,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Human-readable description for an effect of the given kind and value.
pub fn describe_effect(kind: EffectKind, value: f64) -> String {
    match kind {
        EffectKind::GemBoost => format!("+{:.0}% passive gem income", value),
        EffectKind::LuckBoost => format!("+{:.0}% chance for higher rarity pulls", value),
        EffectKind::TimerBoost => format!("{:.0}% faster gem timer", value),
        EffectKind::PullDiscount => format!("{:.0}% discount on pulls", value),
        EffectKind::SellBoost => format!("+{:.0}% sell value", value),
        EffectKind::Special => format!("All boosts +{:.0}%", value),
    }
}

fn base_effect(base: &BaseCharacter) -> Option<Effect> {
    base.effect
        .map(|(kind, value, description)| Effect::new(kind, value, description))
}

fn edition_entry(
    base_index: usize,
    base: &BaseCharacter,
    edition: Edition,
    rarity: Rarity,
    effect: Option<Effect>,
) -> Character {
    let name = match edition {
        Edition::Normal => base.name.to_string(),
        _ => format!("{} ({})", base.name, edition.name()),
    };
    Character {
        id: CharacterId {
            base: base_index as u16,
            edition,
            has_effect: effect.is_some(),
            seq: 0,
        },
        name,
        image: base.image.to_string(),
        rarity,
        edition,
        effect,
    }
}

/// Expand one base character into its editions.
///
/// Common bases only get the normal edition. Rare and above add Winter,
/// super-rare and above add Summer (both capped at ultra-rare), ultra-rare and
/// above add a legendary Special edition with its own gem boost, legendary and
/// above add a mythic Anniversary edition with its own luck boost. Winter and
/// Summer copies keep the base effect.
pub fn expand_editions(base_index: usize, base: &BaseCharacter) -> Vec<Character> {
    let effect = base_effect(base);
    let mut editions = vec![edition_entry(
        base_index,
        base,
        Edition::Normal,
        base.rarity,
        effect.clone(),
    )];

    if base.rarity >= Rarity::Rare {
        let rarity = base.rarity.min(Rarity::UltraRare);
        editions.push(edition_entry(
            base_index,
            base,
            Edition::Winter,
            rarity,
            effect.clone(),
        ));
    }

    if base.rarity >= Rarity::SuperRare {
        let rarity = base.rarity.min(Rarity::UltraRare);
        editions.push(edition_entry(
            base_index,
            base,
            Edition::Summer,
            rarity,
            effect.clone(),
        ));
    }

    if base.rarity >= Rarity::UltraRare {
        editions.push(edition_entry(
            base_index,
            base,
            Edition::Special,
            Rarity::Legendary,
            Some(Effect::new(
                EffectKind::GemBoost,
                10.0,
                describe_effect(EffectKind::GemBoost, 10.0),
            )),
        ));
    }

    if base.rarity >= Rarity::Legendary {
        editions.push(edition_entry(
            base_index,
            base,
            Edition::Anniversary,
            Rarity::Mythic,
            Some(Effect::new(
                EffectKind::LuckBoost,
                5.0,
                describe_effect(EffectKind::LuckBoost, 5.0),
            )),
        ));
    }

    editions
}

/// Cascaded rarity roll for padding entries. Each branch draws a fresh value.
fn roll_padding_rarity<R: Rng>(rng: &mut R) -> Rarity {
    if rng.gen::<f64>() > 0.8 {
        Rarity::Legendary
    } else if rng.gen::<f64>() > 0.6 {
        Rarity::UltraRare
    } else if rng.gen::<f64>() > 0.4 {
        Rarity::SuperRare
    } else if rng.gen::<f64>() > 0.2 {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

fn padding_entry<R: Rng>(position: usize, rng: &mut R) -> Character {
    let base_index = rng.gen_range(0..BASE_ROSTER.len());
    let base = &BASE_ROSTER[base_index];
    let edition = if rng.gen::<f64>() > 0.5 {
        Edition::Halloween
    } else {
        Edition::Special
    };
    let rarity = roll_padding_rarity(rng);

    let effect = if rng.gen::<f64>() < PADDING_EFFECT_CHANCE {
        let kind = EffectKind::STATS[rng.gen_range(0..EffectKind::STATS.len())];
        let value = rng.gen_range(1..=PADDING_EFFECT_MAX_VALUE) as f64;
        Some(Effect::new(kind, value, describe_effect(kind, value)))
    } else {
        None
    };

    Character {
        id: CharacterId {
            base: base_index as u16,
            edition,
            has_effect: effect.is_some(),
            seq: position as u16,
        },
        name: format!("{} ({} {})", base.name, edition.tag(), position),
        image: base.image.to_string(),
        rarity,
        edition,
        effect,
    }
}

/// Build the full catalog. The same seed always yields the same catalog.
pub fn generate_characters(seed: u64) -> Vec<Character> {
    let mut characters: Vec<Character> = BASE_ROSTER
        .iter()
        .enumerate()
        .flat_map(|(index, base)| expand_editions(index, base))
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    while characters.len() < CATALOG_TARGET_SIZE {
        let entry = padding_entry(characters.len(), &mut rng);
        characters.push(entry);
    }

    characters
}
