//! Collection tests: stacking, locks, selling and collection-driven effects.

use gacha::catalog::{Catalog, Character, EffectKind, Edition, Rarity};
use gacha::collection::{Collection, EntryId};
use gacha::config::GameConfig;
use gacha::core::clock::ManualClock;
use gacha::error::GachaError;
use gacha::presenter::NullPresenter;
use gacha::rates::{edition_bonuses, milestone_bonuses, ActiveEffects};
use gacha::session::GameSession;

fn named(name: &str) -> Character {
    Catalog::shared()
        .characters()
        .iter()
        .find(|c| c.name == name)
        .cloned()
        .unwrap()
}

fn normal_with_effect(kind: EffectKind) -> Character {
    Catalog::shared()
        .characters()
        .iter()
        .find(|c| c.edition == Edition::Normal && c.effect.as_ref().map(|e| e.kind) == Some(kind))
        .cloned()
        .unwrap()
}

/// Session resumed over a hand-built collection.
fn session_over(collection: Collection, gems: u64) -> GameSession {
    let config = GameConfig::seeded(5);
    let fresh = GameSession::new(&config, Box::new(ManualClock::new(0)), Box::new(NullPresenter));
    let mut data = fresh.to_save_data();
    data.collection = collection;
    data.economy.gems = gems;
    GameSession::restore(&config, data, Box::new(ManualClock::new(0)), Box::new(NullPresenter))
}

// =========================================================================
// Stacking
// =========================================================================

#[test]
fn test_plain_cards_stack_by_name() {
    let mut collection = Collection::new();
    let first = collection.save(named("Hello Kitty"));
    let second = collection.save(named("Hello Kitty"));
    collection.save(named("Keroppi"));
    assert_eq!(first, second);
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.count_of(first), 2);
    assert_eq!(collection.total_cards(), 3);
}

#[test]
fn test_effect_cards_never_stack() {
    let card = normal_with_effect(EffectKind::SellBoost);
    let mut collection = Collection::new();
    let a = collection.save(card.clone());
    let b = collection.save(card);
    assert_ne!(a, b);
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.count_of(a), 1);
    assert_eq!(collection.count_of(b), 1);
}

#[test]
fn test_entry_ids_are_never_reused() {
    let mut collection = Collection::new();
    let first = collection.save(named("Keroppi"));
    collection.sell(first, 1, 0.0).unwrap();
    let second = collection.save(named("Keroppi"));
    assert_ne!(first, second);
}

// =========================================================================
// Selling and locks
// =========================================================================

#[test]
fn test_locked_entry_cannot_be_sold() {
    let mut session = session_over(
        {
            let mut c = Collection::new();
            c.save(named("Chococat"));
            c
        },
        0,
    );
    let entry = EntryId(0);
    assert_eq!(session.toggle_lock(entry), Ok(true));
    assert_eq!(session.sell(entry, 1), Err(GachaError::ItemLocked(entry)));
    assert_eq!(session.gems(), 0);
    assert_eq!(session.collection().count_of(entry), 1);

    assert_eq!(session.toggle_lock(entry), Ok(false));
    assert_eq!(session.sell(entry, 1), Ok(30));
    assert!(session.collection().is_empty());
}

#[test]
fn test_sell_amount_bounds() {
    let mut collection = Collection::new();
    let entry = collection.save(named("Badtz-Maru"));
    collection.save(named("Badtz-Maru"));
    let mut session = session_over(collection, 0);

    assert!(matches!(
        session.sell(entry, 0),
        Err(GachaError::InvalidAmount { .. })
    ));
    assert!(matches!(
        session.sell(entry, 3),
        Err(GachaError::InvalidAmount { requested: 3, owned: 2, .. })
    ));
    assert_eq!(session.sell(entry, 2), Ok(60));
    assert_eq!(session.gems(), 60);
    assert_eq!(session.lifetime_stats().total_cards_sold, 2);
    assert_eq!(session.lifetime_stats().total_gems_made, 60);
    assert_eq!(
        session.sell(entry, 1),
        Err(GachaError::EntryNotFound(entry))
    );
}

#[test]
fn test_sell_boost_from_owned_card() {
    let mut collection = Collection::new();
    collection.save(normal_with_effect(EffectKind::SellBoost));
    let common = collection.save(named("Hello Kitty"));
    let mut session = session_over(collection, 0);

    assert_eq!(session.active_effects().sell_boost, 15.0);
    // floor(30 * 1.15)
    assert_eq!(session.sell(common, 1), Ok(34));
}

#[test]
fn test_selling_trims_fusion_staging() {
    let mut collection = Collection::new();
    let entry = collection.save(named("Pompompurin"));
    for _ in 0..3 {
        collection.save(named("Pompompurin"));
    }
    let mut session = session_over(collection, 0);
    for _ in 0..4 {
        session.stage_for_fusion(entry).unwrap();
    }
    session.sell(entry, 3).unwrap();
    assert_eq!(session.staged(Rarity::Common), &[entry]);
}

// =========================================================================
// Collection-driven effects
// =========================================================================

#[test]
fn test_active_effects_sum_all_sources() {
    let catalog = Catalog::shared();
    let mut collection = Collection::new();
    for character in catalog.characters().iter().take(60) {
        collection.save(character.clone());
    }
    let stats = collection.stats(&catalog);
    let session = session_over(collection.clone(), 0);

    let mut expected = ActiveEffects::from_effects(collection.effects());
    expected.merge(&milestone_bonuses(stats.unique_characters, stats.catalog_size));
    expected.merge(&edition_bonuses(
        stats.by_edition.iter().map(|p| (p.edition, p.unique, p.max)),
    ));
    assert_eq!(session.active_effects(), expected);
}

#[test]
fn test_milestone_reached_through_collection() {
    let catalog = Catalog::shared();
    let share = (catalog.len() as f64 * 0.30).ceil() as usize;
    let mut collection = Collection::new();
    for character in catalog.characters().iter().take(share) {
        collection.save(character.clone());
    }
    let stats = collection.stats(&catalog);
    assert_eq!(stats.unique_characters, share);
    assert_eq!(
        milestone_bonuses(stats.unique_characters, stats.catalog_size).gem_boost,
        5.0
    );
    assert_eq!(
        milestone_bonuses(stats.unique_characters - 1, stats.catalog_size).gem_boost,
        0.0
    );
}

#[test]
fn test_edition_progress_counts_unique_ids() {
    let catalog = Catalog::shared();
    let mut collection = Collection::new();
    let card = normal_with_effect(EffectKind::SellBoost);
    collection.save(card.clone());
    collection.save(card);
    collection.save(named("Hello Kitty"));
    collection.save(named("Hello Kitty"));

    let stats = collection.stats(&catalog);
    let normal = stats.edition(Edition::Normal).unwrap();
    assert_eq!(normal.owned, 4);
    assert_eq!(normal.unique, 2);
    assert_eq!(normal.max, catalog.count_of_edition(Edition::Normal));
    assert_eq!(stats.total_entries, 3);
    assert_eq!(stats.by_rarity[&Rarity::Common], 2);
    assert_eq!(stats.by_rarity[&Rarity::UltraRare], 2);
}
