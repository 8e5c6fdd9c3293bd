use super::types::*;
use crate::catalog::{Catalog, Character, CharacterId, Edition, Effect, Rarity};
use crate::error::{GachaError, GachaResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Gems paid for selling `amount` cards of a tier.
pub fn sell_payout(rarity: Rarity, amount: u32, sell_boost: f64) -> u64 {
    let value = rarity.sell_value() as f64 * (1.0 + sell_boost / 100.0) * amount as f64;
    value.floor().max(0.0) as u64
}

/// The player's owned characters, in acquisition order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    entries: Vec<OwnedCharacter>,
    next_entry_id: u64,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_id(&mut self) -> EntryId {
        let id = EntryId(self.next_entry_id);
        self.next_entry_id += 1;
        id
    }

    fn position(&self, entry: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.entry_id == entry)
    }

    /// Add one copy. Effect cards always get a fresh entry; plain cards stack
    /// onto an existing plain entry with the same name.
    pub fn save(&mut self, character: Character) -> EntryId {
        if !character.has_effect() {
            if let Some(existing) = self
                .entries
                .iter_mut()
                .find(|e| !e.character.has_effect() && e.character.name == character.name)
            {
                existing.count += 1;
                return existing.entry_id;
            }
        }
        let id = self.mint_id();
        self.entries.push(OwnedCharacter::new(id, character));
        id
    }

    /// Sell `amount` copies and return the payout. The caller credits it.
    pub fn sell(&mut self, entry: EntryId, amount: u32, sell_boost: f64) -> GachaResult<u64> {
        let index = self.position(entry).ok_or(GachaError::EntryNotFound(entry))?;
        let owned = &self.entries[index];
        if owned.is_locked {
            return Err(GachaError::ItemLocked(entry));
        }
        if amount == 0 || amount > owned.count {
            return Err(GachaError::InvalidAmount {
                entry,
                requested: amount,
                owned: owned.count,
            });
        }
        let payout = sell_payout(owned.rarity(), amount, sell_boost);
        self.take(index, amount);
        Ok(payout)
    }

    fn take(&mut self, index: usize, amount: u32) {
        let owned = &mut self.entries[index];
        if owned.count > amount {
            owned.count -= amount;
        } else {
            self.entries.remove(index);
        }
    }

    /// Flip the lock flag and return the new state.
    pub fn toggle_lock(&mut self, entry: EntryId) -> GachaResult<bool> {
        let owned = self
            .entries
            .iter_mut()
            .find(|e| e.entry_id == entry)
            .ok_or(GachaError::EntryNotFound(entry))?;
        owned.is_locked = !owned.is_locked;
        Ok(owned.is_locked)
    }

    /// Consume one copy, dropping the entry at zero. Returns the character
    /// snapshot so it can be restored later.
    pub fn remove_one(&mut self, entry: EntryId) -> GachaResult<Character> {
        let index = self.position(entry).ok_or(GachaError::EntryNotFound(entry))?;
        let character = self.entries[index].character.clone();
        self.take(index, 1);
        Ok(character)
    }

    /// Put one copy back under its original handle: bump the count if the
    /// entry survived, otherwise re-insert it unlocked with count 1.
    pub fn restore(&mut self, entry: EntryId, character: Character) {
        if let Some(owned) = self.entries.iter_mut().find(|e| e.entry_id == entry) {
            owned.count += 1;
            return;
        }
        self.entries.push(OwnedCharacter::new(entry, character));
        if entry.0 >= self.next_entry_id {
            self.next_entry_id = entry.0 + 1;
        }
    }

    pub fn get(&self, entry: EntryId) -> Option<&OwnedCharacter> {
        self.entries.iter().find(|e| e.entry_id == entry)
    }

    pub fn count_of(&self, entry: EntryId) -> u32 {
        self.get(entry).map(|e| e.count).unwrap_or(0)
    }

    pub fn entries(&self) -> &[OwnedCharacter] {
        &self.entries
    }

    pub fn entries_of_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &OwnedCharacter> {
        self.entries.iter().filter(move |e| e.rarity() == rarity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_cards(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Passive effects of every owned effect card.
    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.entries.iter().filter_map(|e| e.character.effect.as_ref())
    }

    pub fn unique_ids(&self) -> HashSet<CharacterId> {
        self.entries.iter().map(|e| e.character.id).collect()
    }

    pub fn stats(&self, catalog: &Catalog) -> CollectionStats {
        let unique = self.unique_ids();

        let mut by_rarity: HashMap<Rarity, u32> = Rarity::ALL.iter().map(|r| (*r, 0)).collect();
        for entry in &self.entries {
            *by_rarity.entry(entry.rarity()).or_insert(0) += entry.count;
        }

        let by_edition = Edition::BONUS_EDITIONS
            .iter()
            .map(|&edition| EditionProgress {
                edition,
                owned: self
                    .entries
                    .iter()
                    .filter(|e| e.character.edition == edition)
                    .map(|e| e.count)
                    .sum(),
                unique: unique.iter().filter(|id| id.edition == edition).count(),
                max: catalog.count_of_edition(edition),
            })
            .collect();

        CollectionStats {
            total_entries: self.entries.len(),
            total_cards: self.total_cards(),
            unique_characters: unique.len(),
            catalog_size: catalog.len(),
            by_rarity,
            by_edition,
        }
    }
}
