//! Collection ledger types.

use crate::catalog::{Character, Edition, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque handle to one collection entry, minted by the collection and never
/// reused within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A character snapshot the player owns.
///
/// Effect-bearing characters always have `count == 1`; plain characters
/// stack by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedCharacter {
    pub entry_id: EntryId,
    pub character: Character,
    pub count: u32,
    pub is_locked: bool,
}

impl OwnedCharacter {
    pub fn new(entry_id: EntryId, character: Character) -> Self {
        Self {
            entry_id,
            character,
            count: 1,
            is_locked: false,
        }
    }

    pub fn rarity(&self) -> Rarity {
        self.character.rarity
    }
}

/// Per-edition completion row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditionProgress {
    pub edition: Edition,
    /// Cards owned in this edition, duplicates included.
    pub owned: u32,
    /// Distinct catalog entries owned in this edition.
    pub unique: usize,
    /// Catalog entries in this edition.
    pub max: usize,
}

impl EditionProgress {
    pub fn completion(&self) -> f64 {
        crate::rates::edition_completion(self.unique, self.max)
    }
}

/// Read-only summary of the collection against a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionStats {
    pub total_entries: usize,
    pub total_cards: u32,
    pub unique_characters: usize,
    pub catalog_size: usize,
    pub by_rarity: HashMap<Rarity, u32>,
    pub by_edition: Vec<EditionProgress>,
}

impl CollectionStats {
    pub fn edition(&self, edition: Edition) -> Option<&EditionProgress> {
        self.by_edition.iter().find(|p| p.edition == edition)
    }

    pub fn completion(&self) -> f64 {
        if self.catalog_size == 0 {
            return 0.0;
        }
        self.unique_characters as f64 / self.catalog_size as f64 * 100.0
    }
}
