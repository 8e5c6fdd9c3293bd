//! Character catalog: the immutable roster every pull and fusion draws from.

pub mod data;
pub mod generation;
pub mod types;

pub use generation::{describe_effect, generate_characters};
pub use types::*;

use crate::core::constants::DEFAULT_CATALOG_SEED;
use once_cell::sync::Lazy;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;

static SHARED_CATALOG: Lazy<Arc<Catalog>> =
    Lazy::new(|| Arc::new(Catalog::generate(DEFAULT_CATALOG_SEED)));

/// Read-only roster with lookup indexes by id, rarity and edition.
#[derive(Debug, Clone)]
pub struct Catalog {
    seed: u64,
    characters: Vec<Character>,
    by_id: HashMap<CharacterId, usize>,
    by_rarity: [Vec<usize>; 6],
}

impl Catalog {
    pub fn generate(seed: u64) -> Self {
        Self::from_characters(seed, generate_characters(seed))
    }

    /// Process-wide catalog built from the default seed on first use.
    pub fn shared() -> Arc<Catalog> {
        Arc::clone(&SHARED_CATALOG)
    }

    /// Catalog for a given seed, reusing the shared one when the seed matches.
    pub fn for_seed(seed: u64) -> Arc<Catalog> {
        if seed == DEFAULT_CATALOG_SEED {
            Self::shared()
        } else {
            Arc::new(Self::generate(seed))
        }
    }

    fn from_characters(seed: u64, characters: Vec<Character>) -> Self {
        let mut by_id = HashMap::with_capacity(characters.len());
        let mut by_rarity: [Vec<usize>; 6] = Default::default();
        for (index, character) in characters.iter().enumerate() {
            by_id.insert(character.id, index);
            by_rarity[character.rarity.index()].push(index);
        }
        Self {
            seed,
            characters,
            by_id,
            by_rarity,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.by_id.get(&id).map(|&i| &self.characters[i])
    }

    pub fn by_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &Character> {
        self.by_rarity[rarity.index()]
            .iter()
            .map(move |&i| &self.characters[i])
    }

    pub fn count_of_rarity(&self, rarity: Rarity) -> usize {
        self.by_rarity[rarity.index()].len()
    }

    pub fn by_edition(&self, edition: Edition) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(move |c| c.edition == edition)
    }

    pub fn count_of_edition(&self, edition: Edition) -> usize {
        self.by_edition(edition).count()
    }

    /// Uniform pick among every entry of a tier, all editions included.
    pub fn random_of_rarity<R: Rng>(&self, rarity: Rarity, rng: &mut R) -> Option<&Character> {
        let pool = &self.by_rarity[rarity.index()];
        if pool.is_empty() {
            return None;
        }
        Some(&self.characters[pool[rng.gen_range(0..pool.len())]])
    }
}
