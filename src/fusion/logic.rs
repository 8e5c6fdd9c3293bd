use super::types::*;
use crate::catalog::{Catalog, CharacterId, Rarity};
use crate::collection::{Collection, EntryId};
use crate::core::constants::*;
use crate::error::{GachaError, GachaResult};
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Whole-percent success chance for a staged batch, judged by how many
/// distinct catalog ids it holds.
///
/// One id throughout is a guaranteed success; ten distinct ids is a coin flip.
pub fn success_chance(ids: &[CharacterId]) -> u32 {
    let unique = ids.iter().collect::<HashSet<_>>().len();
    if unique <= 1 {
        return 100;
    }
    let missing = FUSION_BATCH_SIZE.saturating_sub(unique) as f64;
    let span = (FUSION_BATCH_SIZE - 1) as f64;
    (FUSION_BASE_CHANCE + missing * FUSION_SIMILARITY_SPAN / span).floor() as u32
}

impl FusionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged(&self, rarity: Rarity) -> &[EntryId] {
        self.staged.get(&rarity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Copies of `entry` staged across all tiers.
    pub fn staged_count(&self, entry: EntryId) -> usize {
        self.staged
            .values()
            .flat_map(|list| list.iter())
            .filter(|e| **e == entry)
            .count()
    }

    pub fn total_staged(&self) -> usize {
        self.staged.values().map(Vec::len).sum()
    }

    /// Stage one more copy of `entry`. Returns the tier's new staged count.
    pub fn stage(&mut self, collection: &Collection, entry: EntryId) -> GachaResult<usize> {
        let owned = collection
            .get(entry)
            .ok_or(GachaError::EntryNotFound(entry))?;
        let rarity = owned.rarity();
        if owned.is_locked {
            return Err(GachaError::ItemLocked(entry));
        }
        if rarity.next().is_none() {
            return Err(GachaError::NoHigherRarity(rarity));
        }
        if self.staged(rarity).len() >= FUSION_BATCH_SIZE {
            return Err(GachaError::SelectionFull(rarity));
        }
        if self.staged_count(entry) >= owned.count as usize {
            return Err(GachaError::SelectionExceedsOwned(entry));
        }
        let list = self.staged.entry(rarity).or_default();
        list.push(entry);
        Ok(list.len())
    }

    /// Remove the staged copy at `index` within a tier.
    pub fn unstage(&mut self, rarity: Rarity, index: usize) -> GachaResult<EntryId> {
        match self.staged.get_mut(&rarity) {
            Some(list) if index < list.len() => Ok(list.remove(index)),
            _ => Err(GachaError::InvalidIndex { rarity, index }),
        }
    }

    pub fn clear(&mut self, rarity: Rarity) {
        self.staged.remove(&rarity);
    }

    /// Drop staged copies that the collection no longer backs, latest first.
    /// Locked entries back none.
    pub fn trim_to_owned(&mut self, collection: &Collection) {
        for list in self.staged.values_mut() {
            let mut kept: HashMap<EntryId, u32> = HashMap::new();
            list.retain(|entry| {
                let backed = match collection.get(*entry) {
                    Some(owned) if !owned.is_locked => owned.count,
                    _ => 0,
                };
                let seen = kept.entry(*entry).or_insert(0);
                if *seen < backed {
                    *seen += 1;
                    true
                } else {
                    false
                }
            });
        }
        self.staged.retain(|_, list| !list.is_empty());
    }

    /// Check the tier's batch against the collection without changing
    /// anything. Returns the staged catalog ids on success.
    fn validate(&self, collection: &Collection, rarity: Rarity) -> GachaResult<Vec<CharacterId>> {
        let staged = self.staged(rarity);
        if staged.len() != FUSION_BATCH_SIZE {
            return Err(GachaError::InvalidSelectionSize {
                expected: FUSION_BATCH_SIZE,
                found: staged.len(),
            });
        }
        let mut ids = Vec::with_capacity(staged.len());
        for entry in staged {
            let owned = collection
                .get(*entry)
                .ok_or(GachaError::EntryNotFound(*entry))?;
            if owned.is_locked {
                return Err(GachaError::ItemLocked(*entry));
            }
            if self.staged_count(*entry) > owned.count as usize {
                return Err(GachaError::SelectionExceedsOwned(*entry));
            }
            ids.push(owned.character.id);
        }
        Ok(ids)
    }
}

/// Resolve the staged batch for `rarity`.
///
/// Success consumes all ten and adds one random card of the next tier.
/// Failure consumes all ten and gives back the first five in staging order.
/// The tier's selection is cleared either way; a rejected attempt changes
/// nothing.
pub fn attempt_fusion<R: Rng>(
    collection: &mut Collection,
    selection: &mut FusionSelection,
    rarity: Rarity,
    catalog: &Catalog,
    rng: &mut R,
) -> GachaResult<FusionOutcome> {
    let next = rarity.next().ok_or(GachaError::NoHigherRarity(rarity))?;
    if catalog.count_of_rarity(next) == 0 {
        return Err(GachaError::NoHigherRarity(rarity));
    }
    let ids = selection.validate(collection, rarity)?;
    let chance = success_chance(&ids);
    let success = rng.gen::<f64>() * 100.0 < chance as f64;

    let staged: Vec<EntryId> = selection.staged(rarity).to_vec();
    let mut consumed = Vec::with_capacity(staged.len());
    for entry in &staged {
        let character = collection.remove_one(*entry)?;
        consumed.push((*entry, character));
    }

    let mut result = None;
    let mut returned = Vec::new();
    if success {
        if let Some(character) = catalog.random_of_rarity(next, rng) {
            let entry = collection.save(character.clone());
            result = Some((entry, character.clone()));
        }
    } else {
        for (entry, character) in consumed.iter().take(FUSION_FAILURE_RETURN_COUNT) {
            collection.restore(*entry, character.clone());
            returned.push(*entry);
        }
    }
    selection.clear(rarity);

    Ok(FusionOutcome {
        rarity,
        success,
        chance,
        result,
        consumed: staged,
        returned,
    })
}
